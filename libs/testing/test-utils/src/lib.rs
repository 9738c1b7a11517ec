//! Test helpers shared by the domain crates
//!
//! `TestMongo` (feature `mongo`) starts a throwaway MongoDB container.
//! `TestDataBuilder` derives stable ids and names from the test name so that
//! tests sharing a container never see each other's data.
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn reviews_round_trip() {
//!     let mongo = TestMongo::new().await;
//!     let data = TestDataBuilder::from_test_name("reviews_round_trip");
//!
//!     let db = mongo.database(&data.database());
//!     let reviewer = data.user_id_n(1);
//! }
//! ```

use std::hash::{DefaultHasher, Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Deterministic ids and names keyed by a seed
#[derive(Debug, Clone, Copy)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of `name`, usually the test function's name
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id_n(0)
    }

    /// The `n`-th user for this seed, for products reviewed by several users
    pub fn user_id_n(&self, n: u64) -> Uuid {
        Uuid::from_u64_pair(self.seed, n)
    }

    /// `test-{prefix}-{seed}-{suffix}`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Database name private to this seed, short enough for MongoDB's 64 byte limit
    pub fn database(&self) -> String {
        format!("test_{:016x}", self.seed)
    }
}

pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(actual, expected, "{context}: expected {expected}, got {actual}");
    }

    /// Unwrap `value`, failing the test with `context` when it is `None`
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        match value {
            Some(value) => value,
            None => panic!("{context}: expected Some, got None"),
        }
    }
}
