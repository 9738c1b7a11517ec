//! Database connectors and shared utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection management and health checks
//! - `config` - `core_config::FromEnv` support for connection settings
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_with_retry};
//!
//! let config = MongoConfig::new("mongodb://localhost:27017", "shop");
//! let client = connect_with_retry(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
