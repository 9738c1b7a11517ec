//! Products Domain
//!
//! Product catalog with embedded user reviews, backed by MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, load / mutate / save
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product aggregate, reviews, query filter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod review;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use filter::{FieldFilter, NumericRange, ProductFilter, ProductQuery};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, DataResponse, InvalidRating, Product, Rating, Review, ReviewInput,
    UpdateProduct,
};
pub use mongodb::MongoProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use review::ReviewError;
pub use service::ProductService;
