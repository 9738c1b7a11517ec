//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::filter::{ProductFilter, ProductQuery};
use crate::models::{CreateProduct, Product, Review, ReviewInput, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Review operations load the product, apply the change to the aggregate and
/// save it back; a rejected change is never persisted.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products matching the query string filters
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let filter = ProductFilter::from_query(&query);
        self.repository.list(filter).await
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// Add `user`'s review to a product
    #[instrument(skip(self, input))]
    pub async fn add_review(
        &self,
        id: Uuid,
        user: Uuid,
        input: ReviewInput,
    ) -> ProductResult<Product> {
        let review = Review::new(user, input)?;
        let mut product = self.get_product(id).await?;

        product.add_review(review)?;

        tracing::info!(product_id = %id, rating = product.rating(), "Review added");
        self.repository.save(&product).await
    }

    /// Replace `user`'s review on a product
    #[instrument(skip(self, input))]
    pub async fn edit_review(
        &self,
        id: Uuid,
        user: Uuid,
        input: ReviewInput,
    ) -> ProductResult<Product> {
        let review = Review::new(user, input)?;
        let mut product = self.get_product(id).await?;

        product.edit_review(review)?;

        tracing::info!(product_id = %id, rating = product.rating(), "Review updated");
        self.repository.save(&product).await
    }

    /// Remove `user`'s review from a product
    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: Uuid, user: Uuid) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;

        product.delete_review(user)?;

        tracing::info!(product_id = %id, rating = product.rating(), "Review deleted");
        self.repository.save(&product).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
