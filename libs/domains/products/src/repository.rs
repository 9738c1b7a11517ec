use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::filter::ProductFilter;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Review mutations happen on the loaded aggregate; `save` writes the whole
/// product back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List products matching a filter, newest first
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Replace a stored product with `product`
    async fn save(&self, product: &Product) -> ProductResult<Product>;

    /// Update an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        // Newest first
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map_or(usize::MAX, |l| l as usize);
        Ok(result.into_iter().skip(offset).take(limit).collect())
    }

    async fn save(&self, product: &Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let stored = products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *stored = product.clone();

        tracing::info!(product_id = %product.id, "Saved product");
        Ok(product.clone())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);

        tracing::info!(product_id = %id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
