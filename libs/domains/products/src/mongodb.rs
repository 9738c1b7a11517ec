//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Binary, Bson, Document, doc, spec::BinarySubtype},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::filter::ProductFilter;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create indexes for the filterable fields
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = [
            ("price", 1, "idx_price"),
            ("rating", 1, "idx_rating"),
            ("numReviews", 1, "idx_num_reviews"),
            ("isActive", 1, "idx_is_active"),
            ("createdAt", -1, "idx_created_at"),
        ]
        .into_iter()
        .map(|(field, order, name)| {
            let mut keys = Document::new();
            keys.insert(field, order);
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        });

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Matches how `Uuid` fields are encoded when a product is written:
    /// generic binary holding the 16 raw bytes.
    fn id_filter(id: Uuid) -> Document {
        let id = Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: id.as_bytes().to_vec(),
        });
        doc! { "_id": id }
    }

    fn find_options(filter: &ProductFilter) -> FindOptions {
        let mut options = FindOptions::default();
        options.sort = Some(doc! { "createdAt": -1 });
        options.limit = filter.limit.and_then(|l| i64::try_from(l).ok());
        options.skip = filter.offset;
        options
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mongo_filter = filter.to_document();
        tracing::debug!(filter = %mongo_filter, "Listing products");

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(Self::find_options(&filter))
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn save(&self, product: &Product) -> ProductResult<Product> {
        let result = self
            .collection
            .replace_one(Self::id_filter(product.id), product)
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(product.id));
        }

        tracing::info!(num_reviews = product.num_reviews(), "Product saved");
        Ok(product.clone())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let filter = Self::id_filter(id);
        let mut product = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.apply_update(input);

        self.collection.replace_one(filter, &product).await?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_is_binary() {
        let id = Uuid::now_v7();
        let filter = MongoProductRepository::id_filter(id);

        let Some(Bson::Binary(binary)) = filter.get("_id") else {
            panic!("expected binary _id, got {:?}", filter);
        };
        assert_eq!(binary.subtype, BinarySubtype::Generic);
        assert_eq!(binary.bytes, id.as_bytes().to_vec());
    }

    #[test]
    fn test_find_options_sort_newest_first() {
        let options = MongoProductRepository::find_options(&ProductFilter {
            limit: Some(20),
            offset: Some(40),
            ..Default::default()
        });

        assert_eq!(options.sort, Some(doc! { "createdAt": -1 }));
        assert_eq!(options.limit, Some(20));
        assert_eq!(options.skip, Some(40));
    }

    #[test]
    fn test_find_options_without_pagination() {
        let options = MongoProductRepository::find_options(&ProductFilter::default());
        assert_eq!(options.limit, None);
        assert_eq!(options.skip, None);
    }
}
