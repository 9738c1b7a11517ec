//! MongoDB integration tests for Products domain
//!
//! These run the repository and service against a real MongoDB container and
//! need Docker: `cargo test -p domain_products -- --ignored`.

use domain_products::*;
use ::mongodb::bson::{Bson, Document, doc};
use test_utils::assertions::{assert_some, assert_uuid_eq};
use test_utils::{TestDataBuilder, TestMongo};

async fn service(
    mongo: &TestMongo,
    builder: &TestDataBuilder,
) -> ProductService<MongoProductRepository> {
    let db = mongo.database(&builder.database());
    let repository = MongoProductRepository::new(&db);
    repository.init_indexes().await.unwrap();
    ProductService::new(repository)
}

fn create(price: f64, description: &str) -> CreateProduct {
    CreateProduct {
        name: format!("Dish {}", price),
        price,
        count_in_stock: 10,
        description: description.to_string(),
        image: None,
        is_active: true,
    }
}

fn review(rating: u8) -> ReviewInput {
    ReviewInput {
        rating: Rating::new(rating).unwrap(),
        comment: "Lovely food, arrived hot".to_string(),
    }
}

fn query(build: impl FnOnce(&mut ProductQuery)) -> ProductQuery {
    let mut q = ProductQuery::default();
    build(&mut q);
    q
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_round_trip() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_create_get");
    let service = service(&mongo, &builder).await;

    let created = service
        .create_product(create(2000.0, "Jellof rice as you like it"))
        .await
        .unwrap();

    let fetched = service.get_product(created.id).await.unwrap();
    assert_uuid_eq(fetched.id, created.id, "fetched product");
    assert_eq!(fetched.price, 2000.0);
    assert_eq!(fetched.rating(), 0);
    assert_eq!(
        fetched.created_at.timestamp_millis(),
        created.created_at.timestamp_millis()
    );

    let raw = mongo
        .database(&builder.database())
        .collection::<Document>("products")
        .find_one(doc! { "_id": { "$exists": true } })
        .await
        .unwrap();
    let raw = assert_some(raw, "stored product");
    assert!(matches!(raw.get("createdAt"), Some(Bson::DateTime(_))));
    assert!(matches!(raw.get("updatedAt"), Some(Bson::DateTime(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_filters_against_mongo() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_list_filters");
    let service = service(&mongo, &builder).await;

    for (price, description) in [
        (2000.0, "Jellof rice as you like it"),
        (4000.0, "Pounded yam with egusi"),
        (4500.0, "Peppered goat meat"),
    ] {
        service
            .create_product(create(price, description))
            .await
            .unwrap();
    }

    let single = service
        .list_products(query(|q| q.price = Some("1000-2000".to_string())))
        .await
        .unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].price, 2000.0);

    let either = service
        .list_products(query(|q| q.price = Some("1000-2000,4100-*".to_string())))
        .await
        .unwrap();
    assert_eq!(either.len(), 2);

    let search = service
        .list_products(query(|q| q.search = Some("LIKE".to_string())))
        .await
        .unwrap();
    assert_eq!(search.len(), 1);

    let none = service
        .list_products(query(|q| q.search = Some("likz".to_string())))
        .await
        .unwrap();
    assert!(none.is_empty());

    let reversed = service
        .list_products(query(|q| q.price = Some("2000-1000".to_string())))
        .await
        .unwrap();
    assert!(reversed.is_empty());

    let page = service
        .list_products(query(|q| q.limit = Some("2".to_string())))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert!(page[0].created_at >= page[1].created_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_reviews_persist_and_filter() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_reviews");
    let service = service(&mongo, &builder).await;

    let product = service
        .create_product(create(2000.0, "Jellof rice as you like it"))
        .await
        .unwrap();
    let other = service
        .create_product(create(4000.0, "Pounded yam with egusi"))
        .await
        .unwrap();

    service
        .add_review(product.id, builder.user_id_n(1), review(3))
        .await
        .unwrap();
    service
        .add_review(product.id, builder.user_id_n(2), review(4))
        .await
        .unwrap();
    service
        .add_review(other.id, builder.user_id_n(1), review(3))
        .await
        .unwrap();

    let stored = service.get_product(product.id).await.unwrap();
    assert_eq!(stored.num_reviews(), 2);
    assert_eq!(stored.rating(), 4);
    assert_some(stored.review_by(builder.user_id_n(2)), "second review");

    let duplicate = service
        .add_review(product.id, builder.user_id_n(1), review(5))
        .await;
    assert!(matches!(
        duplicate,
        Err(ProductError::Review(ReviewError::DuplicateUserReview(_)))
    ));

    let rated_three = service
        .list_products(query(|q| q.rating = Some("3".to_string())))
        .await
        .unwrap();
    assert_eq!(rated_three.len(), 1);
    assert_uuid_eq(rated_three[0].id, other.id, "exact rating match");

    let two_reviews = service
        .list_products(query(|q| q.reviews = Some("2-*".to_string())))
        .await
        .unwrap();
    assert_eq!(two_reviews.len(), 1);

    let after_delete = service
        .delete_review(product.id, builder.user_id_n(1))
        .await
        .unwrap();
    assert_eq!(after_delete.num_reviews(), 1);
    assert_eq!(after_delete.rating(), 4);
}
