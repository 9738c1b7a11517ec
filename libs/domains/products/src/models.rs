use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Review score, an integer from 1 to 5
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating must be between {min} and {max}, got {0}", min = Rating::MIN, max = Rating::MAX)]
pub struct InvalidRating(pub u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, InvalidRating> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Rating {
    type Error = InvalidRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// RFC 3339 strings in JSON, BSON dates in MongoDB
mod timestamp {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            value.serialize(serializer)
        } else {
            bson::DateTime::from_millis(value.timestamp_millis()).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            return DateTime::<Utc>::deserialize(deserializer);
        }
        let millis = bson::DateTime::deserialize(deserializer)?.timestamp_millis();
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {millis}ms")))
    }
}

/// A user's review, embedded in its product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Reviewing user; at most one review per user and product
    pub user: Uuid,
    #[serde(default)]
    pub rating: Rating,
    pub comment: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Validate `input` and build a review authored by `user`.
    pub fn new(user: Uuid, input: ReviewInput) -> Result<Self, validator::ValidationErrors> {
        input.validate()?;

        let now = Utc::now();
        Ok(Self {
            user,
            rating: input.rating,
            comment: input.comment,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Product entity stored in MongoDB
///
/// `rating`, `numReviews` and `reviews` change only through the review
/// operations, which keep them consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub count_in_stock: i32,
    pub description: String,
    /// URL of an uploaded product image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ceiling of the mean review rating, 0 without reviews
    #[serde(default)]
    pub(crate) rating: i32,
    #[serde(default)]
    pub(crate) num_reviews: i32,
    #[serde(default)]
    pub(crate) reviews: Vec<Review>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub count_in_stock: i32,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(url)]
    pub image: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub count_in_stock: Option<i32>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

/// Body of the review endpoints; the author comes from the access token
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReviewInput {
    #[serde(default)]
    pub rating: Rating,
    #[validate(length(min = 10, message = "comment must be at least 10 characters"))]
    pub comment: String,
}

/// `{ "data": ... }` response envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            price: input.price,
            count_in_stock: input.count_in_stock,
            description: input.description,
            image: input.image,
            rating: 0,
            num_reviews: 0,
            reviews: Vec::new(),
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(count_in_stock) = update.count_in_stock {
            self.count_in_stock = count_in_stock;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn num_reviews(&self) -> i32 {
        self.num_reviews
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }
}
