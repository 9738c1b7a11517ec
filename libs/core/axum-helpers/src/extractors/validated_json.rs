//! JSON extractor with validation through the `validator` crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes a JSON body and runs its `Validate` rules.
///
/// Body errors map to [`AppError::JsonExtractorRejection`]; rule violations
/// map to [`AppError::ValidationError`] with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct ReviewInput {
///     #[validate(length(min = 10))]
///     comment: String,
/// }
///
/// async fn add_review(ValidatedJson(input): ValidatedJson<ReviewInput>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
