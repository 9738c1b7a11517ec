use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::review::ReviewError;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Review(e @ ReviewError::DuplicateUserReview(_)) => {
                AppError::Conflict(e.to_string())
            }
            ProductError::Review(e @ ReviewError::UserHasNoReview(_)) => {
                AppError::NotFound(e.to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: ProductError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_error_status_mapping() {
        let user = Uuid::now_v7();
        assert_eq!(status_of(ProductError::NotFound(user)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ReviewError::DuplicateUserReview(user).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ReviewError::UserHasNoReview(user).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ProductError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ProductError::Database("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
