//! Error codes carried by every [`ErrorResponse`](super::ErrorResponse).
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::Conflict.as_str(), "CONFLICT");
//! assert_eq!(ErrorCode::Conflict.code(), 1008);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! error_codes {
    ($($(#[$meta:meta])* $variant:ident = $code:literal, $name:literal, $message:literal;)+) => {
        /// 1000-1999 are client errors, 5000-5999 server errors.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum ErrorCode {
            $($(#[$meta])* $variant,)+
        }

        impl ErrorCode {
            /// Identifier sent to clients in the `error` field
            pub fn as_str(&self) -> &'static str {
                match self { $(Self::$variant => $name,)+ }
            }

            /// Integer sent in the `code` field and logged as `error_code`
            pub fn code(&self) -> i32 {
                match self { $(Self::$variant => $code,)+ }
            }

            pub fn default_message(&self) -> &'static str {
                match self { $(Self::$variant => $message,)+ }
            }
        }
    };
}

error_codes! {
    ValidationError = 1001, "VALIDATION_ERROR", "Request validation failed";
    InvalidUuid = 1002, "INVALID_UUID", "Invalid UUID format";
    JsonExtraction = 1003, "JSON_EXTRACTION", "Failed to parse request body";
    NotFound = 1004, "NOT_FOUND", "Resource not found";
    Unauthorized = 1006, "UNAUTHORIZED", "Authentication required";
    Forbidden = 1007, "FORBIDDEN", "Access forbidden";
    Conflict = 1008, "CONFLICT", "Resource already exists";
    BadRequest = 1010, "BAD_REQUEST", "Bad request";
    /// Missing or wrong `apikey` header
    InvalidApiKey = 1012, "INVALID_API_KEY", "Missing or invalid API key";
    /// Bearer token missing, malformed or expired
    InvalidToken = 1013, "INVALID_TOKEN", "Missing or invalid access token";
    InternalError = 5000, "INTERNAL_ERROR", "An internal server error occurred";
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
