use axum::http::{HeaderName, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::auth::API_KEY_HEADER;

/// CORS layer for the given origin or origin list.
///
/// Allows the methods the API serves, plus the `apikey`, `Authorization` and
/// `Cookie` headers with credentials. Preflight responses are cached for an hour.
pub fn create_cors_layer(allowed_origin: impl Into<AllowOrigin>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
            HeaderName::from_static(API_KEY_HEADER),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

