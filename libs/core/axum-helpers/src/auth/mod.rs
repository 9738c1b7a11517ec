//! Authentication and authorization.
//!
//! - API key gate for every API route (`apikey` header)
//! - Stateless HS256 JWT verification from header or cookie
//! - `AuthUser` / `AdminUser` extractors for protected handlers
//!
//! ```ignore
//! use axum_helpers::auth::{ApiKeyConfig, JwtAuth, JwtConfig, api_key_middleware, optional_jwt_auth_middleware};
//!
//! let jwt = JwtAuth::new(&JwtConfig::from_env()?);
//! let api = routes
//!     .layer(axum::middleware::from_fn_with_state(jwt, optional_jwt_auth_middleware))
//!     .layer(axum::middleware::from_fn_with_state(ApiKeyConfig::from_env()?, api_key_middleware));
//! ```

pub mod config;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use config::{ApiKeyConfig, JwtConfig};
pub use extractor::{AdminUser, AuthUser};
pub use jwt::{ACCESS_TOKEN_TTL, ADMIN_ROLE, JwtAuth, JwtClaims};
pub use middleware::{
    ACCESS_TOKEN_COOKIE, API_KEY_HEADER, api_key_middleware, extract_token_from_request,
    optional_jwt_auth_middleware,
};
