//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services.
//!
//! - **[`auth`]**: API key gate, JWT verification, `AuthUser` / `AdminUser` extractors
//! - **[`server`]**: documented router, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: `AppError` and structured `ErrorResponse` bodies
//! - **[`extractors`]**: `UuidPath` and `ValidatedJson`
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! create_production_app(router, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, ADMIN_ROLE, API_KEY_HEADER, AdminUser, ApiKeyConfig, AuthUser, JwtAuth,
    JwtClaims, JwtConfig, api_key_middleware, optional_jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};
