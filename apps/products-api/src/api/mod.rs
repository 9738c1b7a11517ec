//! API routes module

pub mod health;
pub mod products;

use axum::{Router, middleware};
use axum_helpers::{api_key_middleware, optional_jwt_auth_middleware};

use crate::state::AppState;

/// Create all API routes
///
/// Every route requires the API key; bearer tokens are decoded when present
/// and enforced per handler.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/product", products::router(state))
        .layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            optional_jwt_auth_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.config.api_key.clone(),
            api_key_middleware,
        ))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{ApiKeyConfig, JwtAuth, JwtConfig};
    use core_config::{Environment, app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use tower::ServiceExt;

    // The client connects lazily, so no server is needed as long as requests
    // are rejected before reaching the database.
    async fn state() -> AppState {
        let mongodb = MongoConfig::new("mongodb://127.0.0.1:1", "shop_test");
        let mongo_client = mongodb::Client::with_uri_str(mongodb.url()).await.unwrap();
        let jwt = JwtConfig::new("routes-test-secret-with-32-characters").unwrap();

        AppState {
            db: mongo_client.database(mongodb.database()),
            mongo_client,
            jwt: JwtAuth::new(&jwt),
            config: Config {
                app: app_info!(),
                environment: Environment::Development,
                server: ServerConfig::default(),
                mongodb,
                jwt,
                api_key: ApiKeyConfig::new("routes-test-key"),
            },
        }
    }

    #[tokio::test]
    async fn test_product_routes_require_api_key() {
        let app = routes(&state().await);

        let response = app
            .oneshot(Request::builder().uri("/product").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_route_rejects_anonymous_before_database() {
        let app = routes(&state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/product/{}", uuid_like()))
                    .header("apikey", "routes-test-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    fn uuid_like() -> &'static str {
        "0192f0c1-7d2e-7c3a-9f00-5b1d2c3e4f50"
    }
}
