use super::{config::ApiKeyConfig, jwt::JwtAuth};
use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};

/// Header carrying the shared API key
pub const API_KEY_HEADER: &str = "apikey";

/// Cookie fallback for the bearer token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Extract the token from `Authorization: Bearer` or the `access_token` cookie.
pub fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .or_else(|| {
            headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        cookie
                            .trim()
                            .split_once('=')
                            .filter(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
                            .map(|(_, value)| value.to_string())
                    })
                })
        })
        .filter(|token| !token.is_empty())
}

/// Rejects requests without the configured `apikey` header with 401.
///
/// ```ignore
/// let api = Router::new()
///     .nest("/product", products)
///     .layer(axum::middleware::from_fn_with_state(api_key, api_key_middleware));
/// ```
pub async fn api_key_middleware(
    State(config): State<ApiKeyConfig>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|key| config.matches(key));

    match provided {
        Some(true) => return next.run(request).await,
        Some(false) => tracing::debug!("Rejected request with invalid API key"),
        None => tracing::debug!("Rejected request without API key"),
    }

    error_response(
        StatusCode::UNAUTHORIZED,
        ErrorCode::InvalidApiKey.default_message(),
        ErrorCode::InvalidApiKey,
    )
}

/// Inserts `JwtClaims` when a valid token is present; never rejects.
///
/// Route-level extractors (`AuthUser`, `AdminUser`) decide whether the claims
/// are required.
pub async fn optional_jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token_from_request(request.headers()) {
        match auth.verify_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(claims);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring invalid JWT"),
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtClaims, JwtConfig};
    use axum::{Router, body::Body, http::HeaderValue, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    const SECRET: &str = "middleware-test-secret-with-32-characters";

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
    }

    #[test]
    fn test_extract_token_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_token_from_request(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; access_token=xyz"),
        );
        assert_eq!(extract_token_from_request(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_extract_token_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert!(extract_token_from_request(&headers).is_none());
    }

    fn api_key_app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                ApiKeyConfig::new("shop-key"),
                api_key_middleware,
            ))
    }

    #[tokio::test]
    async fn test_api_key_accepted() {
        let response = api_key_app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(API_KEY_HEADER, "shop-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_key_missing_or_wrong() {
        let missing = api_key_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = api_key_app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(API_KEY_HEADER, "guess")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    }

    fn claims_app() -> Router {
        Router::new()
            .route(
                "/",
                get(|request: Request| async move {
                    request
                        .extensions()
                        .get::<JwtClaims>()
                        .map(|c| c.email.clone())
                        .unwrap_or_default()
                }),
            )
            .layer(axum::middleware::from_fn_with_state(
                jwt(),
                optional_jwt_auth_middleware,
            ))
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_optional_jwt_inserts_claims_from_valid_token() {
        let token = jwt()
            .create_access_token(Uuid::now_v7(), "ada@example.com", &[])
            .unwrap();

        let response = claims_app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ada@example.com");
    }

    #[tokio::test]
    async fn test_optional_jwt_passes_invalid_token_through() {
        let response = claims_app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::AUTHORIZATION, "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "");
    }
}
