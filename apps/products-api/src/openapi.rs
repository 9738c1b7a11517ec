//! OpenAPI documentation configuration

use axum_helpers::API_KEY_HEADER;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalog with user reviews and ratings",
        license(name = "MIT")
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/product", api = domain_products::ApiDoc)
    ),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    modifiers(&SecuritySchemes)
)]
pub struct ApiDoc;

/// Registers the `api_key` and `bearer_auth` schemes referenced by the paths
struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
