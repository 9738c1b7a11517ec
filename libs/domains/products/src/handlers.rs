//! HTTP handlers for Products API
//!
//! Every route expects the API key gate and the JWT middleware to run first;
//! `AuthUser` and `AdminUser` only read the claims those layers leave behind.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AdminUser, AuthUser, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::filter::ProductQuery;
use crate::models::{
    CreateProduct, DataResponse, Product, Rating, Review, ReviewInput, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        add_review,
        edit_review,
        delete_review,
    ),
    components(
        schemas(
            Product, Review, Rating, CreateProduct, UpdateProduct, ReviewInput, ProductQuery
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Reviews", description = "Product review endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/review/{id}",
            post(add_review).put(edit_review).delete(delete_review),
        )
        .with_state(shared_service)
}

/// List products
///
/// `price` and `reviews` take comma-separated `low-high` ranges (`high` may be
/// `*`); a product matches when it falls in any of them. Distinct parameters
/// must all match.
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Matching products", body = DataResponse<Vec<Product>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<DataResponse<Vec<Product>>>> {
    let products = service.list_products(query).await?;
    Ok(Json(DataResponse::new(products)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    security(("api_key" = [], "bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created successfully", body = DataResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AdminUser(admin): AdminUser,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    tracing::info!(product_id = %product.id, admin_id = %admin.id, "Product created by admin");
    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Product found", body = DataResponse<Product>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<DataResponse<Product>>> {
    let product = service.get_product(id).await?;
    Ok(Json(DataResponse::new(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    security(("api_key" = [], "bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated successfully", body = DataResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    _admin: AdminUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<DataResponse<Product>>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(DataResponse::new(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    security(("api_key" = [], "bearer_auth" = [])),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    _admin: AdminUser,
    UuidPath(id): UuidPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Review a product as the calling user
#[utoipa::path(
    post,
    path = "/review/{id}",
    tag = "Reviews",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ReviewInput,
    security(("api_key" = [], "bearer_auth" = [])),
    responses(
        (status = 201, description = "Review added", body = DataResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_review<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<ReviewInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.add_review(id, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

/// Replace the calling user's review
#[utoipa::path(
    put,
    path = "/review/{id}",
    tag = "Reviews",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ReviewInput,
    security(("api_key" = [], "bearer_auth" = [])),
    responses(
        (status = 200, description = "Review updated", body = DataResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn edit_review<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<ReviewInput>,
) -> ProductResult<Json<DataResponse<Product>>> {
    let product = service.edit_review(id, user.id, input).await?;
    Ok(Json(DataResponse::new(product)))
}

/// Remove the calling user's review
#[utoipa::path(
    delete,
    path = "/review/{id}",
    tag = "Reviews",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    security(("api_key" = [], "bearer_auth" = [])),
    responses(
        (status = 200, description = "Review deleted", body = DataResponse<Product>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_review<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<DataResponse<Product>>> {
    let product = service.delete_review(id, user.id).await?;
    Ok(Json(DataResponse::new(product)))
}
