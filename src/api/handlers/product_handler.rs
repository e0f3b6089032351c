//! Product handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentAccount;
use crate::api::AppState;
use crate::domain::{NewProduct, ProductId, ProductPatch, ProductResponse};
use crate::errors::AppResult;

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    /// Product name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "widget")]
    pub name: String,
    /// Optional description; an empty string is stored as absent
    #[schema(example = "A very useful widget")]
    pub description: Option<String>,
    /// Unit price, strictly positive
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    #[schema(example = 9.99)]
    pub price: f64,
}

/// Partial product update. Omitted, empty or zero fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "gadget")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 19.99)]
    pub price: Option<f64>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a product owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_product(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = state
        .product_service
        .create(
            current.id,
            NewProduct::new(payload.name, payload.description, payload.price),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// List the caller's products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Products owned by the caller", body = Vec<ProductResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_products(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.product_service.list_by_owner(current.id).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.product_service.get(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Update a product (owner only)
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Not the owner"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = state
        .product_service
        .update(id, current.id, payload.into())
        .await?;

    Ok(Json(ProductResponse::from(product)))
}

/// Delete a product (owner only)
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Not the owner"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> AppResult<StatusCode> {
    state.product_service.delete(id, current.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
