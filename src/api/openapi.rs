//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, product_handler};
use crate::domain::{AccountResponse, ProductResponse};
use crate::services::IssuedToken;

/// OpenAPI documentation for the Product API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product API",
        version = "0.1.0",
        description = "Account registration, JWT login and per-account product management"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::get_current_account,
        // Product endpoints
        product_handler::create_product,
        product_handler::list_products,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
    ),
    components(
        schemas(
            AccountResponse,
            ProductResponse,
            IssuedToken,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration, login and profile"),
        (name = "Products", description = "Products owned by the authenticated account")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/v1/login"))
                        .build(),
                ),
            );
        }
    }
}
