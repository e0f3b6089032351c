//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentAccount;
use crate::api::AppState;
use crate::domain::AccountResponse;
use crate::errors::AppResult;
use crate::services::IssuedToken;

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Unique username
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// Unique email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
}

/// Account login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Account email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Routes for the authenticated account itself
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/user", get(get_current_account))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered successfully", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .account_service
        .register(payload.username, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = IssuedToken),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<IssuedToken>> {
    let token = state
        .account_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Get the authenticated account's profile
#[utoipa::path(
    get,
    path = "/api/v1/user",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account profile", body = AccountResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_current_account(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
) -> AppResult<Json<AccountResponse>> {
    let account = state.account_service.get_profile(current.id).await?;
    Ok(Json(AccountResponse::from(account)))
}
