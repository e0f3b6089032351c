//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::AccountId;
use crate::errors::AppError;

/// Authenticated account extracted from the bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentAccount {
    pub id: AccountId,
}

/// JWT authentication middleware.
///
/// Validates the bearer token, coerces its subject into an `AccountId` and
/// injects `CurrentAccount` into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.token_service.validate(token)?;

    // A validly signed token with a non-numeric subject is still not an identity
    let id = claims.sub.parse::<AccountId>().map_err(|_| {
        tracing::warn!(subject = %claims.sub, "Token subject is not an account id");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(CurrentAccount { id });

    Ok(next.run(request).await)
}
