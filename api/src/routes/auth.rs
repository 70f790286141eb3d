use actix_web::{web, HttpResponse};
use validator::Validate;
use ww_core::repositories::RecordStore;
use ww_core::services::PasswordHasher;

use crate::dto::account::AccountResponse;
use crate::dto::auth::{LoginRequest, LoginResponse, RefreshTokenRequest, TokenResponse};
use crate::handlers::error::ApiError;
use crate::state::AppState;

/// Handler for POST /users/login
///
/// # Request Body
///
/// ```json
/// {
///     "email": "orca@whalewake.test",
///     "password": "correct-horse"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid body
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
pub async fn login<S, H>(
    state: web::Data<AppState<S, H>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    let request = body.into_inner();
    request.validate()?;

    let ctx = state.request_context();
    let outcome = state.auth.login(&ctx, &request.email, request.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: outcome.access_token,
        access_token_expires_at: outcome.claim.expires_at,
        user: AccountResponse::from(outcome.account),
    }))
}

/// Handler for POST /tokens/refresh
///
/// Exchanges a token that is still valid for a new one with the configured
/// refresh lifetime. Expired tokens cannot be refreshed.
pub async fn refresh_token<S, H>(
    state: web::Data<AppState<S, H>>,
    body: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    let request = body.into_inner();
    request.validate()?;

    let (access_token, claim) = state.auth.refresh(&request.token)?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        access_token_expires_at: claim.expires_at,
    }))
}
