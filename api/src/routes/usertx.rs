//! Transactional account routes
//!
//! Each handler drives one call of the account engine, so the account, its
//! profile and its role are always written or removed together.

use actix_web::{web, HttpResponse};
use tracing::info;
use uuid::Uuid;
use validator::Validate;
use ww_core::domain::value_objects::NewRole;
use ww_core::repositories::RecordStore;
use ww_core::services::{
    authorize_account, authorize_role_change, require_admin, AccountTransactions, PasswordHasher,
};

use crate::dto::account::{AccountTxResponse, CreateAccountRequest, UpdateAccountRequest};
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

/// Handler for POST /usertx
///
/// Public registration. The new account always starts as a standard user.
///
/// ## Errors
/// - 400 Bad Request: Invalid body
/// - 409 Conflict: Email or username already taken
pub async fn create_account<S, H>(
    state: web::Data<AppState<S, H>>,
    body: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    let request = body.into_inner();
    request.validate()?;

    let password_hash = state.auth.hash_password(request.password.clone()).await?;
    let (account, profile) = request.into_params(password_hash);

    let ctx = state.request_context();
    let result = state
        .accounts
        .create_with_profile_and_role(&ctx, account, profile, NewRole::default())
        .await?;

    Ok(HttpResponse::Created().json(AccountTxResponse::from(result)))
}

/// Handler for GET /usertx/{id}
pub async fn get_account<S, H>(
    state: web::Data<AppState<S, H>>,
    session: AuthSession,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    let account_id = path.into_inner();
    authorize_account(&session, account_id)?;

    let ctx = state.request_context();
    let result = state.accounts.get_with_profile_and_role(&ctx, account_id).await?;

    Ok(HttpResponse::Ok().json(AccountTxResponse::from(result)))
}

/// Handler for PUT /usertx
///
/// Self or admin. Only administrators may change a role. A new password is
/// hashed before it reaches the engine.
pub async fn update_account<S, H>(
    state: web::Data<AppState<S, H>>,
    session: AuthSession,
    body: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    let request = body.into_inner();
    request.validate()?;

    let account_id = request.id;
    authorize_account(&session, account_id)?;
    authorize_role_change(&session, request.role_id)?;

    let password_hash = match request.password.clone() {
        Some(password) => Some(state.auth.hash_password(password).await?),
        None => None,
    };
    let (account, profile, role) = request.into_changes(password_hash);

    let ctx = state.request_context();
    let result = state
        .accounts
        .update_with_profile_and_role(&ctx, account_id, account, profile, role)
        .await?;

    Ok(HttpResponse::Ok().json(AccountTxResponse::from(result)))
}

/// Handler for DELETE /usertx/{id}
///
/// Admin only. Responds with the records as they were before deletion.
pub async fn delete_account<S, H>(
    state: web::Data<AppState<S, H>>,
    session: AuthSession,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    require_admin(&session)?;
    let account_id = path.into_inner();

    let ctx = state.request_context();
    let result = state.accounts.delete_with_profile_and_role(&ctx, account_id).await?;

    info!(account_id = %account_id, deleted_by = %session.account_id, "Account deleted");
    Ok(HttpResponse::Ok().json(AccountTxResponse::from(result)))
}
