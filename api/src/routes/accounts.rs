use actix_web::{web, HttpResponse};
use uuid::Uuid;
use ww_core::repositories::RecordStore;
use ww_core::services::{authorize_account, require_admin, PasswordHasher};
use validator::Validate;
use ww_shared::{PaginatedResponse, Pagination};

use crate::dto::account::{AccountResponse, ListAccountsQuery};
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

/// Handler for GET /users/{id}
///
/// Returns the account alone, without profile or role. Allowed for the
/// account itself or an administrator.
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
    let account = ctx.run(state.store.get_account(account_id)).await?;

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

/// Handler for GET /users?page_id=&page_size=
///
/// Admin only. Accounts are ordered by id.
pub async fn list_accounts<S, H>(
    state: web::Data<AppState<S, H>>,
    session: AuthSession,
    query: web::Query<ListAccountsQuery>,
) -> Result<HttpResponse, ApiError>
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    require_admin(&session)?;

    let query = query.into_inner();
    query.validate()?;
    let pagination = Pagination::from(query);

    let ctx = state.request_context();
    let accounts = ctx
        .run(state.store.list_accounts(pagination.limit(), pagination.offset()))
        .await?;

    let page = PaginatedResponse::new(accounts, pagination).map(AccountResponse::from);
    Ok(HttpResponse::Ok().json(page))
}
