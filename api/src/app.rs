//! Application factory
//!
//! Builds the actix-web application around an [`AppState`]. Public routes
//! (registration, login, token refresh, health) sit next to routes wrapped
//! in the [`BearerAuth`] gate.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;
use ww_core::repositories::RecordStore;
use ww_core::services::PasswordHasher;
use ww_shared::error_codes;

use crate::handlers::error::ApiError;
use crate::middleware::auth::BearerAuth;
use crate::routes::{accounts, auth, health, usertx};
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<S, H>(
    state: web::Data<AppState<S, H>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    let gate = BearerAuth::new(state.tokens.clone());

    App::new()
        .app_data(state)
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check::<S, H>))
        .route("/users/login", web::post().to(auth::login::<S, H>))
        .route("/tokens/refresh", web::post().to(auth::refresh_token::<S, H>))
        .route(
            "/users",
            web::get()
                .to(accounts::list_accounts::<S, H>)
                .wrap(gate.clone()),
        )
        .route(
            "/users/{id}",
            web::get()
                .to(accounts::get_account::<S, H>)
                .wrap(gate.clone()),
        )
        .route("/usertx", web::post().to(usertx::create_account::<S, H>))
        .route(
            "/usertx",
            web::put()
                .to(usertx::update_account::<S, H>)
                .wrap(gate.clone()),
        )
        .route(
            "/usertx/{id}",
            web::get()
                .to(usertx::get_account::<S, H>)
                .wrap(gate.clone()),
        )
        .route(
            "/usertx/{id}",
            web::delete()
                .to(usertx::delete_account::<S, H>)
                .wrap(gate),
        )
        .default_service(web::route().to(not_found))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ww_shared::ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
