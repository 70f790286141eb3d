//! # WhaleWake API
//!
//! actix-web surface of the account service: the bearer-token gate, the
//! account and session routes, and the error mapping shared by both.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use state::AppState;
