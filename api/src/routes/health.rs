use std::collections::HashMap;
use std::time::Instant;

use actix_web::{http::StatusCode, web, HttpResponse};
use tracing::warn;
use ww_core::repositories::RecordStore;
use ww_core::services::PasswordHasher;
use ww_shared::{HealthResponse, HealthStatus, ServiceHealth};

use crate::state::AppState;

/// Handler for GET /health
///
/// Pings the record store and reports its pool statistics when available.
/// Responds 503 when the store is unreachable.
pub async fn health_check<S, H>(state: web::Data<AppState<S, H>>) -> HttpResponse
where
    S: RecordStore + 'static,
    H: PasswordHasher,
{
    let ctx = state.request_context();
    let started = Instant::now();

    let database = match ctx.run(state.store.health_check()).await {
        Ok(()) => {
            let mut health = ServiceHealth::healthy(started.elapsed().as_millis() as u64);
            health.message = state.store.statistics();
            health
        }
        Err(e) => {
            warn!(error = %e, "Record store health check failed");
            ServiceHealth::unhealthy(e.to_string())
        }
    };

    let mut services = HashMap::new();
    services.insert("database".to_string(), database);
    let health = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));

    let status = match health.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };
    HttpResponse::build(status).json(health)
}
