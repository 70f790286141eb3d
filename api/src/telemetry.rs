//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;
use ww_shared::Environment;

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise the environment's default level is
/// used. sqlx statement logs arrive through the `log` bridge.
pub fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
