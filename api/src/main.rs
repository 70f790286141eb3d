use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use ww_api::{create_app, telemetry::init_tracing, AppState};
use ww_core::services::{AuthServiceConfig, LocalTokenMaker, TokenMaker};
use ww_infra::{BcryptPasswordHasher, DatabasePool, MySqlRecordStore};
use ww_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.environment);

    info!(environment = %config.environment, "Starting WhaleWake API server");

    // A missing or malformed key aborts startup
    let tokens: Arc<dyn TokenMaker> = Arc::new(
        LocalTokenMaker::from_config(&config.token).context("Failed to create token maker")?,
    );

    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;
    let store = Arc::new(MySqlRecordStore::new(pool));
    let hasher = Arc::new(BcryptPasswordHasher::default());

    let state = web::Data::new(AppState::new(
        store,
        hasher,
        tokens,
        AuthServiceConfig::try_from(&config.token).context("Invalid access token duration")?,
        Duration::from_secs(config.server.request_timeout),
    ));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    info!("Server stopped");
    Ok(())
}
