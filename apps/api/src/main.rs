//! Kontora API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod state;

use kontora_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let pool = api_services::connect_and_migrate(
        config.database_url.as_str(),
        config.database_max_connections,
    )
    .await?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let seed = api_services::load_catalog_seed(config.catalog_seed_path.as_deref()).await?;
    let app_state = api_services::build_app_state(pool, seed);
    api_services::seed_configured_clients(
        &app_state.catalog_service,
        config.seed_client_ids.as_slice(),
    )
    .await?;

    let app = api_router::build_router(app_state, config.frontend_url.as_str())?;
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(%address, "kontora api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))
}
