//! Products API: catalog, reviews and rating filters over MongoDB

use axum_helpers::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::connect(config).await?;
    api::init_indexes(&state).await?;

    let app = create_router::<openapi::ApiDoc>(api::routes(&state))
        .await?
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    let server = state.config.server.clone();
    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        address = %server.address(),
        "Starting server"
    );

    let client = state.mongo_client.clone();
    create_production_app(app, &server, server.shutdown_timeout, async move {
        client.shutdown().await;
        info!("MongoDB connections closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {e}"))?;

    info!("Shutdown complete");
    Ok(())
}
