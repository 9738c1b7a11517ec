//! Shared handler state

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub db: Database,
    pub jwt: JwtAuth,
}

impl AppState {
    /// Connect to MongoDB (retrying on the configured schedule) and build the state
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let mongo_client = database::mongodb::connect_with_retry(&config.mongodb).await?;

        Ok(Self {
            db: mongo_client.database(config.mongodb.database()),
            jwt: JwtAuth::new(&config.jwt),
            mongo_client,
            config,
        })
    }
}
