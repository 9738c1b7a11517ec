use mongodb::Client;
use tracing::info;

use super::{MongoConfig, check_health};
use crate::common::{DatabaseError, DatabaseResult, retry};

/// Build a client from `config` and make sure the server answers a ping.
///
/// The driver connects lazily, so the ping is what surfaces an unreachable
/// server here instead of on the first request.
pub async fn connect(config: &MongoConfig) -> DatabaseResult<Client> {
    let client = Client::with_options(config.client_options().await?)?;

    check_health(&client.database(config.database()))
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    Ok(client)
}

/// [`connect`], retried on the schedule from [`MongoConfig::backoff`].
pub async fn connect_with_retry(config: &MongoConfig) -> DatabaseResult<Client> {
    info!(
        database = config.database(),
        retries = config.connect_retries,
        "Connecting to MongoDB"
    );

    let client = retry(&config.backoff(), || connect(config)).await?;

    info!(database = config.database(), "Connected to MongoDB");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let config = MongoConfig::new("not-a-mongodb-url", "shop");
        let result = connect(&config).await;
        assert!(matches!(result, Err(DatabaseError::Mongo(_))));
    }

    #[tokio::test]
    async fn test_connect_with_retry_gives_up() {
        let mut config = MongoConfig::new("mongodb://127.0.0.1:1", "shop");
        config.server_selection_timeout = Duration::from_millis(50);
        config.connect_retries = 1;
        config.retry_delay = Duration::from_millis(1);

        let result = connect_with_retry(&config).await;
        assert!(matches!(result, Err(DatabaseError::ConnectionFailed(_))));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_local() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        assert!(connect(&MongoConfig::new(url, "test")).await.is_ok());
    }
}
