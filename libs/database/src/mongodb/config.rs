use mongodb::options::ClientOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_parse_or_default};

use crate::common::{Backoff, DatabaseResult};

/// Connection settings for the product store
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017", "shop").with_app_name("products-api");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// `mongodb://[user:pass@]host[:port][/db][?options]`
    pub url: String,
    pub database: String,
    /// Reported to the server and visible in its logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
    /// Extra connection attempts at startup
    pub connect_retries: u32,
    /// Delay before the first extra attempt, doubled for each one after
    pub retry_delay: Duration,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout: Duration::from_secs(10),
            server_selection_timeout: Duration::from_secs(30),
            connect_retries: 3,
            retry_delay: Duration::from_millis(100),
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Startup retry schedule
    pub fn backoff(&self) -> Backoff {
        Backoff::new(self.connect_retries, self.retry_delay)
    }

    /// Driver options parsed from the url with pool and timeout settings applied
    pub async fn client_options(&self) -> DatabaseResult<ClientOptions> {
        let mut options = ClientOptions::parse(&self.url).await?;
        options.app_name = self.app_name.clone();
        options.max_pool_size = Some(self.max_pool_size);
        options.min_pool_size = Some(self.min_pool_size);
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.server_selection_timeout);
        Ok(options)
    }
}

/// `MONGODB_URL`/`MONGO_URL` and `MONGODB_DATABASE`/`MONGO_DATABASE` are
/// required. Optional: `MONGODB_APP_NAME`, `MONGODB_MAX_POOL_SIZE`,
/// `MONGODB_MIN_POOL_SIZE`, `MONGODB_CONNECT_TIMEOUT_SECS`,
/// `MONGODB_SERVER_SELECTION_TIMEOUT_SECS`, `MONGODB_CONNECT_RETRIES` and
/// `MONGODB_RETRY_DELAY_MS`.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new(
            env_first(&["MONGODB_URL", "MONGO_URL"])?,
            env_first(&["MONGODB_DATABASE", "MONGO_DATABASE"])?,
        );

        let secs = |key: &str, default: Duration| {
            env_parse_or_default(key, default.as_secs()).map(Duration::from_secs)
        };

        Ok(Self {
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or_default("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or_default("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout: secs("MONGODB_CONNECT_TIMEOUT_SECS", defaults.connect_timeout)?,
            server_selection_timeout: secs(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout,
            )?,
            connect_retries: env_parse_or_default(
                "MONGODB_CONNECT_RETRIES",
                defaults.connect_retries,
            )?,
            retry_delay: Duration::from_millis(env_parse_or_default(
                "MONGODB_RETRY_DELAY_MS",
                defaults.retry_delay.as_millis() as u64,
            )?),
            ..defaults
        })
    }
}
