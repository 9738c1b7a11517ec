//! Configuration for Products API

use axum_helpers::{ApiKeyConfig, JwtConfig};
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    pub api_key: ApiKeyConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            api_key: ApiKeyConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "products-api-config-secret-32-chars!!";

    fn vars(api_key: Option<&'static str>) -> [(&'static str, Option<&'static str>); 5] {
        [
            ("MONGODB_URL", Some("mongodb://localhost:27017")),
            ("MONGODB_DATABASE", Some("shop")),
            ("JWT_SECRET", Some(SECRET)),
            ("API_KEY", api_key),
            ("PORT", Some("3003")),
        ]
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(vars(Some("shop-key")), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "products_api");
            assert_eq!(config.server.port, 3003);
            assert_eq!(config.mongodb.database(), "shop");
            assert!(config.api_key.matches("shop-key"));
        });
    }

    #[test]
    fn test_config_requires_api_key() {
        temp_env::with_vars(vars(None), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("API_KEY"));
        });
    }
}
