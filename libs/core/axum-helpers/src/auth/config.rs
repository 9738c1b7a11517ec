//! Auth configuration, loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_required};

const MIN_SECRET_LEN: usize = 32;

/// JWT signing configuration.
///
/// Environment:
/// - `JWT_SECRET` (required, at least 32 characters)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                    MIN_SECRET_LEN,
                    secret.len()
                ),
            });
        }
        Ok(Self { secret })
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::new(env_required("JWT_SECRET")?)
    }
}

/// Shared API key expected in the `apikey` header of every API request.
///
/// Environment:
/// - `API_KEY` (required, non-empty)
#[derive(Clone, Debug)]
pub struct ApiKeyConfig {
    pub key: String,
}

impl ApiKeyConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        !self.key.is_empty() && self.key == candidate
    }
}

impl FromEnv for ApiKeyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let key = env_required("API_KEY")?;
        if key.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "API_KEY".to_string(),
                details: "must not be empty".to_string(),
            });
        }
        Ok(Self { key })
    }
}
