//! Environment-driven configuration shared by the service crates

pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Deployment flavour, read from `APP_ENV`
///
/// Only `production` (any case) selects [`Environment::Production`]; anything
/// else, including an unset variable, runs as development.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        env::var("APP_ENV")
            .map(|value| Self::from_name(&value))
            .unwrap_or_default()
    }

    fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

/// Service name and version reported by `/health`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// [`AppInfo`] of the crate invoking the macro
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_first(&[key])
}

/// Value of the first variable in `keys` that is set.
///
/// The error names every key that was tried.
pub fn env_first(keys: &[&str]) -> Result<String, ConfigError> {
    keys.iter()
        .find_map(|key| env::var(key).ok())
        .ok_or_else(|| ConfigError::MissingEnvVar(keys.join(" or ")))
}

/// Parse `key` when it is set, `default` otherwise.
///
/// A set value that does not parse is an error.
pub fn env_parse_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
        key: key.to_string(),
        details: e.to_string(),
    })
}
