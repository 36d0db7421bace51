//! Key/value sources for the site addresses
//!
//! The base URL and search URL come from outside the settings file. `EnvSource`
//! reads them from the process environment after loading an optional `.env`.

use crate::ConfigError;
use std::collections::HashMap;

/// Environment key for the listing link prefix
pub const BASE_URL_KEY: &str = "BASE_URL";

/// Environment key for the first search results page
pub const SEARCH_URL_KEY: &str = "SEARCH_URL";

/// A source that can resolve configuration keys
pub trait ConfigSource {
    /// Returns the value for `key`, or `ConfigError::MissingKey` if unset or empty
    fn resolve(&self, key: &str) -> Result<String, ConfigError>;
}

/// Reads keys from the process environment, loading `.env` first
#[derive(Debug, Default)]
pub struct EnvSource;

impl EnvSource {
    pub fn new() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self
    }
}

impl ConfigSource for EnvSource {
    fn resolve(&self, key: &str) -> Result<String, ConfigError> {
        match std::env::var(key) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(ConfigError::MissingKey(key.to_string())),
        }
    }
}

/// In-memory source
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigSource for MapSource {
    fn resolve(&self, key: &str) -> Result<String, ConfigError> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }
}
