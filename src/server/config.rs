//! Environment-based server configuration.

use crate::server::error::config::ConfigError;

/// Capacity of the change feed used when `CHANGE_FEED_CAPACITY` is not set.
pub const DEFAULT_CHANGE_FEED_CAPACITY: usize = 256;

/// Server configuration read from the environment.
pub struct Config {
    /// Connection URL of the relational database.
    pub database_url: String,
    /// Connection URL of the Valkey/Redis instance backing the session store.
    pub valkey_url: String,
    /// Number of change events buffered per subscriber before it lags.
    pub change_feed_capacity: usize,
}

impl Config {
    /// Reads the configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables are present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` or `VALKEY_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - `CHANGE_FEED_CAPACITY` is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let change_feed_capacity = match lookup("CHANGE_FEED_CAPACITY") {
            None => DEFAULT_CHANGE_FEED_CAPACITY,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                Ok(_) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "CHANGE_FEED_CAPACITY".to_string(),
                        reason: "must be greater than 0".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "CHANGE_FEED_CAPACITY".to_string(),
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            change_feed_capacity,
        })
    }
}
