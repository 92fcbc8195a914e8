//! Runtime configuration for the storage gateway.
//!
//! # Examples
//!
//! ```
//! use task_item_store::config::StoreConfig;
//!
//! let config = StoreConfig::new("postgres://localhost/task_items");
//! assert_eq!(config.max_pool_size, StoreConfig::DEFAULT_POOL_SIZE);
//! ```

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable overriding the maximum pool size.
pub const POOL_SIZE_ENV: &str = "TASK_ITEM_POOL_SIZE";
/// Environment variable overriding the connection checkout timeout, in seconds.
pub const POOL_TIMEOUT_ENV: &str = "TASK_ITEM_POOL_TIMEOUT_SECS";

/// Connection settings for the relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_pool_size: u32,
    /// How long a unit of work waits for a pooled connection.
    pub connection_timeout: Duration,
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset.
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    /// A variable holds a value that does not parse.
    #[error("environment variable {name} has invalid value '{value}'")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
}

impl StoreConfig {
    /// Default maximum pool size.
    pub const DEFAULT_POOL_SIZE: u32 = 10;
    /// Default connection checkout timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: Self::DEFAULT_POOL_SIZE,
            connection_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Sets the connection checkout timeout.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is unset and
    /// [`ConfigError::Invalid`] when an override does not parse as a positive
    /// integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps variable names
    /// to values.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_ENV))?;
        let mut config = Self::new(database_url);

        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            config.max_pool_size = parse_positive(POOL_SIZE_ENV, &raw)?;
        }
        if let Some(raw) = lookup(POOL_TIMEOUT_ENV) {
            let seconds: u32 = parse_positive(POOL_TIMEOUT_ENV, &raw)?;
            config.connection_timeout = Duration::from_secs(u64::from(seconds));
        }
        Ok(config)
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ConfigError::Invalid {
            name,
            value: raw.to_owned(),
        })
}
