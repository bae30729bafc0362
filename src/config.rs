//! Runtime configuration read from environment variables.

use crate::volunteering::adapters::postgres::VolunteeringPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::time::Duration;
use thiserror::Error;

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Default time to wait for a pooled connection, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("{name} has invalid value {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
    },

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl TryFrom<&str> for LogFormat {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                value: value.to_owned(),
            }),
        }
    }
}

/// Storage and logging configuration.
///
/// | Env Var                         | Default  |
/// |---------------------------------|----------|
/// | `DATABASE_URL`                  | required |
/// | `DATABASE_MAX_CONNECTIONS`      | `8`      |
/// | `DATABASE_CONNECT_TIMEOUT_SECS` | `30`     |
/// | `LOG_FORMAT`                    | `pretty` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Time to wait for a pooled connection.
    pub connect_timeout: Duration,
    /// Log output format.
    pub log_format: LogFormat,
}

impl StoreConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a numeric
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a numeric
    /// variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: max_connections.to_string(),
            });
        }
        let timeout_secs = parse_or(
            &lookup,
            "DATABASE_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;
        let log_format = lookup("LOG_FORMAT")
            .map_or(Ok(LogFormat::default()), |value| {
                LogFormat::try_from(value.as_str())
            })?;

        Ok(Self {
            database_url,
            max_connections,
            connect_timeout: Duration::from_secs(timeout_secs),
            log_format,
        })
    }

    /// Builds the r2d2 connection pool described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when no connection can be established
    /// within the configured timeout.
    pub fn build_pool(&self) -> Result<VolunteeringPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.database_url);
        Ok(Pool::builder()
            .max_size(self.max_connections)
            .connection_timeout(self.connect_timeout)
            .build(manager)?)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
