//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults describe a single local
//! deployment talking to `MongoDB` on localhost.
//!
//! - `STOCKROOM_MONGODB_URI` - Store connection string (default: `mongodb://localhost:27017`)
//! - `STOCKROOM_DATABASE` - Database name (default: `stockroom`)
//! - `STOCKROOM_STORE` - Store backend, `mongodb` or `memory` (default: `mongodb`)
//! - `STOCKROOM_STORE_TIMEOUT_SECS` - Deadline for every store operation (default: 5)
//! - `STOCKROOM_HOST` - Bind address (default: 0.0.0.0)
//! - `STOCKROOM_PORT` - Listen port (default: 8080)
//! - `STOCKROOM_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "stockroom";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_STORE_TIMEOUT_SECS: &str = "5";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which [`crate::db::DocumentStore`] backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}' (expected mongodb or memory)")),
        }
    }
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `MongoDB` connection URI (may contain credentials)
    pub mongodb_uri: SecretString,
    /// Database holding the four collections
    pub database: String,
    /// Store backend
    pub store: StoreBackend,
    /// Deadline applied to every store operation
    pub store_timeout: Duration,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Emit logs as JSON
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let mongodb_uri = SecretString::from(get("STOCKROOM_MONGODB_URI", DEFAULT_MONGODB_URI));
        let database = get("STOCKROOM_DATABASE", DEFAULT_DATABASE);
        if database.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STOCKROOM_DATABASE".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let store = parse_var("STOCKROOM_STORE", &get("STOCKROOM_STORE", "mongodb"))?;
        let timeout_secs: u64 = parse_var(
            "STOCKROOM_STORE_TIMEOUT_SECS",
            &get("STOCKROOM_STORE_TIMEOUT_SECS", DEFAULT_STORE_TIMEOUT_SECS),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOCKROOM_STORE_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let host = parse_var("STOCKROOM_HOST", &get("STOCKROOM_HOST", DEFAULT_HOST))?;
        let port = parse_var("STOCKROOM_PORT", &get("STOCKROOM_PORT", DEFAULT_PORT))?;

        Ok(Self {
            mongodb_uri,
            database,
            store,
            store_timeout: Duration::from_secs(timeout_secs),
            host,
            port,
            log_json: lookup("STOCKROOM_LOG_JSON").is_some(),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ApiConfig {
    /// The configuration produced by an empty environment, with the
    /// in-memory store.
    fn default() -> Self {
        Self {
            mongodb_uri: SecretString::from(DEFAULT_MONGODB_URI),
            database: DEFAULT_DATABASE.to_owned(),
            store: StoreBackend::Memory,
            store_timeout: Duration::from_secs(5),
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
