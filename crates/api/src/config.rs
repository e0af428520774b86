//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional. Without a database URL the service runs in
//! fallback-only mode and keeps everything in memory.
//!
//! - `BRAMANDA_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `BRAMANDA_HOST` - Bind address (default: 0.0.0.0)
//! - `BRAMANDA_PORT` - Listen port (falls back to `PORT`, default: 5000)
//! - `BRAMANDA_ENV` - Deployment environment name (default: development)
//! - `BRAMANDA_CORS_ORIGINS` - Comma-separated list of allowed browser origins
//! - `BRAMANDA_DB_TIMEOUT_MS` - Upper bound for the reachability check and each
//!   durable-store call (default: 2000)
//! - `BRAMANDA_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "5000";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_DB_TIMEOUT_MS: &str = "2000";
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://bramandaofficial.github.io",
    "http://localhost:3000",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment name
    pub environment: String,
    /// Browser origins allowed by CORS
    pub cors_origins: Vec<String>,
    /// Bound for durable-store checks and calls
    pub db_timeout: Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("BRAMANDA_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.trim().is_empty())
            .map(SecretString::from);

        let host = parse_var(&lookup, "BRAMANDA_HOST", DEFAULT_HOST)?;
        let port = match lookup("BRAMANDA_PORT") {
            Some(_) => parse_var(&lookup, "BRAMANDA_PORT", DEFAULT_PORT)?,
            None => parse_var(&lookup, "PORT", DEFAULT_PORT)?,
        };

        let environment =
            lookup("BRAMANDA_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let cors_origins = lookup("BRAMANDA_CORS_ORIGINS").map_or_else(
            || DEFAULT_CORS_ORIGINS.iter().map(ToString::to_string).collect(),
            |raw| split_list(&raw),
        );

        let timeout_ms: u64 = parse_var(&lookup, "BRAMANDA_DB_TIMEOUT_MS", DEFAULT_DB_TIMEOUT_MS)?;

        let log_format = match lookup("BRAMANDA_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "BRAMANDA_LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            database_url,
            host,
            port,
            environment,
            cors_origins,
            db_timeout: Duration::from_millis(timeout_ms),
            log_format,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, using `default` when it is unset.
fn parse_var<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Split a comma-separated list, dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
