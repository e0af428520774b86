//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use thiserror::Error;

use bramanda_api::config::{ApiConfig, ConfigError};
use bramanda_api::db::RepositoryError;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("BRAMANDA_DATABASE_URL (or DATABASE_URL) is not set")]
    MissingDatabaseUrl,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Seeding failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Load the API configuration and require a database URL.
fn load_config() -> Result<(ApiConfig, SecretString), CommandError> {
    let config = ApiConfig::from_env()?;
    let url = config
        .database_url
        .clone()
        .ok_or(CommandError::MissingDatabaseUrl)?;
    Ok((config, url))
}
