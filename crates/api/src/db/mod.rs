//! Durable storage in `PostgreSQL`.
//!
//! ## Tables (schema `bramanda`)
//!
//! - `products` - Catalog entries
//! - `subscribers` - Newsletter subscribers (primary key: email)
//! - `orders` - Placed orders (primary key: order number, items as JSONB)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p bramanda-cli -- migrate
//! ```

pub mod orders;
pub mod products;
pub mod subscribers;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use subscribers::SubscriberRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The database did not answer within the configured bound.
    #[error("database call timed out after {0:?}")]
    Timeout(Duration),

    /// Constraint violation (e.g., duplicate order number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a lazily connecting `PostgreSQL` pool.
///
/// No connection is opened here, so the service starts even when the
/// database is down. `timeout` bounds every connection acquisition.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(
    database_url: &secrecy::SecretString,
    timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(0)
        .acquire_timeout(timeout)
        .connect_lazy(database_url.expose_secret())
}

/// Create a `PostgreSQL` pool and wait for the first connection.
///
/// Used by the CLI, where an unreachable database is an error.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn connect(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run a repository call, failing with [`RepositoryError::Timeout`] after `limit`.
///
/// # Errors
///
/// Returns the call's own error, or `Timeout` when it does not finish in time.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| RepositoryError::Timeout(limit))?
}

/// Map unique violations to [`RepositoryError::Conflict`].
fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}
