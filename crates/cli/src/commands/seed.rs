//! Seed the catalog with the sample products.
//!
//! Inserts the sample catalog only when the products table is empty, so the
//! command is safe to run repeatedly.

use tracing::info;

use bramanda_api::{db, services};

use super::{CommandError, load_config};

/// Seed the sample products into an empty catalog.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or counting/inserting products fails.
pub async fn products() -> Result<(), CommandError> {
    let (config, database_url) = load_config()?;

    let pool = db::connect(&database_url).await?;
    info!("Connected to database");

    match services::seed_durable(&pool, config.db_timeout).await? {
        Some(inserted) => info!(inserted, "Sample products added"),
        None => info!("Catalog already has products; nothing to seed"),
    }

    Ok(())
}
