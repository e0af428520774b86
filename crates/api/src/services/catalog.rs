//! Sample catalog seeding.
//!
//! On startup an empty durable catalog receives the four sample products.
//! When the durable store is unreachable or seeding fails, the in-memory
//! fallback gets the three-product sample set with ids `1`, `2` and `3`.

use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::db::{self, ProductRepository, RepositoryError};
use crate::models::{NewProduct, Product};
use crate::store::{Storage, StorageSelector};

/// Number of sample products served by the fallback store.
const FALLBACK_SAMPLE_SIZE: usize = 3;

/// What seeding did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Sample products were inserted into the empty durable catalog.
    Seeded(u64),
    /// The durable catalog already had products; nothing was inserted.
    AlreadyPopulated,
    /// The fallback store was loaded with this many sample products.
    Fallback(usize),
}

/// The sample catalog.
#[must_use]
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        sample(
            "Minimalist Watch",
            Decimal::new(19999, 2),
            "Elegant black and white minimalist watch with leather strap",
            "https://images.unsplash.com/photo-1523170335258-f5ed11844a49?w=400",
            "Accessories",
        ),
        sample(
            "Classic Sunglasses",
            Decimal::new(14999, 2),
            "Premium black frame sunglasses with UV protection",
            "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=400",
            "Accessories",
        ),
        sample(
            "Designer Handbag",
            Decimal::new(29999, 2),
            "Luxurious black leather handbag with silver accents",
            "https://images.unsplash.com/photo-1584917865442-de89df76afd3?w=400",
            "Bags",
        ),
        sample(
            "Wireless Earbuds",
            Decimal::new(17999, 2),
            "High-quality white wireless earbuds with noise cancellation",
            "https://images.unsplash.com/photo-1590658165737-15a047b8b5e3?w=400",
            "Electronics",
        ),
    ]
}

fn sample(name: &str, price: Decimal, description: &str, image: &str, category: &str) -> NewProduct {
    NewProduct {
        description: Some(description.to_string()),
        image: Some(image.to_string()),
        category: Some(category.to_string()),
        ..NewProduct::new(name, price)
    }
}

/// Sample products for the fallback store, numbered from `1`.
#[must_use]
pub fn fallback_products() -> Vec<Product> {
    let now = Utc::now();
    sample_products()
        .into_iter()
        .take(FALLBACK_SAMPLE_SIZE)
        .enumerate()
        .map(|(i, product)| product.into_product((i + 1).to_string(), now))
        .collect()
}

/// Insert the sample catalog if the durable catalog is empty.
///
/// Returns `None` when products already exist.
///
/// # Errors
///
/// Returns a `RepositoryError` if counting or inserting fails or times out.
pub async fn seed_durable(pool: &PgPool, timeout: Duration) -> Result<Option<u64>, RepositoryError> {
    let repo = ProductRepository::new(pool);

    if db::with_timeout(timeout, repo.count()).await? > 0 {
        return Ok(None);
    }

    let inserted = db::with_timeout(timeout, repo.create_many(&sample_products())).await?;
    Ok(Some(inserted))
}

/// Seed whichever store is active.
pub async fn seed_catalog(selector: &StorageSelector) -> SeedOutcome {
    if let Storage::Durable { pool, timeout } = selector.select().await {
        match seed_durable(pool, timeout).await {
            Ok(Some(inserted)) => {
                tracing::info!(inserted, "Sample products added to database");
                return SeedOutcome::Seeded(inserted);
            }
            Ok(None) => {
                tracing::debug!("Catalog already populated; skipping seed");
                return SeedOutcome::AlreadyPopulated;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not add sample products to database");
            }
        }
    }

    let products = fallback_products();
    let count = products.len();
    selector.memory().replace_products(products).await;
    tracing::info!(count, "Sample products loaded into in-memory fallback");
    SeedOutcome::Fallback(count)
}
