//! Product repository for database operations.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{NewProduct, Product};

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a product and return the stored row.
    ///
    /// The database assigns `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO bramanda.products (name, price, description, image, category, in_stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, price, description, image, category, in_stock, created_at
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.description.as_deref())
        .bind(product.image.as_deref())
        .bind(product.category.as_deref())
        .bind(product.in_stock)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Insert several products in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; nothing is kept then.
    pub async fn create_many(&self, products: &[NewProduct]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for product in products {
            inserted += sqlx::query(
                r"
                INSERT INTO bramanda.products (name, price, description, image, category, in_stock)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(&product.name)
            .bind(product.price)
            .bind(product.description.as_deref())
            .bind(product.image.as_deref())
            .bind(product.category.as_deref())
            .bind(product.in_stock)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// List products that are in stock, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_in_stock(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, description, image, category, in_stock, created_at
            FROM bramanda.products
            WHERE in_stock
            ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, description, image, category, in_stock, created_at
            FROM bramanda.products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Count all products, in stock or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bramanda.products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
