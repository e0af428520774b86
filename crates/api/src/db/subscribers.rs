//! Subscriber repository for database operations.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{NewSubscriber, Subscriber};

/// Repository for newsletter subscriber database operations.
pub struct SubscriberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new subscriber repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a subscriber unless the email is already subscribed.
    ///
    /// Returns the stored subscriber and whether it was created by this call.
    /// An existing row is returned untouched (its name is not updated).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn upsert(
        &self,
        subscriber: &NewSubscriber,
    ) -> Result<(Subscriber, bool), RepositoryError> {
        let inserted = sqlx::query_as::<_, Subscriber>(
            r"
            INSERT INTO bramanda.subscribers (email, name)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING email, name, created_at
            ",
        )
        .bind(&subscriber.email)
        .bind(subscriber.name.as_deref())
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok((row, true));
        }

        let existing = self
            .get_by_email(&subscriber.email)
            .await?
            .ok_or_else(|| {
                // Conflict reported but the row is gone: deleted concurrently.
                RepositoryError::Conflict(format!(
                    "subscriber {} vanished during upsert",
                    subscriber.email
                ))
            })?;

        Ok((existing, false))
    }

    /// Get a subscriber by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Subscriber>, RepositoryError> {
        let row = sqlx::query_as::<_, Subscriber>(
            r"
            SELECT email, name, created_at
            FROM bramanda.subscribers
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// List all subscribers, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let rows = sqlx::query_as::<_, Subscriber>(
            r"
            SELECT email, name, created_at
            FROM bramanda.subscribers
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Count subscribers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bramanda.subscribers")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
