//! Order repository for database operations.

use sqlx::PgPool;
use sqlx::types::Json;

use bramanda_core::{OrderStatus, PaymentStatus};

use super::{RepositoryError, conflict_on_unique};
use crate::models::{NewOrder, Order};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order in its initial (pending) state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO bramanda.orders (
                order_id, customer_name, customer_email, customer_phone, customer_address,
                items, total_amount, payment_method, payment_status, order_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING order_id, customer_name, customer_email, customer_phone, customer_address,
                      items, total_amount, payment_method, payment_status, order_status, created_at
            ",
        )
        .bind(&order.order_id)
        .bind(&order.customer.name)
        .bind(&order.customer.email)
        .bind(&order.customer.phone)
        .bind(&order.customer.address)
        .bind(Json(&order.items))
        .bind(order.total_amount)
        .bind(order.payment_method)
        .bind(PaymentStatus::Pending)
        .bind(OrderStatus::Pending)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "order number"))?;

        Ok(row)
    }

    /// Get an order by its order number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_number(&self, order_id: &str) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(
            r"
            SELECT order_id, customer_name, customer_email, customer_phone, customer_address,
                   items, total_amount, payment_method, payment_status, order_status, created_at
            FROM bramanda.orders
            WHERE order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_newest_first(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, Order>(
            r"
            SELECT order_id, customer_name, customer_email, customer_phone, customer_address,
                   items, total_amount, payment_method, payment_status, order_status, created_at
            FROM bramanda.orders
            ORDER BY created_at DESC, order_id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Mark an order as paid and confirmed.
    ///
    /// Returns `None` when no order has this number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_payment_verified(
        &self,
        order_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(
            r"
            UPDATE bramanda.orders
            SET payment_status = $2, order_status = $3
            WHERE order_id = $1
            RETURNING order_id, customer_name, customer_email, customer_phone, customer_address,
                      items, total_amount, payment_method, payment_status, order_status, created_at
            ",
        )
        .bind(order_id)
        .bind(Order::VERIFIED_PAYMENT_STATUS)
        .bind(Order::VERIFIED_ORDER_STATUS)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Count orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bramanda.orders")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
