//! Entity repositories that dispatch to the active storage path.
//!
//! Each repository exposes the same operations on both paths and returns
//! the same model types, so results are indistinguishable to callers.

use tracing::instrument;

use super::Storage;
use crate::db::{self, OrderRepository, ProductRepository, RepositoryError, SubscriberRepository};
use crate::models::{NewOrder, NewProduct, NewSubscriber, Order, Product, Subscriber};

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

fn usize_to_count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

// =============================================================================
// Products
// =============================================================================

/// Product operations on one storage path.
#[derive(Debug, Clone, Copy)]
pub struct ProductStore<'a> {
    storage: Storage<'a>,
}

impl<'a> ProductStore<'a> {
    pub(super) const fn new(storage: Storage<'a>) -> Self {
        Self { storage }
    }

    /// Store a new product and return it with its assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable insert fails or times out.
    #[instrument(skip(self, product), fields(mode = ?self.storage.mode(), name = %product.name))]
    pub async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, ProductRepository::new(pool).create(&product)).await
            }
            Storage::Memory(memory) => Ok(memory.create_product(product).await),
        }
    }

    /// List the catalog.
    ///
    /// The durable path returns in-stock products only; the fallback path
    /// returns every product it holds.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, ProductRepository::new(pool).list_in_stock()).await
            }
            Storage::Memory(memory) => Ok(memory.list_products().await),
        }
    }

    /// Find a product by id.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn find_by_key(&self, id: &str) -> Result<Option<Product>, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, ProductRepository::new(pool).get_by_id(id)).await
            }
            Storage::Memory(memory) => Ok(memory.find_product(id).await),
        }
    }

    /// Count stored products.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, ProductRepository::new(pool).count())
                    .await
                    .map(to_count)
            }
            Storage::Memory(memory) => Ok(usize_to_count(memory.product_count().await)),
        }
    }
}

// =============================================================================
// Subscribers
// =============================================================================

/// Subscriber operations on one storage path.
#[derive(Debug, Clone, Copy)]
pub struct SubscriberStore<'a> {
    storage: Storage<'a>,
}

impl<'a> SubscriberStore<'a> {
    pub(super) const fn new(storage: Storage<'a>) -> Self {
        Self { storage }
    }

    /// Upsert by email: create the subscriber unless the email exists.
    ///
    /// Returns the stored subscriber and whether this call created it.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable upsert fails or times out.
    #[instrument(skip(self, subscriber), fields(mode = ?self.storage.mode()))]
    pub async fn create(
        &self,
        subscriber: NewSubscriber,
    ) -> Result<(Subscriber, bool), RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, SubscriberRepository::new(pool).upsert(&subscriber))
                    .await
            }
            Storage::Memory(memory) => Ok(memory.upsert_subscriber(subscriber).await),
        }
    }

    /// List subscribers, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn list(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, SubscriberRepository::new(pool).list()).await
            }
            Storage::Memory(memory) => Ok(memory.list_subscribers().await),
        }
    }

    /// Find a subscriber by email.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn find_by_key(&self, email: &str) -> Result<Option<Subscriber>, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, SubscriberRepository::new(pool).get_by_email(email))
                    .await
            }
            Storage::Memory(memory) => Ok(memory.find_subscriber(email).await),
        }
    }

    /// Count subscribers.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, SubscriberRepository::new(pool).count())
                    .await
                    .map(to_count)
            }
            Storage::Memory(memory) => Ok(usize_to_count(memory.subscriber_count().await)),
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order operations on one storage path.
#[derive(Debug, Clone, Copy)]
pub struct OrderStore<'a> {
    storage: Storage<'a>,
}

impl<'a> OrderStore<'a> {
    pub(super) const fn new(storage: Storage<'a>) -> Self {
        Self { storage }
    }

    /// Store a new order in its initial state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate order number, or
    /// another `RepositoryError` if the durable insert fails or times out.
    #[instrument(skip(self, order), fields(mode = ?self.storage.mode(), order_id = %order.order_id))]
    pub async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, OrderRepository::new(pool).create(&order)).await
            }
            Storage::Memory(memory) => memory.insert_order(order).await,
        }
    }

    /// List orders.
    ///
    /// The durable path returns newest first; the fallback path returns
    /// insertion order (oldest first).
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, OrderRepository::new(pool).list_newest_first()).await
            }
            Storage::Memory(memory) => Ok(memory.list_orders().await),
        }
    }

    /// Find an order by order number.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn find_by_key(&self, order_id: &str) -> Result<Option<Order>, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, OrderRepository::new(pool).get_by_number(order_id))
                    .await
            }
            Storage::Memory(memory) => Ok(memory.find_order(order_id).await),
        }
    }

    /// Mark an order paid and confirmed; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable update fails or times out.
    #[instrument(skip(self), fields(mode = ?self.storage.mode()))]
    pub async fn mark_payment_verified(
        &self,
        order_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(
                    timeout,
                    OrderRepository::new(pool).mark_payment_verified(order_id),
                )
                .await
            }
            Storage::Memory(memory) => Ok(memory.mark_payment_verified(order_id).await),
        }
    }

    /// Count orders.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the durable query fails or times out.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        match self.storage {
            Storage::Durable { pool, timeout } => {
                db::with_timeout(timeout, OrderRepository::new(pool).count())
                    .await
                    .map(to_count)
            }
            Storage::Memory(memory) => Ok(usize_to_count(memory.order_count().await)),
        }
    }
}
