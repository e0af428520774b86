//! In-process fallback storage.
//!
//! Used whenever the durable store is unreachable. Each collection keeps
//! insertion order and sits behind its own async `RwLock`, so every
//! append, scan or update is atomic with respect to that collection.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::clock::MonotonicMillis;
use crate::db::RepositoryError;
use crate::models::{NewOrder, NewProduct, NewSubscriber, Order, Product, Subscriber};

/// Owned in-memory collections for products, subscribers and orders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    subscribers: RwLock<Vec<Subscriber>>,
    orders: RwLock<Vec<Order>>,
    product_ids: MonotonicMillis,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Append a product with a time-derived id and the current timestamp.
    pub async fn create_product(&self, product: NewProduct) -> Product {
        let id = self.product_ids.next().to_string();
        let stored = product.into_product(id, Utc::now());
        self.products.write().await.push(stored.clone());
        stored
    }

    /// Replace the whole product collection.
    pub async fn replace_products(&self, products: Vec<Product>) {
        *self.products.write().await = products;
    }

    /// All products in insertion order, regardless of stock.
    pub async fn list_products(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// Find a product by id.
    pub async fn find_product(&self, id: &str) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Number of stored products.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }

    // -------------------------------------------------------------------------
    // Subscribers
    // -------------------------------------------------------------------------

    /// Append a subscriber unless the email is already present.
    ///
    /// Returns the stored subscriber and whether this call created it.
    pub async fn upsert_subscriber(&self, subscriber: NewSubscriber) -> (Subscriber, bool) {
        let mut subscribers = self.subscribers.write().await;

        if let Some(existing) = subscribers.iter().find(|s| s.email == subscriber.email) {
            return (existing.clone(), false);
        }

        let stored = subscriber.into_subscriber(Utc::now());
        subscribers.push(stored.clone());
        (stored, true)
    }

    /// Find a subscriber by email.
    pub async fn find_subscriber(&self, email: &str) -> Option<Subscriber> {
        self.subscribers
            .read()
            .await
            .iter()
            .find(|s| s.email == email)
            .cloned()
    }

    /// All subscribers in insertion order.
    pub async fn list_subscribers(&self) -> Vec<Subscriber> {
        self.subscribers.read().await.clone()
    }

    /// Number of stored subscribers.
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Append an order in its initial state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number is already stored.
    pub async fn insert_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.write().await;

        if orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(RepositoryError::Conflict(format!(
                "order number {} already exists",
                order.order_id
            )));
        }

        let stored = order.into_order(Utc::now());
        orders.push(stored.clone());
        Ok(stored)
    }

    /// Find an order by order number.
    pub async fn find_order(&self, order_id: &str) -> Option<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.order_id == *order_id)
            .cloned()
    }

    /// All orders in insertion order (oldest first).
    pub async fn list_orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Mark an order as paid and confirmed; `None` if it does not exist.
    pub async fn mark_payment_verified(&self, order_id: &str) -> Option<Order> {
        let mut orders = self.orders.write().await;
        let order = orders.iter_mut().find(|o| o.order_id == *order_id)?;
        order.apply_payment_verification();
        Some(order.clone())
    }

    /// Number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use bramanda_core::{OrderNumber, OrderStatus, PaymentMethod, PaymentStatus};
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::CustomerInfo;

    fn new_order(millis: u64) -> NewOrder {
        NewOrder {
            order_id: OrderNumber::from_millis(millis),
            customer: CustomerInfo {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9800000000".to_string(),
                address: "Kathmandu".to_string(),
            },
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            payment_method: PaymentMethod::CashOnDelivery,
        }
    }

    #[tokio::test]
    async fn test_products_keep_insertion_order_and_unique_ids() {
        let store = MemoryStore::new();
        let a = store.create_product(NewProduct::new("A", Decimal::ONE)).await;
        let b = store.create_product(NewProduct::new("B", Decimal::TWO)).await;

        assert_ne!(a.id, b.id);
        let listed = store.list_products().await;
        assert_eq!(listed, vec![a.clone(), b]);
        assert_eq!(store.find_product(&a.id).await, Some(a));
        assert!(store.find_product("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_list_products_includes_out_of_stock() {
        let store = MemoryStore::new();
        let mut product = NewProduct::new("Sold out", Decimal::TEN);
        product.in_stock = false;
        store.create_product(product).await;

        assert_eq!(store.list_products().await.len(), 1);
    }

    #[tokio::test]
    async fn test_subscriber_upsert_is_idempotent() {
        let store = MemoryStore::new();
        let first = NewSubscriber {
            email: "a@example.com".to_string(),
            name: Some("First".to_string()),
        };
        let second = NewSubscriber {
            email: "a@example.com".to_string(),
            name: Some("Second".to_string()),
        };

        let (created, was_created) = store.upsert_subscriber(first).await;
        let (existing, second_created) = store.upsert_subscriber(second).await;

        assert!(was_created);
        assert!(!second_created);
        assert_eq!(created, existing);
        assert_eq!(existing.name.as_deref(), Some("First"));
        assert_eq!(store.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_subscribes_store_one_record() {
        let store = Arc::new(MemoryStore::new());
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .upsert_subscriber(NewSubscriber {
                            email: "race@example.com".to_string(),
                            name: None,
                        })
                        .await
                        .1
                })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_orders_listed_oldest_first() {
        let store = MemoryStore::new();
        store.insert_order(new_order(1)).await.unwrap();
        store.insert_order(new_order(2)).await.unwrap();

        let ids: Vec<String> = store
            .list_orders()
            .await
            .into_iter()
            .map(|o| o.order_id.into_inner())
            .collect();
        assert_eq!(ids, vec!["BR1".to_string(), "BR2".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_order_number_conflicts() {
        let store = MemoryStore::new();
        store.insert_order(new_order(5)).await.unwrap();
        let err = store.insert_order(new_order(5)).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn test_mark_payment_verified() {
        let store = MemoryStore::new();
        store.insert_order(new_order(7)).await.unwrap();

        let updated = store.mark_payment_verified("BR7").await.unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(updated.order_status, OrderStatus::Confirmed);
        assert_eq!(store.find_order("BR7").await, Some(updated));
    }

    #[tokio::test]
    async fn test_mark_payment_verified_unknown_order() {
        let store = MemoryStore::new();
        store.insert_order(new_order(8)).await.unwrap();
        let before = store.list_orders().await;

        assert!(store.mark_payment_verified("BR9").await.is_none());
        assert_eq!(store.list_orders().await, before);
    }
}
