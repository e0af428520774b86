//! Order lifecycle: numbering, placement and payment verification.
//!
//! ```text
//! order status:    pending -> confirmed -> shipped -> delivered
//! payment status:  pending -> paid | failed
//! ```
//!
//! Payment verification is simulated: any verification request for an
//! existing order moves it to `paid` / `confirmed` without consulting a
//! payment processor.

use rust_decimal::Decimal;
use tracing::instrument;

use bramanda_core::{OrderNumber, PaymentMethod};

use crate::clock::MonotonicMillis;
use crate::db::RepositoryError;
use crate::error::add_breadcrumb;
use crate::models::{CustomerInfo, NewOrder, Order, OrderItem};
use crate::store::Storage;

/// Message returned when a verification was recorded (or the order is unknown).
pub const PAYMENT_VERIFIED_MESSAGE: &str = "Payment verified successfully";
/// Message returned when the store failed during verification.
pub const PAYMENT_PROCESSED_MESSAGE: &str = "Payment processed";

/// Input for placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub customer: CustomerInfo,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
}

/// A successfully placed order.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    /// Human-readable confirmation embedding the order number.
    pub message: String,
}

/// Result of a payment verification request.
///
/// Verification never fails from the caller's point of view; the variants
/// only record what actually happened.
#[derive(Debug, Clone)]
pub enum PaymentVerification {
    /// The order exists and is now paid and confirmed.
    Verified(Order),
    /// No order has this number; nothing changed.
    UnknownOrder,
    /// The store failed; the order may or may not have been updated.
    StoreFailed,
}

impl PaymentVerification {
    /// Confirmation message for the client.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Verified(_) | Self::UnknownOrder => PAYMENT_VERIFIED_MESSAGE,
            Self::StoreFailed => PAYMENT_PROCESSED_MESSAGE,
        }
    }
}

/// Assigns order numbers and applies order state transitions.
#[derive(Debug, Default)]
pub struct OrderLifecycle {
    numbers: MonotonicMillis,
}

impl OrderLifecycle {
    /// Create a new lifecycle manager.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            numbers: MonotonicMillis::new(),
        }
    }

    /// Next order number: `BR` followed by epoch milliseconds.
    ///
    /// Unique within this process; other processes may collide.
    pub fn next_order_number(&self) -> OrderNumber {
        OrderNumber::from_millis(self.numbers.next())
    }

    /// Number and store a new order in the `pending` / `pending` state.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the active store rejects the order.
    #[instrument(skip(self, storage, request), fields(mode = ?storage.mode()))]
    pub async fn place_order(
        &self,
        storage: Storage<'_>,
        request: PlaceOrder,
    ) -> Result<PlacedOrder, RepositoryError> {
        let new_order = NewOrder {
            order_id: self.next_order_number(),
            customer: request.customer,
            items: request.items,
            total_amount: request.total_amount,
            payment_method: request.payment_method,
        };

        let order = storage.orders().create(new_order).await?;
        tracing::info!(
            order_id = %order.order_id,
            payment_method = %order.payment_method,
            items = order.items.len(),
            "Order placed"
        );

        add_breadcrumb(
            "order",
            "Order placed",
            Some(&[("order_id", order.order_id.as_str())]),
        );

        let message = format!("Order #{} placed successfully!", order.order_id);
        Ok(PlacedOrder { order, message })
    }

    /// Record a (simulated) payment for an order.
    ///
    /// The transaction id is logged but not checked. Unknown orders and store
    /// failures are reported through the returned value, never as errors.
    #[instrument(skip(self, storage), fields(mode = ?storage.mode()))]
    pub async fn verify_payment(
        &self,
        storage: Storage<'_>,
        order_id: &str,
        transaction_id: Option<&str>,
    ) -> PaymentVerification {
        match storage.orders().mark_payment_verified(order_id).await {
            Ok(Some(order)) => {
                add_breadcrumb("payment", "Payment verified", Some(&[("order_id", order_id)]));
                tracing::info!(order_id, "Payment verified");
                PaymentVerification::Verified(order)
            }
            Ok(None) => {
                tracing::warn!(order_id, "Payment verification for unknown order");
                PaymentVerification::UnknownOrder
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "Payment verification failed");
                PaymentVerification::StoreFailed
            }
        }
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the active store fails.
    pub async fn get_order(
        &self,
        storage: Storage<'_>,
        order_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        storage.orders().find_by_key(order_id).await
    }

    /// List all orders in the active store's order.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the active store fails.
    pub async fn list_orders(&self, storage: Storage<'_>) -> Result<Vec<Order>, RepositoryError> {
        storage.orders().list().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bramanda_core::{OrderStatus, PaymentStatus};

    use super::*;
    use crate::store::MemoryStore;

    fn request() -> PlaceOrder {
        PlaceOrder {
            customer: CustomerInfo {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9800000000".to_string(),
                address: "Kathmandu".to_string(),
            },
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            payment_method: PaymentMethod::Esewa,
        }
    }

    #[test]
    fn test_order_numbers_have_prefix_and_digits() {
        let lifecycle = OrderLifecycle::new();
        let number = lifecycle.next_order_number();
        let digits = number.as_str().strip_prefix("BR").unwrap();
        assert!(!digits.is_empty());
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_order_numbers_are_unique_in_a_burst() {
        let lifecycle = OrderLifecycle::new();
        let numbers: std::collections::HashSet<_> =
            (0..1000).map(|_| lifecycle.next_order_number()).collect();
        assert_eq!(numbers.len(), 1000);
    }

    #[tokio::test]
    async fn test_place_order_starts_pending() {
        let memory = MemoryStore::new();
        let lifecycle = OrderLifecycle::new();

        let placed = lifecycle
            .place_order(Storage::Memory(&memory), request())
            .await
            .unwrap();

        assert_eq!(placed.order.payment_status, PaymentStatus::Pending);
        assert_eq!(placed.order.order_status, OrderStatus::Pending);
        assert_eq!(
            placed.message,
            format!("Order #{} placed successfully!", placed.order.order_id)
        );
        assert_eq!(memory.order_count().await, 1);
    }

    #[tokio::test]
    async fn test_verify_payment_transitions_once() {
        let memory = MemoryStore::new();
        let lifecycle = OrderLifecycle::new();
        let storage = Storage::Memory(&memory);
        let placed = lifecycle.place_order(storage, request()).await.unwrap();
        let id = placed.order.order_id.as_str();

        let first = lifecycle.verify_payment(storage, id, Some("txn-1")).await;
        let PaymentVerification::Verified(order) = first else {
            panic!("expected verified order");
        };
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.order_status, OrderStatus::Confirmed);

        let second = lifecycle.verify_payment(storage, id, Some("txn-2")).await;
        let PaymentVerification::Verified(again) = second else {
            panic!("expected verified order");
        };
        assert_eq!(again, order);
    }

    #[tokio::test]
    async fn test_verify_unknown_order_changes_nothing() {
        let memory = MemoryStore::new();
        let lifecycle = OrderLifecycle::new();
        let storage = Storage::Memory(&memory);
        lifecycle.place_order(storage, request()).await.unwrap();
        let before = memory.list_orders().await;

        let outcome = lifecycle.verify_payment(storage, "BR0", None).await;

        assert!(matches!(outcome, PaymentVerification::UnknownOrder));
        assert_eq!(outcome.message(), PAYMENT_VERIFIED_MESSAGE);
        assert_eq!(memory.list_orders().await, before);
    }

    #[test]
    fn test_store_failure_message() {
        assert_eq!(
            PaymentVerification::StoreFailed.message(),
            PAYMENT_PROCESSED_MESSAGE
        );
    }
}
