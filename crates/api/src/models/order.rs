//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bramanda_core::{OrderNumber, OrderStatus, PaymentMethod, PaymentStatus};

/// A line item captured at order time.
///
/// Items are snapshots: product name and price are copied from the catalog
/// so later catalog changes do not alter past orders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub image: Option<String>,
}

/// Contact and shipping details of the buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderNumber,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    #[sqlx(json)]
    pub items: Vec<OrderItem>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Payment status after a successful payment verification.
    pub const VERIFIED_PAYMENT_STATUS: PaymentStatus = PaymentStatus::Paid;
    /// Order status after a successful payment verification.
    pub const VERIFIED_ORDER_STATUS: OrderStatus = OrderStatus::Confirmed;

    /// Record a verified payment.
    ///
    /// Unconditional: applying it to an already verified order changes nothing.
    pub fn apply_payment_verification(&mut self) {
        self.payment_status = Self::VERIFIED_PAYMENT_STATUS;
        self.order_status = Self::VERIFIED_ORDER_STATUS;
    }
}

/// An order that has been numbered but not stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_id: OrderNumber,
    pub customer: CustomerInfo,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
}

impl NewOrder {
    /// Materialize the order in its initial state.
    #[must_use]
    pub fn into_order(self, created_at: DateTime<Utc>) -> Order {
        Order {
            order_id: self.order_id,
            customer_name: self.customer.name,
            customer_email: self.customer.email,
            customer_phone: self.customer.phone,
            customer_address: self.customer.address,
            items: self.items,
            total_amount: self.total_amount,
            payment_method: self.payment_method,
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Pending,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> NewOrder {
        NewOrder {
            order_id: OrderNumber::from_millis(1_700_000_000_000),
            customer: CustomerInfo {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9800000000".to_string(),
                address: "Kathmandu".to_string(),
            },
            items: vec![OrderItem {
                product_id: "1".to_string(),
                product_name: "Minimalist Watch".to_string(),
                quantity: 2,
                price: Decimal::new(19999, 2),
                image: None,
            }],
            total_amount: Decimal::new(39998, 2),
            payment_method: PaymentMethod::Esewa,
        }
    }

    #[test]
    fn test_new_order_starts_pending() {
        let order = sample().into_order(Utc::now());
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.order_status, OrderStatus::Pending);
    }

    #[test]
    fn test_payment_verification_is_idempotent() {
        let mut order = sample().into_order(Utc::now());
        order.apply_payment_verification();
        let once = order.clone();
        order.apply_payment_verification();

        assert_eq!(order, once);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.order_status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_json_shape() {
        let order = sample().into_order(Utc::now());
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["orderId"], "BR1700000000000");
        assert_eq!(json["paymentMethod"], "esewa");
        assert_eq!(json["paymentStatus"], "pending");
        assert_eq!(json["orderStatus"], "pending");
        assert_eq!(json["totalAmount"], serde_json::json!(399.98));
        assert_eq!(json["items"][0]["productName"], "Minimalist Watch");
        assert_eq!(json["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_item_fields_default_when_missing() {
        let item: OrderItem = serde_json::from_str(r#"{"productId":"3"}"#).unwrap();
        assert_eq!(item.product_id, "3");
        assert_eq!(item.quantity, 0);
        assert_eq!(item.price, Decimal::ZERO);
        assert!(item.image.is_none());
    }
}
