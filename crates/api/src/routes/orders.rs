//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bramanda_core::{OrderNumber, PaymentMethod};

use super::ApiJson;
use crate::error::{AppError, Result};
use crate::models::{CustomerInfo, Order, OrderItem};
use crate::services::PlaceOrder;
use crate::state::AppState;

/// Order placement request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
}

impl CreateOrderRequest {
    /// Check required customer details and build the placement input.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` naming every missing customer field.
    pub fn into_place_order(self) -> Result<PlaceOrder> {
        let mut missing = Vec::new();
        let mut required = |value: Option<String>, field: &'static str| {
            let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
            if value.is_empty() {
                missing.push(field);
            }
            value
        };

        let customer = CustomerInfo {
            name: required(self.customer_name, "customerName"),
            email: required(self.customer_email, "customerEmail"),
            phone: required(self.customer_phone, "customerPhone"),
            address: required(self.customer_address, "customerAddress"),
        };

        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(PlaceOrder {
            customer,
            items: self.items,
            total_amount: self.total_amount.unwrap_or_default(),
            payment_method: self.payment_method.unwrap_or_default(),
        })
    }
}

/// Order placement response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: OrderNumber,
    pub message: String,
}

/// Place an order.
#[instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>> {
    let request = request.into_place_order()?;
    let storage = state.storage().select().await;

    let placed = state
        .orders()
        .place_order(storage, request)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to store order");
            AppError::Internal("Failed to create order".to_string())
        })?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: placed.order.order_id,
        message: placed.message,
    }))
}

/// List orders.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let storage = state.storage().select().await;

    let orders = state.orders().list_orders(storage).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list orders");
        AppError::Internal("Failed to fetch orders".to_string())
    })?;

    Ok(Json(orders))
}

/// Fetch a single order.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>> {
    let storage = state.storage().select().await;

    state
        .orders()
        .get_order(storage, &order_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch order");
            AppError::Internal("Failed to fetch order".to_string())
        })?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Order".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_customer_fields_are_listed() {
        let request = CreateOrderRequest {
            customer_name: Some("Asha".to_string()),
            customer_phone: Some("  ".to_string()),
            ..Default::default()
        };

        let Err(AppError::BadRequest(message)) = request.into_place_order() else {
            panic!("expected bad request");
        };
        assert_eq!(
            message,
            "Missing required fields: customerEmail, customerPhone, customerAddress"
        );
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let request: CreateOrderRequest = serde_json::from_str(
            r#"{
                "customerName": "Asha",
                "customerEmail": "asha@example.com",
                "customerPhone": "9800000000",
                "customerAddress": "Kathmandu"
            }"#,
        )
        .unwrap();
        let order = request.into_place_order().unwrap();

        assert!(order.items.is_empty());
        assert_eq!(order.total_amount, Decimal::ZERO);
        assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_unknown_payment_method_is_rejected() {
        let parsed = serde_json::from_str::<CreateOrderRequest>(r#"{"paymentMethod": "card"}"#);
        assert!(parsed.is_err());
    }
}
