//! eSewa payment verification.
//!
//! Verification is simulated: the transaction id is accepted as-is and the
//! response always reports success, whatever the body looks like.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use super::LenientBody;
use crate::services::PaymentVerification;
use crate::state::AppState;

/// Payment verification response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Verify an eSewa payment and confirm the order.
#[instrument(skip_all)]
pub async fn verify_esewa(
    State(state): State<AppState>,
    body: LenientBody,
) -> Json<VerifyPaymentResponse> {
    let transaction_id = body.text("transactionId");
    let Some(order_id) = body.text("orderId") else {
        tracing::warn!("Payment verification without order id");
        return Json(VerifyPaymentResponse {
            success: true,
            message: PaymentVerification::UnknownOrder.message(),
            order_id: None,
        });
    };

    let storage = state.storage().select().await;
    let outcome = state
        .orders()
        .verify_payment(storage, &order_id, transaction_id.as_deref())
        .await;

    let order_id = match outcome {
        PaymentVerification::StoreFailed => None,
        PaymentVerification::Verified(_) | PaymentVerification::UnknownOrder => Some(order_id),
    };

    Json(VerifyPaymentResponse {
        success: true,
        message: outcome.message(),
        order_id,
    })
}
