//! Newsletter subscription route handlers.
//!
//! Subscribing always answers `success: true`, whatever the body looks like;
//! an email that is already on the list is treated as a successful subscription.

use axum::{Json, extract::State};
use serde::Serialize;

use super::LenientBody;
use crate::services::newsletter;
use crate::state::AppState;

/// Newsletter subscription response body.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Subscribe to the newsletter.
pub async fn subscribe(
    State(state): State<AppState>,
    body: LenientBody,
) -> Json<SubscribeResponse> {
    let email = body.text("email").unwrap_or_default();
    let name = body.text("name");

    let storage = state.storage().select().await;
    let outcome = newsletter::subscribe(storage, &email, name.as_deref()).await;

    Json(SubscribeResponse {
        success: true,
        message: outcome.message(),
    })
}
