//! Integration tests for the Bramanda backend.
//!
//! These tests talk to a running server over HTTP and are ignored by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server (memory mode is fine)
//! cargo run -p bramanda-api
//!
//! # Run integration tests
//! BRAMANDA_BASE_URL=http://localhost:5000 cargo test -p bramanda-integration-tests -- --ignored
//! ```

use reqwest::Client;
use serde::Deserialize;

/// Default address of a locally running server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Base URL for the API (configurable via `BRAMANDA_BASE_URL`).
#[must_use]
pub fn base_url() -> String {
    std::env::var("BRAMANDA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Build an HTTP client for the tests.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn client() -> reqwest::Result<Client> {
    Client::builder().build()
}

/// Health check response, as far as the tests care.
#[derive(Debug, Deserialize)]
pub struct Health {
    pub status: String,
    pub database: String,
    pub products: u64,
    pub subscribers: u64,
    pub orders: u64,
}

/// Generic `{success, message}` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    pub success: bool,
    pub message: Option<String>,
    pub order_id: Option<String>,
}
