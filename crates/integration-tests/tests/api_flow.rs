//! Integration tests against a running API server.
//!
//! These tests require the server to be running
//! (cargo run -p bramanda-api). They work in both storage modes.

use reqwest::StatusCode;
use serde_json::{Value, json};

use bramanda_integration_tests::{Ack, Health, base_url, client};

fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_health() {
    let resp = client()
        .expect("Failed to create HTTP client")
        .get(format!("{}/api/health", base_url()))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::OK);
    let health: Health = resp.json().await.expect("Invalid health body");
    assert!(health.status.starts_with("OK"));
    assert!(["Connected", "Using Memory", "Disconnected"].contains(&health.database.as_str()));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_product_order_payment_flow() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();
    let name = format!("Integration Product {}", unique_suffix());

    let created: Value = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({"name": name, "price": 10}))
        .send()
        .await
        .expect("Failed to create product")
        .json()
        .await
        .expect("Invalid product body");
    assert_eq!(created["success"], true);

    let products: Vec<Value> = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Invalid product list");
    assert!(products.iter().any(|p| p["name"] == name.as_str()));

    let placed: Ack = client
        .post(format!("{base_url}/api/orders"))
        .json(&json!({
            "customerName": "Integration",
            "customerEmail": "integration@example.com",
            "customerPhone": "9800000000",
            "customerAddress": "Kathmandu",
            "items": [],
            "totalAmount": 0,
            "paymentMethod": "esewa"
        }))
        .send()
        .await
        .expect("Failed to place order")
        .json()
        .await
        .expect("Invalid order body");
    assert!(placed.success);
    let order_id = placed.order_id.expect("Missing order id");
    assert!(order_id.starts_with("BR"));

    let verified: Ack = client
        .post(format!("{base_url}/api/esewa-verify"))
        .json(&json!({"orderId": order_id, "transactionId": "integration-txn"}))
        .send()
        .await
        .expect("Failed to verify payment")
        .json()
        .await
        .expect("Invalid verify body");
    assert!(verified.success);

    let order: Value = client
        .get(format!("{base_url}/api/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to fetch order")
        .json()
        .await
        .expect("Invalid order");
    assert_eq!(order["paymentStatus"], "paid");
    assert_eq!(order["orderStatus"], "confirmed");
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_subscribe_twice_counts_once() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();
    let email = format!("integration-{}@example.com", unique_suffix());

    let health = |client: reqwest::Client| {
        let url = format!("{base_url}/api/health");
        async move {
            client
                .get(url)
                .send()
                .await
                .expect("Failed to reach server")
                .json::<Health>()
                .await
                .expect("Invalid health body")
        }
    };

    let before = health(client.clone()).await;
    for _ in 0..2 {
        let ack: Ack = client
            .post(format!("{base_url}/api/subscribe"))
            .json(&json!({"email": email}))
            .send()
            .await
            .expect("Failed to subscribe")
            .json()
            .await
            .expect("Invalid subscribe body");
        assert!(ack.success);
    }
    let after = health(client).await;

    assert_eq!(after.subscribers, before.subscribers + 1);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_unknown_order_is_404() {
    let resp = client()
        .expect("Failed to create HTTP client")
        .get(format!("{}/api/orders/BR0", base_url()))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let ack: Ack = resp.json().await.expect("Invalid error body");
    assert!(!ack.success);
    assert_eq!(ack.message.as_deref(), Some("Order not found"));
}
