//! End-to-end tests for the order endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database, migrated and seeded
//!   (`orders-cli migrate && orders-cli seed`)
//! - The API server running (`cargo run -p orders-api`)
//!
//! Run with: `cargo test -p orders-integration-tests -- --ignored`

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use orders_integration_tests::api_base_url;

/// Create a plain HTTP client.
fn client() -> Client {
    Client::new()
}

/// Test helper: create an order and return (status, location, body).
async fn create_order(client: &Client, body: &Value) -> (StatusCode, Option<String>, Value) {
    let base_url = api_base_url();
    let resp = client
        .post(format!("{base_url}/api/orders"))
        .json(body)
        .send()
        .await
        .expect("Failed to send create-order request");

    let status = resp.status();
    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    (status, location, body)
}

// ============================================================================
// Create Order
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_create_order_computes_exact_total() {
    let client = client();

    // 1 × Laptop (1500.00) + 2 × Mouse (25.00) = 1550.00
    let (status, location, body) = create_order(
        &client,
        &json!({
            "customer_id": 1,
            "items": [
                {"product_id": 1, "quantity": 1},
                {"product_id": 2, "quantity": 2}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount"], json!("1550.00"));
    assert_eq!(body["customer_name"], json!("Pranaya Rout"));

    // Location header points at the retrieval endpoint
    let location = location.expect("Created response must carry a Location header");
    let order_id = body["order_id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/orders/{order_id}"));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_create_order_unknown_customer_is_not_found() {
    let client = client();

    let (status, _, _) = create_order(
        &client,
        &json!({
            "customer_id": 999_999,
            "items": [{"product_id": 1, "quantity": 1}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_create_order_unknown_product_is_bad_request() {
    let client = client();

    let (status, _, _) = create_order(
        &client,
        &json!({
            "customer_id": 1,
            "items": [
                {"product_id": 1, "quantity": 1},
                {"product_id": 999_999, "quantity": 1}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_create_order_zero_quantity_is_bad_request() {
    let client = client();

    let (status, _, _) = create_order(
        &client,
        &json!({
            "customer_id": 1,
            "items": [{"product_id": 1, "quantity": 0}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_create_order_negative_quantity_is_bad_request() {
    let client = client();

    let (status, _, _) = create_order(
        &client,
        &json!({
            "customer_id": 1,
            "items": [{"product_id": 2, "quantity": -2}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_create_order_empty_items_is_bad_request() {
    let client = client();

    let (status, _, _) = create_order(&client, &json!({"customer_id": 1, "items": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_create_order_missing_customer_id_is_bad_request() {
    let client = client();

    let (status, _, _) = create_order(
        &client,
        &json!({"items": [{"product_id": 1, "quantity": 1}]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_create_order_malformed_json_is_bad_request() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/orders"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"customer_id\": 1,")
        .send()
        .await
        .expect("Failed to send create-order request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_failed_create_leaves_no_partial_order() {
    let client = client();
    let base_url = api_base_url();

    let count_before = customer_order_count(&client, 1).await;

    // Second product reference is invalid, so nothing may be written.
    let (status, _, _) = create_order(
        &client,
        &json!({
            "customer_id": 1,
            "items": [
                {"product_id": 1, "quantity": 1},
                {"product_id": 999_999, "quantity": 1}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let count_after = customer_order_count(&client, 1).await;
    assert_eq!(count_before, count_after);

    // And the list endpoint still answers
    let resp = client
        .get(format!("{base_url}/api/orders/customer/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Get By Id
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_get_created_order_round_trips_detail() {
    let client = client();
    let base_url = api_base_url();

    let (status, _, created) = create_order(
        &client,
        &json!({
            "customer_id": 1,
            "items": [
                {"product_id": 2, "quantity": 2},
                {"product_id": 3, "quantity": 1}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = created["order_id"].as_i64().unwrap();

    let fetched: Value = client
        .get(format!("{base_url}/api/orders/{order_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fetched["customer_name"], json!("Pranaya Rout"));
    assert_eq!(fetched["address"]["street"], json!("123 Main St"));
    assert_eq!(fetched["address"]["city"], json!("Jajpur"));
    assert_eq!(fetched["address"]["zip_code"], json!("755019"));

    // 2 × 25.00 + 1 × 50.00 = 100.00
    assert_eq!(fetched["amount"], json!("100.00"));
    let items = fetched["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_name"], json!("Mouse"));
    assert_eq!(items[0]["total_price"], json!("50.00"));
    assert_eq!(items[1]["product_name"], json!("Keyboard"));
    assert_eq!(items[1]["total_price"], json!("50.00"));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_get_order_twice_is_identical() {
    let client = client();
    let base_url = api_base_url();

    let first = client
        .get(format!("{base_url}/api/orders/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = first.text().await.unwrap();

    let second = client
        .get(format!("{base_url}/api/orders/1"))
        .send()
        .await
        .unwrap();
    let second_body = second.text().await.unwrap();

    assert_eq!(first_body, second_body);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_get_unknown_order_is_not_found() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/api/orders/999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// List By Customer
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_customer_without_orders_gets_empty_list() {
    let client = client();
    let base_url = api_base_url();

    // Customer 2 is seeded with no orders. Repeated calls must agree.
    for _ in 0..3 {
        let resp = client
            .get(format!("{base_url}/api/orders/customer/2"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_customer_orders_sorted_by_date() {
    let client = client();

    let orders = customer_orders(&client, 1).await;
    assert!(!orders.is_empty());

    let dates: Vec<&str> = orders
        .iter()
        .map(|o| o["order_date"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted);
}

// ============================================================================
// Helpers
// ============================================================================

async fn customer_orders(client: &Client, customer_id: i64) -> Vec<Value> {
    let base_url = api_base_url();
    client
        .get(format!("{base_url}/api/orders/customer/{customer_id}"))
        .send()
        .await
        .unwrap()
        .json::<Vec<Value>>()
        .await
        .unwrap()
}

async fn customer_order_count(client: &Client, customer_id: i64) -> usize {
    customer_orders(client, customer_id).await.len()
}
