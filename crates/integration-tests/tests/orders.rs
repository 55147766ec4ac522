//! Integration tests for the order endpoints.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;
use stockroom_integration_tests::TestApp;

#[tokio::test]
async fn test_create_then_read_order() {
    let app = TestApp::new();
    let user_id = app
        .create("users", &json!({ "name": "Ada", "email": "ada@example.com" }))
        .await;
    let product_id = app.create("products", &json!({ "name": "Mug" })).await;

    let response = app
        .post(
            "/orders",
            &json!({ "user_id": user_id, "product_id": product_id, "quantity": 3 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.json();
    assert_eq!(created["user_id"], user_id.as_str());
    assert_eq!(created["product_id"], product_id.as_str());
    assert_eq!(created["quantity"], 3);

    let id = created["id"].as_str().unwrap();
    let read = app.get(&format!("/orders/{id}")).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.json(), created);
}

#[tokio::test]
async fn test_order_references_are_stored_as_object_ids() {
    let app = TestApp::new();
    let product_id = "65f1c0ffee0ddba11cafe002";
    app.create("orders", &json!({ "product_id": product_id, "quantity": 1 }))
        .await;

    let documents = app.store.documents("orders").await;
    let stored = &documents[0];
    assert_eq!(stored.get_object_id("product_id").unwrap().to_hex(), product_id);
    assert_eq!(
        stored.get_object_id("user_id").unwrap().to_hex(),
        "000000000000000000000000"
    );
    assert_eq!(stored.get_i64("quantity").unwrap(), 1);
    assert!(stored.get_datetime("order_date").is_ok());
}

#[tokio::test]
async fn test_orders_are_not_referentially_checked() {
    let app = TestApp::new();

    let response = app
        .post(
            "/orders",
            &json!({ "user_id": "65f1c0ffee0ddba11cafe009", "quantity": -4 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["quantity"], -4);
}

#[tokio::test]
async fn test_malformed_reference_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .post("/orders", &json!({ "user_id": "user-1", "quantity": 1 }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.operation_count(), 0);
}

#[tokio::test]
async fn test_read_unknown_order_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/orders/65f1c0ffee0ddba11cafe001").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "The requested order could not be found");
}

#[tokio::test]
async fn test_orders_cannot_be_updated_or_deleted() {
    let app = TestApp::new();
    let id = app.create("orders", &json!({ "quantity": 1 })).await;
    let uri = format!("/orders/{id}");

    assert_eq!(
        app.put(&uri, &json!({ "quantity": 2 })).await.status,
        StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(app.delete(&uri).await.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(app.get(&uri).await.json()["quantity"], 1);
}
