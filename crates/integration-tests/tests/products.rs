//! Integration tests for the product endpoints.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]

use axum::http::StatusCode;
use serde_json::json;
use stockroom_integration_tests::TestApp;

#[tokio::test]
async fn test_create_then_read_product() {
    let app = TestApp::new();
    let body = json!({
        "name": "Desk lamp",
        "description": "Brass, adjustable arm",
        "price": 49.95,
    });

    let created = app.post("/products", &body).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let created = created.json();
    assert_eq!(created["price"], json!(49.95));

    let id = created["id"].as_str().unwrap();
    let read = app.get(&format!("/products/{id}")).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.json(), created);
}

#[tokio::test]
async fn test_price_is_stored_as_double() {
    let app = TestApp::new();
    app.create("products", &json!({ "name": "Mug", "price": 7.5 })).await;

    let documents = app.store.documents("products").await;
    assert_eq!(documents[0].get_f64("price").unwrap(), 7.5);
}

#[tokio::test]
async fn test_product_fields_are_optional() {
    let app = TestApp::new();

    let response = app.post("/products", &json!({})).await;
    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.json();
    assert_eq!(created["name"], "");
    assert_eq!(created["description"], "");
    assert_eq!(created["price"], json!(0.0));
}

#[tokio::test]
async fn test_empty_body_creates_zero_valued_product() {
    let app = TestApp::new();

    let response = app
        .send(axum::http::Method::POST, "/products", String::new())
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(app.store.document_count("products").await, 1);
}

#[tokio::test]
async fn test_update_product_overwrites_unset_fields() {
    let app = TestApp::new();
    let id = app
        .create(
            "products",
            &json!({ "name": "Mug", "description": "Stoneware", "price": 12.0 }),
        )
        .await;

    let response = app
        .put(&format!("/products/{id}"), &json!({ "price": 10.5 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.get(&format!("/products/{id}")).await.json();
    assert_eq!(after["price"], json!(10.5));
    assert_eq!(after["name"], "");
    assert_eq!(after["description"], "");
}

#[tokio::test]
async fn test_read_unknown_product_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/products/0123456789abcdef01234567").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "The requested product could not be found");
}

#[tokio::test]
async fn test_invalid_product_identifier() {
    let app = TestApp::new();

    let response = app.get("/products/lamp").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid product ID format");
}

#[tokio::test]
async fn test_delete_product() {
    let app = TestApp::new();
    let id = app.create("products", &json!({ "name": "Mug" })).await;

    assert_eq!(
        app.delete(&format!("/products/{id}")).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(app.store.document_count("products").await, 0);
}

#[tokio::test]
async fn test_price_reads_back_exactly_as_created() {
    let app = TestApp::new();

    for price in [json!(0.1 + 0.2), json!(1e29), json!(3)] {
        let created = app.post("/products", &json!({ "price": price })).await;
        assert_eq!(created.status, StatusCode::CREATED, "price {price}");
        let created = created.json();

        let id = created["id"].as_str().unwrap();
        let read = app.get(&format!("/products/{id}")).await.json();
        assert_eq!(read["price"], created["price"], "price {price}");
        assert_eq!(read["price"].as_f64(), price.as_f64());
    }
}

#[tokio::test]
async fn test_updated_price_reads_back_exactly() {
    let app = TestApp::new();
    let id = app.create("products", &json!({ "name": "Mug" })).await;

    let response = app
        .put(&format!("/products/{id}"), &json!({ "price": 0.1 + 0.2 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.get(&format!("/products/{id}")).await.json();
    assert_eq!(after["price"].as_f64(), Some(0.1 + 0.2));
    assert_eq!(after["created_at"], "1970-01-01T00:00:00Z");
}
