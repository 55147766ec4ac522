//! Health probes and request IDs.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use stockroom_api::middleware::REQUEST_ID_HEADER;
use stockroom_integration_tests::TestApp;

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_readiness_with_reachable_store() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.store.operation_count(), 1);
}

#[tokio::test]
async fn test_every_response_carries_a_request_id() {
    let app = TestApp::new();

    let responses = [
        app.get("/health").await,
        app.post("/users", &json!({})).await,
        app.get("/users/65f1c0ffee0ddba11cafe001").await,
        app.put("/inventory", &json!({})).await,
    ];

    let mut seen = Vec::new();
    for response in &responses {
        let id = response
            .headers
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned();
        assert!(!id.is_empty());
        assert!(!seen.contains(&id));
        seen.push(id);
    }
}

#[tokio::test]
async fn test_upstream_request_id_is_echoed() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "lb-2c61f0")
        .body(Body::empty())
        .unwrap();

    let response = app.dispatch(request).await;
    assert_eq!(
        response.headers.get(REQUEST_ID_HEADER).unwrap(),
        "lb-2c61f0"
    );
}
