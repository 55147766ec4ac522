//! Integration tests for Stockroom.
//!
//! The tests drive the real router in-process with `tower::ServiceExt`, so no
//! server or database is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stockroom-integration-tests
//! ```
//!
//! # Test Stores
//!
//! - [`InMemoryStore`] for the happy paths
//! - [`FailingStore`] fails every operation
//! - [`StalledStore`] never completes an operation

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use bson::Document;
use serde_json::Value;
use stockroom_api::config::ApiConfig;
use stockroom_api::db::{DocumentStore, Filter, InMemoryStore, StoreError, UpdateOutcome};
use stockroom_api::routes;
use stockroom_api::state::AppState;
use stockroom_core::ResourceId;
use tower::ServiceExt;

/// Store error text that must never reach a client.
pub const LEAKED_DETAIL: &str = "auth failed for mongo-admin@10.0.0.7";

/// A router plus the store behind it.
pub struct TestApp<S = InMemoryStore> {
    router: Router,
    pub store: S,
}

impl TestApp<InMemoryStore> {
    /// App backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(InMemoryStore::new(), Duration::from_secs(5))
    }
}

impl Default for TestApp<InMemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DocumentStore> TestApp<S> {
    /// App backed by `store`, with `timeout` as the store deadline.
    #[must_use]
    pub fn with_store(store: S, timeout: Duration) -> Self {
        let config = ApiConfig {
            store_timeout: timeout,
            ..ApiConfig::default()
        };
        let router = routes::app(AppState::new(config, store.clone()));
        Self { router, store }
    }

    /// Send a request with a raw body.
    pub async fn send(&self, method: Method, uri: &str, body: impl Into<Body>) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();
        self.dispatch(request).await
    }

    /// Send a request carrying its own headers.
    pub async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, Body::empty()).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, body.to_string()).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, body.to_string()).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Body::empty()).await
    }

    /// Create a resource and return its identifier.
    pub async fn create(&self, collection: &str, body: &Value) -> String {
        let response = self.post(&format!("/{collection}"), body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()["id"].as_str().unwrap().to_owned()
    }
}

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Body parsed as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// Body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `error` message of a JSON error body.
    #[must_use]
    pub fn error(&self) -> String {
        self.json()["error"].as_str().unwrap().to_owned()
    }
}

// =============================================================================
// Test Stores
// =============================================================================

/// Store whose every operation fails, counting the attempts.
#[derive(Clone, Debug, Default)]
pub struct FailingStore {
    calls: Arc<AtomicU64>,
}

impl FailingStore {
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(StoreError::Unavailable(LEAKED_DETAIL.to_owned()))
    }
}

impl DocumentStore for FailingStore {
    async fn insert_one(&self, _: &str, _: Document) -> Result<ResourceId, StoreError> {
        self.fail()
    }

    async fn find_one(&self, _: &str, _: Filter) -> Result<Option<Document>, StoreError> {
        self.fail()
    }

    async fn update_one(
        &self,
        _: &str,
        _: Filter,
        _: Document,
        _: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        self.fail()
    }

    async fn delete_one(&self, _: &str, _: Filter) -> Result<u64, StoreError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.fail()
    }
}

/// Store whose operations never complete.
#[derive(Clone, Debug, Default)]
pub struct StalledStore;

impl DocumentStore for StalledStore {
    async fn insert_one(&self, _: &str, _: Document) -> Result<ResourceId, StoreError> {
        std::future::pending().await
    }

    async fn find_one(&self, _: &str, _: Filter) -> Result<Option<Document>, StoreError> {
        std::future::pending().await
    }

    async fn update_one(
        &self,
        _: &str,
        _: Filter,
        _: Document,
        _: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        std::future::pending().await
    }

    async fn delete_one(&self, _: &str, _: Filter) -> Result<u64, StoreError> {
        std::future::pending().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        std::future::pending().await
    }
}
