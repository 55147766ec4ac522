//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health           - Liveness check
//! GET    /health/ready     - Readiness check (store ping)
//!
//! # Users
//! POST   /users            - Create user
//! GET    /users/{id}       - Read user
//! PUT    /users/{id}       - Replace user fields
//! DELETE /users/{id}       - Delete user
//!
//! # Products
//! POST   /products         - Create product
//! GET    /products/{id}    - Read product
//! PUT    /products/{id}    - Replace product fields
//! DELETE /products/{id}    - Delete product
//!
//! # Orders
//! POST   /orders           - Create order
//! GET    /orders/{id}      - Read order
//!
//! # Inventory
//! PUT    /inventory        - Set a product's stock level
//! ```

pub mod health;
pub mod inventory;
pub mod resources;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    middleware,
    routing::{get, post, put},
};
use stockroom_core::{Order, Product, User};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::codec::Resource;
use crate::db::DocumentStore;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create, read, update and delete routes for `R`.
pub fn crud_routes<R: Resource, S: DocumentStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", post(resources::create::<R, S>))
        .route(
            "/{id}",
            get(resources::read::<R, S>)
                .put(resources::update::<R, S>)
                .delete(resources::delete::<R, S>),
        )
}

/// Orders can only be created and read.
pub fn order_routes<S: DocumentStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", post(resources::create::<Order, S>))
        .route("/{id}", get(resources::read::<Order, S>))
}

/// Create all resource routes.
pub fn routes<S: DocumentStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness::<S>))
        .nest("/users", crud_routes::<User, S>())
        .nest("/products", crud_routes::<Product, S>())
        .nest("/orders", order_routes::<S>())
        .route("/inventory", put(inventory::update_inventory::<S>))
}

/// Build the complete application: routes, request tracing, request IDs and
/// Sentry.
pub fn app<S: DocumentStore>(state: AppState<S>) -> Router {
    routes::<S>()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
