//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode};

use crate::db::{self, DocumentStore};
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Pings the store under the usual deadline. Returns 503 Service Unavailable
/// if the store is unreachable or slow.
pub async fn readiness<S: DocumentStore>(State(state): State<AppState<S>>) -> StatusCode {
    let ping = db::bounded("ping", "-", state.store_timeout(), state.store().ping()).await;
    match ping {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
