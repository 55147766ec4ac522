//! Inventory level handler.

use axum::{body::Bytes, extract::State, http::StatusCode};
use stockroom_core::Inventory;

use crate::codec;
use crate::db::{DocumentStore, InventoryRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Set a product's stock level.
///
/// `PUT /inventory` with `{"product_id": "...", "quantity": n}`
///
/// Creates the inventory document on first use. Only `quantity` is written,
/// so repeating a request is idempotent.
#[tracing::instrument(skip(state, body))]
pub async fn update_inventory<S: DocumentStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<StatusCode> {
    let inventory: Inventory = codec::decode(&body)?;

    let outcome = InventoryRepository::new(state.store(), state.store_timeout())
        .set_quantity(&inventory)
        .await
        .map_err(|e| AppError::storage("Failed to update inventory", e))?;

    tracing::info!(
        product_id = %inventory.product_id,
        quantity = inventory.quantity,
        created = outcome.upserted_id.is_some(),
        "Inventory updated"
    );
    Ok(StatusCode::OK)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::db::InMemoryStore;

    #[tokio::test]
    async fn test_update_inventory_upserts_by_product() {
        let store = InMemoryStore::new();
        let state = AppState::new(ApiConfig::default(), store.clone());
        let body = Bytes::from_static(br#"{"product_id":"65f1c0ffee0ddba11cafe001","quantity":12}"#);

        for _ in 0..2 {
            let status = update_inventory(State(state.clone()), body.clone())
                .await
                .unwrap();
            assert_eq!(status, StatusCode::OK);
        }

        let documents = store.documents("inventory").await;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].get_i64("quantity").unwrap(), 12);
    }

    #[tokio::test]
    async fn test_malformed_product_id_is_bad_request() {
        let store = InMemoryStore::new();
        let state = AppState::new(ApiConfig::default(), store.clone());
        let body = Bytes::from_static(br#"{"product_id":"xyz","quantity":1}"#);

        let err = update_inventory(State(state), body).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.operation_count(), 0);
    }
}
