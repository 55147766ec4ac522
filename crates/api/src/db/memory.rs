//! Process-local backend for [`DocumentStore`].
//!
//! Keeps each collection as an insertion-ordered list of documents behind a
//! tokio `RwLock`. Semantics follow the `MongoDB` operations it stands in for:
//! first-match updates and deletes, `$set` overwrites top-level fields, and
//! upserts seed the new document from the filter field.
//!
//! Used by the test suites and by `STOCKROOM_STORE=memory` local runs. Data
//! is lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bson::Document;
use bson::oid::ObjectId;
use stockroom_core::ResourceId;
use tokio::sync::RwLock;

use super::store::{DocumentStore, Filter, StoreError, UpdateOutcome};

/// In-memory document store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    operations: Arc<AtomicU64>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of gateway operations served so far, pings included.
    #[must_use]
    pub fn operation_count(&self) -> u64 {
        self.operations.load(Ordering::Relaxed)
    }

    /// Number of documents in `collection`.
    pub async fn document_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Snapshot of every document in `collection`, in insertion order.
    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn record_operation(&self) {
        self.operations.fetch_add(1, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("operations", &self.operation_count())
            .finish_non_exhaustive()
    }
}

/// Read the `_id` of a stored document, assigning a fresh one if absent.
fn ensure_id(document: &mut Document) -> Result<ResourceId, StoreError> {
    if !document.contains_key("_id") {
        document.insert("_id", ObjectId::new());
    }
    match document.get("_id") {
        Some(bson::Bson::ObjectId(oid)) => Ok((*oid).into()),
        Some(other) => Err(StoreError::UnexpectedId(other.clone())),
        None => Err(StoreError::Unavailable("document lost its _id".to_owned())),
    }
}

impl DocumentStore for InMemoryStore {
    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<ResourceId, StoreError> {
        self.record_operation();
        let id = ensure_id(&mut document)?;
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.record_operation();
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| filter.matches(d)))
            .cloned())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        self.record_operation();
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_owned()).or_default();

        if let Some(existing) = documents.iter_mut().find(|d| filter.matches(d)) {
            let mut changed = false;
            for (key, value) in set {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    changed = true;
                }
            }
            return Ok(UpdateOutcome {
                matched: 1,
                modified: u64::from(changed),
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome::default());
        }

        let mut created = filter.to_document();
        for (key, value) in set {
            created.insert(key, value);
        }
        let id = ensure_id(&mut created)?;
        documents.push(created);

        Ok(UpdateOutcome {
            matched: 0,
            modified: 0,
            upserted_id: Some(id),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Filter) -> Result<u64, StoreError> {
        self.record_operation();
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match documents.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.record_operation();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use bson::doc;

    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_id_and_find_returns_document() {
        let store = InMemoryStore::new();
        let id = store
            .insert_one("users", doc! { "name": "Ada" })
            .await
            .unwrap();

        let found = store
            .find_one("users", Filter::by_id(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("name").unwrap(), "Ada");
        assert_eq!(found.get_object_id("_id").unwrap(), ObjectId::from(id));
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = InMemoryStore::new();
        let id = store.insert_one("users", doc! {}).await.unwrap();

        let other = store.find_one("products", Filter::by_id(id)).await.unwrap();
        assert!(other.is_none());
        assert_eq!(store.document_count("users").await, 1);
        assert_eq!(store.document_count("products").await, 0);
    }

    #[tokio::test]
    async fn test_update_sets_fields_without_touching_others() {
        let store = InMemoryStore::new();
        let id = store
            .insert_one("users", doc! { "name": "Ada", "email": "ada@example.com" })
            .await
            .unwrap();

        let outcome = store
            .update_one("users", Filter::by_id(id), doc! { "name": "Grace" }, false)
            .await
            .unwrap();
        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.modified, 1);

        let found = store
            .find_one("users", Filter::by_id(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("name").unwrap(), "Grace");
        assert_eq!(found.get_str("email").unwrap(), "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_without_match_is_a_noop() {
        let store = InMemoryStore::new();
        let outcome = store
            .update_one(
                "users",
                Filter::by_id(ResourceId::from_bytes([1; 12])),
                doc! { "name": "x" },
                false,
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::default());
        assert_eq!(store.document_count("users").await, 0);
    }

    #[tokio::test]
    async fn test_upsert_creates_once_then_updates() {
        let store = InMemoryStore::new();
        let product = ObjectId::new();
        let filter = Filter::eq("product_id", product);

        let first = store
            .update_one("inventory", filter.clone(), doc! { "quantity": 5_i64 }, true)
            .await
            .unwrap();
        assert!(first.upserted_id.is_some());

        let second = store
            .update_one("inventory", filter.clone(), doc! { "quantity": 5_i64 }, true)
            .await
            .unwrap();
        assert_eq!(second.matched, 1);
        assert_eq!(second.modified, 0);

        let documents = store.documents("inventory").await;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].get_object_id("product_id").unwrap(), product);
        assert_eq!(documents[0].get_i64("quantity").unwrap(), 5);
    }

    #[tokio::test]
    async fn test_delete_reports_count() {
        let store = InMemoryStore::new();
        let id = store.insert_one("orders", doc! {}).await.unwrap();

        assert_eq!(store.delete_one("orders", Filter::by_id(id)).await.unwrap(), 1);
        assert_eq!(store.delete_one("orders", Filter::by_id(id)).await.unwrap(), 0);
        assert_eq!(
            store.delete_one("missing", Filter::by_id(id)).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_operation_count_tracks_every_call() {
        let store = InMemoryStore::new();
        assert_eq!(store.operation_count(), 0);
        store.ping().await.unwrap();
        let id = store.insert_one("users", doc! {}).await.unwrap();
        store.find_one("users", Filter::by_id(id)).await.unwrap();
        assert_eq!(store.operation_count(), 3);

        // clones share state
        let clone = store.clone();
        clone.ping().await.unwrap();
        assert_eq!(store.operation_count(), 4);
    }
}
