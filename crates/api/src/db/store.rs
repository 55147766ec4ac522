//! Document store gateway.
//!
//! [`DocumentStore`] is the only seam between the handlers and the database.
//! It exposes the four single-document operations the API needs, each scoped
//! to a named collection, plus a connectivity ping for readiness checks.
//!
//! Deadlines are not applied here; callers wrap every operation (see
//! [`super::resources::ResourceRepository`]).

use std::future::Future;

use bson::{Bson, Document};
use stockroom_core::ResourceId;
use thiserror::Error;

/// Failure reported by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The `MongoDB` driver reported an error.
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// An insert returned an identifier that is not an object id.
    #[error("store assigned a non-object identifier: {0}")]
    UnexpectedId(Bson),

    /// The backend cannot serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Equality match on a single top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: &'static str,
    value: Bson,
}

impl Filter {
    /// Match the document whose `_id` is `id`.
    #[must_use]
    pub fn by_id(id: ResourceId) -> Self {
        Self::eq("_id", id)
    }

    /// Match documents whose `field` equals `value`.
    pub fn eq(field: &'static str, value: impl Into<Bson>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// The matched field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// The value the field must equal.
    #[must_use]
    pub const fn value(&self) -> &Bson {
        &self.value
    }

    /// Whether `document` satisfies this filter.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        document.get(self.field) == Some(&self.value)
    }

    /// Render as a query document.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert(self.field, self.value.clone());
        document
    }
}

/// Result of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents that matched the filter (0 or 1).
    pub matched: u64,
    /// Documents whose content actually changed.
    pub modified: u64,
    /// Identifier of the document created by an upsert.
    pub upserted_id: Option<ResourceId>,
}

/// Single-document operations against a named collection.
///
/// Implementations must be cheap to clone; clones share the same underlying
/// connection pool or data.
pub trait DocumentStore: Clone + Send + Sync + 'static {
    /// Insert a document and return its identifier.
    ///
    /// If the document has no `_id`, the store assigns one.
    fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> impl Future<Output = Result<ResourceId, StoreError>> + Send;

    /// Fetch the first document matching `filter`.
    ///
    /// `Ok(None)` means nothing matched; it is not an error at this layer.
    fn find_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Apply `$set` with `set` to the first document matching `filter`.
    ///
    /// With `upsert`, a missing document is created from the filter field and
    /// the `set` fields.
    fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> impl Future<Output = Result<UpdateOutcome, StoreError>> + Send;

    /// Delete the first document matching `filter`; returns the deleted count.
    fn delete_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Check that the backend is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
