//! Repository for the resources served by the generic handlers.

use std::marker::PhantomData;
use std::time::Duration;

use stockroom_core::ResourceId;

use super::{DocumentStore, Filter, RepositoryError, UpdateOutcome, bounded};
use crate::codec::Resource;

/// Typed, deadline-bounded access to the collection of `R`.
pub struct ResourceRepository<'a, R, S> {
    store: &'a S,
    deadline: Duration,
    resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource, S: DocumentStore> ResourceRepository<'a, R, S> {
    /// Create a repository whose every operation is bounded by `deadline`.
    #[must_use]
    pub const fn new(store: &'a S, deadline: Duration) -> Self {
        Self {
            store,
            deadline,
            resource: PhantomData,
        }
    }

    /// Insert `record` and return the store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` or `RepositoryError::Timeout`.
    pub async fn insert(&self, record: &R) -> Result<ResourceId, RepositoryError> {
        bounded(
            "insert_one",
            R::COLLECTION,
            self.deadline,
            self.store.insert_one(R::COLLECTION, record.to_document()),
        )
        .await
    }

    /// Fetch the record with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no document has this identifier,
    /// `RepositoryError::Codec` if the document cannot be decoded, and
    /// `RepositoryError::Store` or `RepositoryError::Timeout` on store failure.
    pub async fn get(&self, id: ResourceId) -> Result<R, RepositoryError> {
        let document = bounded(
            "find_one",
            R::COLLECTION,
            self.deadline,
            self.store.find_one(R::COLLECTION, Filter::by_id(id)),
        )
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(R::from_document(&document)?)
    }

    /// Overwrite every field of document `id` except its identifier with
    /// the values in `record`.
    ///
    /// A missing document is not an error: the outcome reports zero matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` or `RepositoryError::Timeout`.
    pub async fn replace(&self, id: ResourceId, record: &R) -> Result<UpdateOutcome, RepositoryError> {
        bounded(
            "update_one",
            R::COLLECTION,
            self.deadline,
            self.store
                .update_one(R::COLLECTION, Filter::by_id(id), record.to_update(), false),
        )
        .await
    }

    /// Delete document `id`; returns how many documents were removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` or `RepositoryError::Timeout`.
    pub async fn delete(&self, id: ResourceId) -> Result<u64, RepositoryError> {
        bounded(
            "delete_one",
            R::COLLECTION,
            self.deadline,
            self.store.delete_one(R::COLLECTION, Filter::by_id(id)),
        )
        .await
    }
}
