//! Repository for inventory levels.

use std::time::Duration;

use stockroom_core::Inventory;

use super::{DocumentStore, RepositoryError, UpdateOutcome, bounded};
use crate::codec::inventory::{COLLECTION, product_filter, quantity_fields};

/// Deadline-bounded access to the `inventory` collection.
pub struct InventoryRepository<'a, S> {
    store: &'a S,
    deadline: Duration,
}

impl<'a, S: DocumentStore> InventoryRepository<'a, S> {
    /// Create a repository whose every operation is bounded by `deadline`.
    #[must_use]
    pub const fn new(store: &'a S, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    /// Set the stock level of `inventory.product_id`, creating the inventory
    /// document if the product has none. Only `quantity` is written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` or `RepositoryError::Timeout`.
    pub async fn set_quantity(
        &self,
        inventory: &Inventory,
    ) -> Result<UpdateOutcome, RepositoryError> {
        bounded(
            "update_one",
            COLLECTION,
            self.deadline,
            self.store.update_one(
                COLLECTION,
                product_filter(inventory),
                quantity_fields(inventory),
                true,
            ),
        )
        .await
    }
}
