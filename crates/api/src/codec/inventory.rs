//! Inventory document mapping.
//!
//! Inventory is not a [`super::Resource`]: it is never created or read through
//! the API, only upserted by product reference.

use bson::{Document, doc};
use stockroom_core::Inventory;

use crate::db::Filter;

/// Collection holding inventory levels.
pub const COLLECTION: &str = "inventory";

/// Field holding the natural key.
pub const PRODUCT_FIELD: &str = "product_id";

/// Filter selecting the inventory document of `inventory.product_id`.
#[must_use]
pub fn product_filter(inventory: &Inventory) -> Filter {
    Filter::eq(PRODUCT_FIELD, inventory.product_id)
}

/// The `$set` payload: the quantity and nothing else.
#[must_use]
pub fn quantity_fields(inventory: &Inventory) -> Document {
    doc! { "quantity": inventory.quantity }
}
