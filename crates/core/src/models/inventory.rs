//! Inventory levels.

use serde::{Deserialize, Serialize};

use crate::ResourceId;

/// Stock level of one product.
///
/// Keyed by `product_id`; inventory documents are never addressed by their
/// own identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub product_id: ResourceId,
    pub quantity: i64,
}
