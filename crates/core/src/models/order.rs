//! Order records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ResourceId;

/// An order of one product by one user.
///
/// `user_id` and `product_id` are plain references: nothing checks that they
/// point at existing documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub user_id: ResourceId,
    pub product_id: ResourceId,
    pub quantity: i64,
    /// Set by the server on creation.
    pub order_date: DateTime<Utc>,
}
