//! Product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ResourceId;

/// A catalog product. No field is required.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    pub description: String,
    /// Unit price. Any finite JSON number is accepted and echoed back
    /// unchanged; the store keeps the same double.
    pub price: f64,
    pub created_at: DateTime<Utc>,
}
