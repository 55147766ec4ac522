//! Product document mapping.
//!
//! Prices are stored as doubles so that other clients of the collection see
//! a plain number.

use bson::{Document, doc};
use chrono::{DateTime, Utc};
use stockroom_core::{Product, ResourceId};

use super::{
    CodecError, ID_FIELD, Resource, read_f64, read_optional_id, read_string, read_timestamp,
    timestamp,
};

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const KIND: &'static str = "product";

    fn id(&self) -> Option<ResourceId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ResourceId>) {
        self.id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
    }

    fn to_fields(&self) -> Document {
        doc! {
            "name": &self.name,
            "description": &self.description,
            "price": self.price,
        }
    }

    fn server_fields(&self) -> Document {
        doc! { "created_at": timestamp(self.created_at) }
    }

    fn from_document(document: &Document) -> Result<Self, CodecError> {
        Ok(Self {
            id: read_optional_id(document, ID_FIELD)?,
            name: read_string(document, "name")?,
            description: read_string(document, "description")?,
            price: read_f64(document, "price")?,
            created_at: read_timestamp(document, "created_at")?,
        })
    }
}
