//! Order document mapping.

use bson::{Document, doc};
use chrono::{DateTime, Utc};
use stockroom_core::{Order, ResourceId};

use super::{
    CodecError, ID_FIELD, Resource, read_i64, read_id, read_optional_id, read_timestamp, timestamp,
};

impl Resource for Order {
    const COLLECTION: &'static str = "orders";
    const KIND: &'static str = "order";

    fn id(&self) -> Option<ResourceId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ResourceId>) {
        self.id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>) {
        self.order_date = now;
    }

    fn to_fields(&self) -> Document {
        doc! {
            "user_id": self.user_id,
            "product_id": self.product_id,
            "quantity": self.quantity,
        }
    }

    fn server_fields(&self) -> Document {
        doc! { "order_date": timestamp(self.order_date) }
    }

    fn from_document(document: &Document) -> Result<Self, CodecError> {
        Ok(Self {
            id: read_optional_id(document, ID_FIELD)?,
            user_id: read_id(document, "user_id")?,
            product_id: read_id(document, "product_id")?,
            quantity: read_i64(document, "quantity")?,
            order_date: read_timestamp(document, "order_date")?,
        })
    }
}
