//! User document mapping.

use bson::{Document, doc};
use chrono::{DateTime, Utc};
use stockroom_core::{ResourceId, User, ValidationError};

use super::{CodecError, ID_FIELD, Resource, read_optional_id, read_string, read_timestamp, timestamp};

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const KIND: &'static str = "user";

    fn id(&self) -> Option<ResourceId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ResourceId>) {
        self.id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Self::validate(self)
    }

    fn to_fields(&self) -> Document {
        doc! {
            "name": &self.name,
            "email": &self.email,
        }
    }

    fn server_fields(&self) -> Document {
        doc! { "created_at": timestamp(self.created_at) }
    }

    fn from_document(document: &Document) -> Result<Self, CodecError> {
        Ok(Self {
            id: read_optional_id(document, ID_FIELD)?,
            name: read_string(document, "name")?,
            email: read_string(document, "email")?,
            created_at: read_timestamp(document, "created_at")?,
        })
    }
}
