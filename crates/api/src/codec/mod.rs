//! Conversions between wire payloads, resource records and stored documents.
//!
//! Each persisted resource implements [`Resource`], which tells the generic
//! handlers everything that differs between resource types: collection name,
//! validation, and how the record maps onto a store document.
//!
//! Stored documents are read leniently, the way the wire format is: a missing
//! field becomes its zero value. A field holding the wrong BSON type is an
//! error.

pub mod inventory;
pub mod order;
pub mod product;
pub mod user;

use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stockroom_core::{ResourceId, ValidationError};
use thiserror::Error;

/// Name of the identifier field in stored documents.
pub const ID_FIELD: &str = "_id";

/// Failure converting a payload or document into a record.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The request body is not valid JSON for the resource.
    #[error("malformed request body: {0}")]
    Body(#[from] serde_json::Error),

    /// A stored field has a BSON type the record cannot hold.
    #[error("field `{field}` has unexpected type {found:?}")]
    FieldType {
        field: &'static str,
        found: bson::spec::ElementType,
    },
}

/// Capability interface for a resource type served by the generic handlers.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Store collection holding this resource.
    const COLLECTION: &'static str;

    /// Singular label used in client-facing messages (e.g. `"user"`).
    const KIND: &'static str;

    /// The store-assigned identifier, if the record has one.
    fn id(&self) -> Option<ResourceId>;

    /// Replace the identifier.
    fn set_id(&mut self, id: Option<ResourceId>);

    /// Set the server-owned timestamp before insertion.
    fn stamp(&mut self, now: DateTime<Utc>);

    /// Reject records missing required fields. Accepts everything by default.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the missing fields.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Fields a client supplies on create. Every field is present even when
    /// it holds its zero value.
    fn to_fields(&self) -> Document;

    /// Fields stamped by the server on create, other than the identifier.
    fn server_fields(&self) -> Document;

    /// Read a record back from a stored document.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::FieldType`] if a field has the wrong type.
    fn from_document(document: &Document) -> Result<Self, CodecError>;

    /// The full stored form: identifier (when set), client fields, server
    /// fields.
    fn to_document(&self) -> Document {
        let mut document = Document::new();
        if let Some(id) = self.id() {
            document.insert(ID_FIELD, id);
        }
        for (key, value) in self.to_update() {
            document.insert(key, value);
        }
        document
    }

    /// The `$set` payload of an update: every field except the identifier.
    /// The whole decoded record is written, so a field missing from the
    /// request body, `created_at` included, is reset to its zero value.
    fn to_update(&self) -> Document {
        let mut document = self.to_fields();
        for (key, value) in self.server_fields() {
            document.insert(key, value);
        }
        document
    }
}

/// Decode a request body.
///
/// An empty body decodes as `{}`, so every field takes its zero value.
///
/// # Errors
///
/// Returns [`CodecError::Body`] if the body is not valid JSON for `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CodecError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"{}")?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Current time truncated to the store's millisecond resolution.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Store form of a timestamp.
#[must_use]
pub fn timestamp(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_chrono(value)
}

fn unexpected(field: &'static str, value: &Bson) -> CodecError {
    CodecError::FieldType {
        field,
        found: value.element_type(),
    }
}

fn field<'a>(document: &'a Document, name: &str) -> Option<&'a Bson> {
    match document.get(name) {
        None | Some(Bson::Null) => None,
        present => present,
    }
}

pub(crate) fn read_string(document: &Document, name: &'static str) -> Result<String, CodecError> {
    match field(document, name) {
        None => Ok(String::new()),
        Some(Bson::String(value)) => Ok(value.clone()),
        Some(other) => Err(unexpected(name, other)),
    }
}

/// Whether `value` is an integral double within `i64` range.
#[allow(clippy::cast_precision_loss)]
fn is_whole_i64(value: f64) -> bool {
    value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn read_i64(document: &Document, name: &'static str) -> Result<i64, CodecError> {
    match field(document, name) {
        None => Ok(0),
        Some(Bson::Int32(value)) => Ok(i64::from(*value)),
        Some(Bson::Int64(value)) => Ok(*value),
        Some(Bson::Double(value)) if is_whole_i64(*value) => Ok(*value as i64),
        Some(other) => Err(unexpected(name, other)),
    }
}

/// Read a number as a double. Stored doubles come back bit-for-bit.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn read_f64(document: &Document, name: &'static str) -> Result<f64, CodecError> {
    match field(document, name) {
        None => Ok(0.0),
        Some(Bson::Int32(value)) => Ok(f64::from(*value)),
        Some(Bson::Int64(value)) => Ok(*value as f64),
        Some(Bson::Double(value)) => Ok(*value),
        Some(other) => Err(unexpected(name, other)),
    }
}

pub(crate) fn read_id(document: &Document, name: &'static str) -> Result<ResourceId, CodecError> {
    read_optional_id(document, name).map(Option::unwrap_or_default)
}

pub(crate) fn read_optional_id(
    document: &Document,
    name: &'static str,
) -> Result<Option<ResourceId>, CodecError> {
    match field(document, name) {
        None => Ok(None),
        Some(Bson::ObjectId(oid)) => Ok(Some((*oid).into())),
        Some(other) => Err(unexpected(name, other)),
    }
}

pub(crate) fn read_timestamp(
    document: &Document,
    name: &'static str,
) -> Result<DateTime<Utc>, CodecError> {
    match field(document, name) {
        None => Ok(DateTime::<Utc>::default()),
        Some(Bson::DateTime(value)) => Ok(value.to_chrono()),
        Some(other) => Err(unexpected(name, other)),
    }
}
