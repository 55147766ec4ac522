//! Resource identifiers.
//!
//! Every persisted resource is identified by a 12-byte token assigned by the
//! store. Externally it always travels as a 24-character hex string.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`ResourceId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is not exactly 24 characters long.
    #[error("identifier must be {expected} hex characters (got {actual})")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },
    /// The input contains a non-hex character.
    #[error("identifier must contain only hex characters")]
    InvalidHex,
}

/// A store-assigned resource identifier.
///
/// Internally a fixed 12-byte value; serialized as lowercase hex. The all-zero
/// identifier (the [`Default`]) stands in for references that a payload left
/// out.
///
/// ## Examples
///
/// ```
/// use stockroom_core::ResourceId;
///
/// let id = ResourceId::parse("65f1c0ffee0ddba11cafe001").unwrap();
/// assert_eq!(id.to_string(), "65f1c0ffee0ddba11cafe001");
///
/// assert!(ResourceId::parse("abc").is_err());                       // too short
/// assert!(ResourceId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());  // not hex
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourceId([u8; ResourceId::BYTES]);

impl ResourceId {
    /// Size of the binary form.
    pub const BYTES: usize = 12;

    /// Length of the hex form.
    pub const HEX_LENGTH: usize = Self::BYTES * 2;

    /// Parse an identifier from its hex form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 24 hex characters.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.len() != Self::HEX_LENGTH {
            return Err(IdError::InvalidLength {
                expected: Self::HEX_LENGTH,
                actual: s.len(),
            });
        }

        let mut bytes = [0_u8; Self::BYTES];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| IdError::InvalidHex)?;
        Ok(Self(bytes))
    }

    /// Wrap raw identifier bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::BYTES]) -> Self {
        Self(bytes)
    }

    /// Get the raw identifier bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; Self::BYTES] {
        self.0
    }

    /// Returns `true` for the all-zero identifier.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Encode as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ResourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "bson")]
impl From<ResourceId> for ::bson::oid::ObjectId {
    fn from(id: ResourceId) -> Self {
        Self::from_bytes(id.0)
    }
}

#[cfg(feature = "bson")]
impl From<::bson::oid::ObjectId> for ResourceId {
    fn from(oid: ::bson::oid::ObjectId) -> Self {
        Self(oid.bytes())
    }
}

#[cfg(feature = "bson")]
impl From<ResourceId> for ::bson::Bson {
    fn from(id: ResourceId) -> Self {
        Self::ObjectId(id.into())
    }
}
