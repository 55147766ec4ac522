//! User records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;
use crate::ResourceId;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Store-assigned identifier; absent until the user is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    pub email: String,
    /// Set by the server on creation.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check that `name` and `email` are present.
    ///
    /// Only emptiness is checked; the email is not parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming every empty field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.email.is_empty() {
            missing.push("email");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User {
            name: name.to_owned(),
            email: email.to_owned(),
            ..User::default()
        }
    }

    #[test]
    fn test_validate_accepts_name_and_email() {
        assert!(user("Ada", "ada@example.com").validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        assert_eq!(
            user("", "ada@example.com").validate(),
            Err(ValidationError::MissingFields(vec!["name"]))
        );
        let err = user("", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "name and email required");
    }

    #[test]
    fn test_decode_missing_fields_are_zero_valued() {
        let user: User = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(user.name, "Ada");
        assert!(user.email.is_empty());
        assert!(user.id.is_none());
        assert_eq!(user.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn test_encode_omits_unset_id() {
        let json = serde_json::to_value(user("Ada", "ada@example.com")).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["email"], "ada@example.com");

        let mut created = user("Ada", "ada@example.com");
        created.id = Some(ResourceId::parse("65f1c0ffee0ddba11cafe001").unwrap());
        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["id"], "65f1c0ffee0ddba11cafe001");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, created);
    }
}
