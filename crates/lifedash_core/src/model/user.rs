//! Registered account record.
//!
//! Passwords are stored and compared as plaintext to stay compatible with
//! existing stores. This is not a security boundary.
//!
//! The core accepts any non-empty email. `is_valid_email` is the shape check
//! host forms apply before calling in.

use super::validation::{require_present, ValidationError};
use super::RecordId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid email regex"));

/// Entry of the global `users` collection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl User {
    /// Checks that every field is non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_present("email", &self.email)?;
        require_present("password", &self.password)?;
        require_present("name", &self.name)
    }

    /// Exact, case-sensitive plaintext comparison.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

// Keeps passwords out of logs and panic messages.
impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Returns whether `value` has the `local@domain` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, User};
    use crate::model::{RecordId, ValidationError};

    fn user(email: &str, password: &str, name: &str) -> User {
        User {
            id: RecordId::new("u1"),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn validate_requires_every_field() {
        assert_eq!(
            user("", "x", "A").validate(),
            Err(ValidationError::MissingField("email"))
        );
        assert_eq!(
            user("a@b.com", "", "A").validate(),
            Err(ValidationError::MissingField("password"))
        );
        assert_eq!(
            user("a@b.com", "x", "").validate(),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(user("a@b.com", "x", "A").validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_whitespace_and_unshaped_email() {
        assert_eq!(user(" ", " ", " ").validate(), Ok(()));
        assert_eq!(user("not-an-email", "x", "A").validate(), Ok(()));
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@localhost"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@signs"));
        assert!(!is_valid_email("space in@b.com"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", user("a@b.com", "hunter2", "A"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn decodes_stored_layout() {
        let raw = r#"{"id":"k3j9x0a1b","email":"a@b.com","password":"x","name":"A"}"#;
        let decoded: User = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.id.as_str(), "k3j9x0a1b");
        assert!(decoded.password_matches("x"));
        assert!(!decoded.password_matches("X"));
    }
}
