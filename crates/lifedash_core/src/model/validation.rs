//! Record validation errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a record is rejected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty.
    MissingField(&'static str),
    /// The record's owner does not match the collection it is written to.
    OwnerMismatch,
    /// An update tried to change a record's id.
    IdChanged,
    /// Two exercises inside one workout share an id.
    DuplicateExerciseId(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::OwnerMismatch => write!(f, "record owner does not match collection owner"),
            Self::IdChanged => write!(f, "record id cannot change"),
            Self::DuplicateExerciseId(id) => write!(f, "duplicate exercise id `{id}`"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Like `require_text`, but whitespace counts as a value.
pub(crate) fn require_present(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}
