//! Rich-text note record.

use super::validation::{require_text, ValidationError};
use super::{OwnedRecord, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry of a `notes_<userId>` collection.
///
/// `content` holds editor markup (HTML) verbatim; it is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(with = "super::time::rfc3339_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::time::rfc3339_millis")]
    pub updated_at: DateTime<Utc>,
    pub user_id: RecordId,
}

impl OwnedRecord for Note {
    const COLLECTION: &'static str = "notes";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn user_id(&self) -> &RecordId {
        &self.user_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}
