//! To-do record.

use super::validation::{require_text, ValidationError};
use super::{OwnedRecord, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry of a `tasks_<userId>` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(with = "super::time::rfc3339_millis")]
    pub created_at: DateTime<Utc>,
    pub user_id: RecordId,
}

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
        }
    }
}

impl OwnedRecord for Task {
    const COLLECTION: &'static str = "tasks";

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
