//! Workout session record and its exercises.

use super::validation::{require_text, ValidationError};
use super::{null_as_default, OwnedRecord, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Entry of a `workouts_<userId>` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: RecordId,
    pub name: String,
    /// Calendar day, stored as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    pub user_id: RecordId,
}

/// One exercise line. Owned by exactly one workout.
///
/// `sets` and `reps` are plain JSON numbers like `weight`; stored exercises
/// may hold fractional or negative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: RecordId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reps: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
}

/// Caller-supplied fields for a new workout.
///
/// `date = None` means today (UTC).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutDraft {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub exercises: Vec<ExerciseDraft>,
}

/// Caller-supplied fields for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: f64,
    pub reps: f64,
    pub weight: f64,
}

impl Default for ExerciseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            sets: 3.0,
            reps: 10.0,
            weight: 0.0,
        }
    }
}

impl OwnedRecord for Workout {
    const COLLECTION: &'static str = "workouts";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn user_id(&self) -> &RecordId {
        &self.user_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        let mut seen = HashSet::new();
        for exercise in &self.exercises {
            if !seen.insert(&exercise.id) {
                return Err(ValidationError::DuplicateExerciseId(
                    exercise.id.to_string(),
                ));
            }
        }
        Ok(())
    }
}
