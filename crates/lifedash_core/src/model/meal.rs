//! Recipe record.
//!
//! Numeric fields are plain JSON numbers. Stored meals may carry negative,
//! fractional or `null` values, and all of them must decode.

use super::validation::{require_text, ValidationError};
use super::{null_as_default, OwnedRecord, RecordId};
use serde::{Deserialize, Serialize};

/// Entry of a `meals_<userId>` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: RecordId,
    pub name: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    /// Minutes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prep_time: f64,
    /// Minutes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cook_time: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servings: f64,
    pub user_id: RecordId,
}

/// Caller-supplied fields for a new meal.
#[derive(Debug, Clone, PartialEq)]
pub struct MealDraft {
    pub name: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub prep_time: f64,
    pub cook_time: f64,
    pub servings: f64,
}

impl Default for MealDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            instructions: String::new(),
            ingredients: Vec::new(),
            prep_time: 0.0,
            cook_time: 0.0,
            servings: 1.0,
        }
    }
}

impl OwnedRecord for Meal {
    const COLLECTION: &'static str = "meals";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn user_id(&self) -> &RecordId {
        &self.user_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::Meal;

    #[test]
    fn null_numbers_decode_as_zero() {
        let raw = r#"{
            "id": "m1",
            "name": "Soup",
            "instructions": "",
            "ingredients": ["water"],
            "prepTime": null,
            "cookTime": 20,
            "servings": 2,
            "userId": "u1"
        }"#;
        let meal: Meal = serde_json::from_str(raw).unwrap();
        assert_eq!(meal.prep_time, 0.0);
        assert_eq!(meal.cook_time, 20.0);
        assert_eq!(meal.servings, 2.0);
    }

    #[test]
    fn negative_and_fractional_numbers_decode_as_written() {
        let raw = r#"{
            "id": "m2",
            "name": "Stew",
            "instructions": "",
            "ingredients": [],
            "prepTime": -5,
            "cookTime": 12.5,
            "servings": 0,
            "userId": "u1"
        }"#;
        let meal: Meal = serde_json::from_str(raw).unwrap();
        assert_eq!(meal.prep_time, -5.0);
        assert_eq!(meal.cook_time, 12.5);
        assert_eq!(meal.servings, 0.0);
    }
}
