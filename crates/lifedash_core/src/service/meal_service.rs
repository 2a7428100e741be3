//! Meal (recipe) use-cases.

use super::ServiceResult;
use crate::kv::KeyValueStore;
use crate::model::meal::{Meal, MealDraft};
use crate::model::RecordId;
use crate::repo::CollectionRepository;

pub struct MealService<S> {
    store: S,
}

impl<S: KeyValueStore> MealService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list(&self, owner_id: &RecordId) -> ServiceResult<Vec<Meal>> {
        Ok(self.repo().list(owner_id)?)
    }

    /// Saves a recipe. The name is stored as given; blank ingredient lines
    /// (empty strings) are dropped and order is kept.
    pub fn create(&self, owner_id: &RecordId, draft: MealDraft) -> ServiceResult<Meal> {
        let ingredients = draft
            .ingredients
            .into_iter()
            .filter(|ingredient| !ingredient.is_empty())
            .collect();
        let meal = self.repo().insert(owner_id, |id| Meal {
            id,
            name: draft.name,
            instructions: draft.instructions,
            ingredients,
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings,
            user_id: owner_id.clone(),
        })?;
        Ok(meal)
    }

    fn repo(&self) -> CollectionRepository<&S, Meal> {
        CollectionRepository::new(&self.store)
    }
}
