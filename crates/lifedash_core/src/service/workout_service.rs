//! Workout use-cases.

use super::clock::{Clock, SystemClock};
use super::ServiceResult;
use crate::kv::KeyValueStore;
use crate::model::workout::{Exercise, Workout, WorkoutDraft};
use crate::model::RecordId;
use crate::repo::CollectionRepository;

pub struct WorkoutService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> WorkoutService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> WorkoutService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn list(&self, owner_id: &RecordId) -> ServiceResult<Vec<Workout>> {
        Ok(self.repo().list(owner_id)?)
    }

    /// Saves a workout dated `draft.date` or today (UTC).
    ///
    /// Each exercise gets an id unique within this workout.
    pub fn create(&self, owner_id: &RecordId, draft: WorkoutDraft) -> ServiceResult<Workout> {
        let date = draft.date.unwrap_or_else(|| self.clock.today());
        let mut exercises: Vec<Exercise> = Vec::with_capacity(draft.exercises.len());
        for exercise in draft.exercises {
            let id = RecordId::generate_unique(exercises.iter().map(|existing| &existing.id));
            exercises.push(Exercise {
                id,
                name: exercise.name,
                sets: exercise.sets,
                reps: exercise.reps,
                weight: exercise.weight,
            });
        }

        let workout = self.repo().insert(owner_id, |id| Workout {
            id,
            name: draft.name,
            date,
            exercises,
            user_id: owner_id.clone(),
        })?;
        Ok(workout)
    }

    fn repo(&self) -> CollectionRepository<&S, Workout> {
        CollectionRepository::new(&self.store)
    }
}
