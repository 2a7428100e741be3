//! Per-user summary counts.

use super::ServiceResult;
use crate::kv::KeyValueStore;
use crate::model::meal::Meal;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::model::workout::Workout;
use crate::model::RecordId;
use crate::repo::CollectionRepository;
use serde::Serialize;

/// Counts derived from the owner's collections. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_notes: usize,
    pub total_meals: usize,
    pub total_workouts: usize,
}

pub struct DashboardService<S> {
    store: S,
}

impl<S: KeyValueStore> DashboardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn metrics(&self, owner_id: &RecordId) -> ServiceResult<DashboardMetrics> {
        let tasks = CollectionRepository::<_, Task>::new(&self.store).list(owner_id)?;
        Ok(DashboardMetrics {
            total_tasks: tasks.len(),
            completed_tasks: tasks.iter().filter(|task| task.completed).count(),
            total_notes: CollectionRepository::<_, Note>::new(&self.store)
                .list(owner_id)?
                .len(),
            total_meals: CollectionRepository::<_, Meal>::new(&self.store)
                .list(owner_id)?
                .len(),
            total_workouts: CollectionRepository::<_, Workout>::new(&self.store)
                .list(owner_id)?
                .len(),
        })
    }
}
