//! Task use-cases.
//!
//! # Invariants
//! - New tasks start with `completed = false` and a `created_at` stamp.
//! - Completion changes touch only `completed` on the target task.

use super::clock::{Clock, SystemClock};
use super::ServiceResult;
use crate::kv::KeyValueStore;
use crate::model::task::{Task, TaskDraft};
use crate::model::RecordId;
use crate::repo::CollectionRepository;

pub struct TaskService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> TaskService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn list(&self, owner_id: &RecordId) -> ServiceResult<Vec<Task>> {
        Ok(self.repo().list(owner_id)?)
    }

    /// Appends an open task. The title is stored as given and must not be
    /// blank.
    pub fn create(&self, owner_id: &RecordId, draft: TaskDraft) -> ServiceResult<Task> {
        let created_at = self.clock.now();
        let task = self.repo().insert(owner_id, |id| Task {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            created_at,
            user_id: owner_id.clone(),
        })?;
        Ok(task)
    }

    pub fn set_completed(
        &self,
        owner_id: &RecordId,
        task_id: &RecordId,
        completed: bool,
    ) -> ServiceResult<Task> {
        let task = self
            .repo()
            .update(owner_id, task_id, |task| task.completed = completed)?;
        Ok(task)
    }

    /// Flips `completed` and returns the updated task.
    pub fn toggle(&self, owner_id: &RecordId, task_id: &RecordId) -> ServiceResult<Task> {
        let task = self
            .repo()
            .update(owner_id, task_id, |task| task.completed = !task.completed)?;
        Ok(task)
    }

    fn repo(&self) -> CollectionRepository<&S, Task> {
        CollectionRepository::new(&self.store)
    }
}
