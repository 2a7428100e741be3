//! Note use-cases.
//!
//! # Invariants
//! - New notes start with empty content and `created_at == updated_at`.
//! - Content edits replace the whole markup string and refresh `updated_at`.

use super::clock::{Clock, SystemClock};
use super::ServiceResult;
use crate::kv::KeyValueStore;
use crate::model::note::Note;
use crate::model::RecordId;
use crate::repo::CollectionRepository;

pub struct NoteService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> NoteService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn list(&self, owner_id: &RecordId) -> ServiceResult<Vec<Note>> {
        Ok(self.repo().list(owner_id)?)
    }

    /// Creates an empty note titled `title` (trimmed, non-blank).
    pub fn create(&self, owner_id: &RecordId, title: &str) -> ServiceResult<Note> {
        let now = self.clock.now();
        let note = self.repo().insert(owner_id, |id| Note {
            id,
            title: title.trim().to_string(),
            content: String::new(),
            created_at: now,
            updated_at: now,
            user_id: owner_id.clone(),
        })?;
        Ok(note)
    }

    /// Replaces the note markup and bumps `updated_at`.
    pub fn update_content(
        &self,
        owner_id: &RecordId,
        note_id: &RecordId,
        content: impl Into<String>,
    ) -> ServiceResult<Note> {
        let content = content.into();
        let now = self.clock.now();
        let note = self.repo().update(owner_id, note_id, |note| {
            note.content = content;
            note.updated_at = now;
        })?;
        Ok(note)
    }

    fn repo(&self) -> CollectionRepository<&S, Note> {
        CollectionRepository::new(&self.store)
    }
}
