//! Owner-scoped collections (`tasks_<userId>`, `notes_<userId>`, ...).
//!
//! # Invariants
//! - `insert` assigns an id not present in the owner's collection.
//! - `insert` and `update` rewrite the whole collection; elements other
//!   than the target are written back as read, including elements that do
//!   not decode as `E`.
//! - `replace_all` is the only operation that drops stored elements.
//! - Insertion order is preserved.

use super::codec::{decode_stored, encode, StoredCollection};
use super::keys::collection_key;
use super::{RepoError, RepoResult};
use crate::kv::KeyValueStore;
use crate::model::{OwnedRecord, RecordId, ValidationError};
use log::{debug, info};
use serde::Serialize;
use std::marker::PhantomData;

/// Read-replace repository for one record type.
pub struct CollectionRepository<S, E> {
    store: S,
    _record: PhantomData<fn() -> E>,
}

impl<S: KeyValueStore, E: OwnedRecord> CollectionRepository<S, E> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Returns the owner's full collection in insertion order.
    pub fn list(&self, owner_id: &RecordId) -> RepoResult<Vec<E>> {
        Ok(self.load(owner_id)?.into_records())
    }

    /// Finds one record by id with an in-memory scan.
    pub fn get(&self, owner_id: &RecordId, id: &RecordId) -> RepoResult<Option<E>> {
        Ok(self
            .list(owner_id)?
            .into_iter()
            .find(|record| record.id() == id))
    }

    /// Appends a record built around a freshly assigned id.
    ///
    /// `build` receives the new id and must return a record owned by
    /// `owner_id`.
    pub fn insert(
        &self,
        owner_id: &RecordId,
        build: impl FnOnce(RecordId) -> E,
    ) -> RepoResult<E> {
        let mut records = self.load(owner_id)?;
        let id = RecordId::generate_unique(records.records().map(|record| record.id()));
        let record = build(id);
        check_record(owner_id, &record)?;

        records.push(record.clone());
        self.write(owner_id, &records)?;
        info!(
            "event=record_create module=repo status=ok collection={} count={} unreadable={}",
            E::COLLECTION,
            records.len(),
            records.unreadable_count()
        );
        Ok(record)
    }

    /// Applies `mutate` to one record and writes the collection back.
    ///
    /// Unknown ids return `NotFound` without writing.
    pub fn update(
        &self,
        owner_id: &RecordId,
        id: &RecordId,
        mutate: impl FnOnce(&mut E),
    ) -> RepoResult<E> {
        let mut records = self.load(owner_id)?;
        let target = records
            .records_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| RepoError::NotFound {
                collection: E::COLLECTION,
                id: id.clone(),
            })?;

        mutate(target);
        if target.id() != id {
            return Err(ValidationError::IdChanged.into());
        }
        check_record(owner_id, target)?;
        let updated = target.clone();

        self.write(owner_id, &records)?;
        debug!(
            "event=record_update module=repo status=ok collection={}",
            E::COLLECTION
        );
        Ok(updated)
    }

    /// Overwrites the owner's collection with `records`.
    pub fn replace_all(&self, owner_id: &RecordId, records: &[E]) -> RepoResult<()> {
        for record in records {
            check_record(owner_id, record)?;
        }
        self.write(owner_id, records)
    }

    fn load(&self, owner_id: &RecordId) -> RepoResult<StoredCollection<E>> {
        let key = collection_key(E::COLLECTION, owner_id);
        let raw = self.store.get(&key)?;
        Ok(decode_stored(&key, raw.as_deref()))
    }

    fn write<T: Serialize + ?Sized>(&self, owner_id: &RecordId, records: &T) -> RepoResult<()> {
        let key = collection_key(E::COLLECTION, owner_id);
        let raw = encode(records)?;
        self.store.set(&key, &raw)?;
        Ok(())
    }
}

fn check_record<E: OwnedRecord>(owner_id: &RecordId, record: &E) -> RepoResult<()> {
    if record.user_id() != owner_id {
        return Err(ValidationError::OwnerMismatch.into());
    }
    record.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CollectionRepository;
    use crate::kv::{KeyValueStore, MemoryStore};
    use crate::model::meal::Meal;
    use crate::model::{RecordId, ValidationError};
    use crate::repo::RepoError;

    fn meal(id: RecordId, owner: &RecordId, name: &str) -> Meal {
        Meal {
            id,
            name: name.to_string(),
            instructions: String::new(),
            ingredients: vec!["rice".to_string()],
            prep_time: 5.0,
            cook_time: 10.0,
            servings: 2.0,
            user_id: owner.clone(),
        }
    }

    #[test]
    fn insert_appends_under_owner_key() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::<_, Meal>::new(&store);
        let owner = RecordId::new("u1");

        let first = repo.insert(&owner, |id| meal(id, &owner, "Rice")).unwrap();
        let second = repo.insert(&owner, |id| meal(id, &owner, "Soup")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.list(&owner).unwrap(), vec![first, second]);
        assert_eq!(store.keys(), vec!["meals_u1".to_string()]);
    }

    #[test]
    fn get_finds_record_by_id() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::<_, Meal>::new(&store);
        let owner = RecordId::new("u1");
        repo.insert(&owner, |id| meal(id, &owner, "Rice")).unwrap();
        let soup = repo.insert(&owner, |id| meal(id, &owner, "Soup")).unwrap();

        assert_eq!(repo.get(&owner, &soup.id).unwrap(), Some(soup));
        assert_eq!(repo.get(&owner, &RecordId::new("nope")).unwrap(), None);
    }

    #[test]
    fn insert_rejects_foreign_owner_without_writing() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::<_, Meal>::new(&store);
        let owner = RecordId::new("u1");
        let other = RecordId::new("u2");

        let err = repo
            .insert(&owner, |id| meal(id, &other, "Rice"))
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::OwnerMismatch)
        ));
        assert_eq!(store.get("meals_u1").unwrap(), None);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::<_, Meal>::new(&store);
        let owner = RecordId::new("u1");
        repo.insert(&owner, |id| meal(id, &owner, "Rice")).unwrap();
        let before = store.get("meals_u1").unwrap();

        let err = repo
            .update(&owner, &RecordId::new("missing"), |meal| meal.servings = 9.0)
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound { collection: "meals", .. }));
        assert_eq!(store.get("meals_u1").unwrap(), before);
    }

    #[test]
    fn update_rejects_id_change() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::<_, Meal>::new(&store);
        let owner = RecordId::new("u1");
        let created = repo.insert(&owner, |id| meal(id, &owner, "Rice")).unwrap();

        let err = repo
            .update(&owner, &created.id, |meal| meal.id = RecordId::new("other"))
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::IdChanged)
        ));
        assert_eq!(repo.list(&owner).unwrap(), vec![created]);
    }

    #[test]
    fn insert_keeps_stored_elements_it_cannot_read() {
        let store = MemoryStore::new();
        store
            .set(
                "meals_u1",
                r#"[{"id":"old","name":"Legacy","userId":"u1","ingredients":"not-a-list"}]"#,
            )
            .unwrap();
        let repo = CollectionRepository::<_, Meal>::new(&store);
        let owner = RecordId::new("u1");

        assert!(repo.list(&owner).unwrap().is_empty());
        let created = repo.insert(&owner, |id| meal(id, &owner, "Rice")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&store.get("meals_u1").unwrap().unwrap()).unwrap();
        assert_eq!(raw.as_array().map(Vec::len), Some(2));
        assert_eq!(raw[0]["id"], "old");
        assert_eq!(raw[0]["ingredients"], "not-a-list");
        assert_eq!(raw[1]["id"], created.id.as_str());
        assert_eq!(repo.list(&owner).unwrap(), vec![created]);
    }
}
