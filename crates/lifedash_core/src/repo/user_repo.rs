//! Global `users` collection.
//!
//! # Invariants
//! - Email uniqueness is not enforced here; registration checks it first.
//! - Users are append-only: never updated, never deleted.
//! - Stored entries that do not decode are kept on append.

use super::codec::{decode_collection, decode_stored, encode};
use super::keys::USERS_KEY;
use super::RepoResult;
use crate::kv::KeyValueStore;
use crate::model::user::User;
use crate::model::RecordId;
use log::info;

pub struct UserRepository<S> {
    store: S,
}

impl<S: KeyValueStore> UserRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns every registered user in registration order.
    pub fn list(&self) -> RepoResult<Vec<User>> {
        let raw = self.store.get(USERS_KEY)?;
        Ok(decode_collection(USERS_KEY, raw.as_deref()))
    }

    /// Appends a new user with a fresh id.
    pub fn create(&self, email: &str, password: &str, name: &str) -> RepoResult<User> {
        let raw = self.store.get(USERS_KEY)?;
        let mut users = decode_stored::<User>(USERS_KEY, raw.as_deref());
        let user = User {
            id: RecordId::generate_unique(users.records().map(|user| &user.id)),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        user.validate()?;

        users.push(user.clone());
        self.store.set(USERS_KEY, &encode(&users)?)?;
        info!(
            "event=user_create module=repo status=ok count={}",
            users.len()
        );
        Ok(user)
    }

    /// First user whose email matches exactly (case-sensitive).
    pub fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.list()?.into_iter().find(|user| user.email == email))
    }
}
