//! Current-session pointer.
//!
//! # Responsibility
//! - Persist the signed-in user under the well-known `currentUser` key.
//!
//! # Invariants
//! - Presence of a decodable user under the key is the only notion of
//!   "authenticated"; there is no expiry and no token.
//! - A corrupt pointer reads as signed out.

use crate::kv::KeyValueStore;
use crate::model::user::User;
use crate::repo::codec::{decode_document, encode};
use crate::repo::keys::CURRENT_USER_KEY;
use crate::repo::RepoResult;
use log::info;

pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrites any previous session with `user`.
    pub fn set_current_user(&self, user: &User) -> RepoResult<()> {
        self.store.set(CURRENT_USER_KEY, &encode(user)?)?;
        info!("event=session_set module=session status=ok");
        Ok(())
    }

    /// Returns the signed-in user, if any.
    pub fn current_user(&self) -> RepoResult<Option<User>> {
        let raw = self.store.get(CURRENT_USER_KEY)?;
        Ok(decode_document(CURRENT_USER_KEY, raw.as_deref()))
    }

    /// Clears the session pointer. Safe to call when already signed out.
    pub fn logout(&self) -> RepoResult<()> {
        self.store.remove(CURRENT_USER_KEY)?;
        info!("event=session_clear module=session status=ok");
        Ok(())
    }
}
