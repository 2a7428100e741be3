//! Storage key naming.

use crate::model::RecordId;

/// Global user collection.
pub const USERS_KEY: &str = "users";
/// Current-session pointer.
pub const CURRENT_USER_KEY: &str = "currentUser";

const OWNER_SEPARATOR: char = '_';

/// Key of an owner-scoped collection, e.g. `tasks_k3j9x0a1b`.
pub fn collection_key(collection: &str, owner_id: &RecordId) -> String {
    format!("{collection}{OWNER_SEPARATOR}{owner_id}")
}
