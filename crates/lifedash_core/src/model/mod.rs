//! Domain records persisted by the life dashboard.
//!
//! # Responsibility
//! - Define the serialized shape of users and owner-scoped records.
//! - Validate records before they reach the store.
//!
//! # Invariants
//! - Every record is identified by a `RecordId` unique within its collection.
//! - Owner-scoped records carry the `user_id` of the collection they live in.
//! - Field names serialize in camelCase so stored documents stay compatible
//!   with the existing `users` / `tasks_<userId>` layout.

pub mod id;
pub mod meal;
pub mod note;
pub mod task;
pub mod time;
pub mod user;
pub mod validation;
pub mod workout;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use id::RecordId;
pub use validation::ValidationError;

/// Deserializes `null` (or a missing field) as the type's default.
///
/// Older documents may carry `null` where a number failed to parse.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A record stored in a per-user collection under `<COLLECTION>_<userId>`.
pub trait OwnedRecord: Serialize + DeserializeOwned + Clone {
    /// Collection prefix used in the storage key.
    const COLLECTION: &'static str;

    fn id(&self) -> &RecordId;
    fn user_id(&self) -> &RecordId;
    fn validate(&self) -> Result<(), ValidationError>;
}
