//! Domain record store over the key-value port.
//!
//! # Responsibility
//! - Map users and owner-scoped records onto whole-collection JSON values.
//! - Own key naming for every persisted collection.
//!
//! # Invariants
//! - Every write re-serializes the full collection under one key.
//! - Missing or undecodable collections read as empty, never as errors.
//! - Writes validate records before touching the store.

pub mod codec;
pub mod collection_repo;
pub mod keys;
pub mod user_repo;

use crate::kv::KvError;
use crate::model::{RecordId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use collection_repo::CollectionRepository;
pub use user_repo::UserRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for record store reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Store(KvError),
    Encode(serde_json::Error),
    NotFound {
        collection: &'static str,
        id: RecordId,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
