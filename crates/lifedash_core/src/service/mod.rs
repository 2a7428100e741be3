//! Use-case services.
//!
//! # Responsibility
//! - Turn record store calls into the actions a host UI performs.
//! - Map repository failures onto user-presentable errors.
//!
//! # Invariants
//! - A failed validation performs no write.
//! - Services stay storage-agnostic: any `KeyValueStore` works.

pub mod auth_service;
pub mod clock;
pub mod dashboard_service;
pub mod meal_service;
pub mod note_service;
pub mod task_service;
pub mod workout_service;

use crate::model::RecordId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by service calls.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected; the message is safe to show to the user.
    Validation(String),
    /// Target record does not exist in the owner's collection.
    NotFound {
        collection: &'static str,
        id: RecordId,
    },
    /// Storage or encoding failure.
    Repo(RepoError),
}

impl ServiceError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err.to_string()),
            RepoError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Repo(other),
        }
    }
}
