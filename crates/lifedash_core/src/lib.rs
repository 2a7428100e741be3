//! Core domain logic for LifeDash.
//! Tasks, notes, meals and workouts per user, persisted through a pluggable
//! synchronous key-value store.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use kv::{KeyValueStore, KvError, KvResult, MemoryStore, SqliteStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::meal::{Meal, MealDraft};
pub use model::note::Note;
pub use model::task::{Task, TaskDraft};
pub use model::user::User;
pub use model::workout::{Exercise, ExerciseDraft, Workout, WorkoutDraft};
pub use model::{OwnedRecord, RecordId, ValidationError};
pub use repo::{CollectionRepository, RepoError, RepoResult, UserRepository};
pub use service::auth_service::{AuthService, AuthState};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::dashboard_service::{DashboardMetrics, DashboardService};
pub use service::meal_service::MealService;
pub use service::note_service::NoteService;
pub use service::task_service::TaskService;
pub use service::workout_service::WorkoutService;
pub use service::{ServiceError, ServiceResult};
pub use session::SessionStore;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
