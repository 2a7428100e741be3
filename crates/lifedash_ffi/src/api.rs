//! Use-case API for the host UI shell.
//!
//! # Responsibility
//! - Expose sync, use-case-level functions over the configured store file.
//! - Resolve the record owner from the current-session pointer.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Failures are reported as `ok = false` plus a message; validation
//!   messages are passed through unchanged so the UI can show them inline.
//! - Passwords never leave the core through this API.

use lifedash_core::db::open_db;
use lifedash_core::model::time::format_timestamp;
use lifedash_core::model::user::is_valid_email;
use lifedash_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AuthService, DashboardService, ExerciseDraft, Meal, MealDraft, MealService, Note, NoteService,
    RecordId, ServiceError, SqliteStore, Task, TaskDraft, TaskService, User, Workout,
    WorkoutDraft, WorkoutService,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const STORE_FILE_NAME: &str = "lifedash_store.sqlite3";
const STORE_PATH_ENV: &str = "LIFEDASH_DB_PATH";
const MSG_NOT_SIGNED_IN: &str = "Not signed in.";
const MSG_INVALID_EMAIL: &str = "Invalid email address";
static STORE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the call with the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Pins the store file used by every later call.
///
/// Must run before the first store access. Returns an empty string on
/// success; repeating with the same path is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "store path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = STORE_PATH.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        );
    }
    String::new()
}

/// Account fields safe to hand to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Result of register/login/current-user calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub ok: bool,
    /// Signed-in user; `None` means anonymous.
    pub user: Option<UserView>,
    pub message: String,
}

/// Result of a create/update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created or updated record.
    pub record_id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, record_id: &RecordId) -> Self {
        Self {
            ok: true,
            record_id: Some(record_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealItem {
    pub id: String,
    pub name: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub prep_time: f64,
    pub cook_time: f64,
    pub servings: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseItem {
    pub id: String,
    pub name: String,
    pub sets: f64,
    pub reps: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutItem {
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub exercises: Vec<ExerciseItem>,
}

/// List envelope. `items` is empty on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    pub ok: bool,
    pub items: Vec<T>,
    pub message: String,
}

impl<T> ListResponse<T> {
    fn from_result(result: Result<Vec<T>, String>) -> Self {
        match result {
            Ok(items) => Self {
                ok: true,
                message: format!("{} item(s).", items.len()),
                items,
            },
            Err(message) => Self {
                ok: false,
                items: Vec::new(),
                message,
            },
        }
    }
}

/// Dashboard counters for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub total_notes: u32,
    pub total_meals: u32,
    pub total_workouts: u32,
    pub message: String,
}

/// Registers and signs in a new account.
///
/// A non-empty email must have the `local@domain` shape a form email input
/// enforces; empty fields are reported by the core.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_register(email: String, password: String, name: String) -> AuthResponse {
    if !email.is_empty() && !is_valid_email(&email) {
        return auth_response(Err(MSG_INVALID_EMAIL.to_string()));
    }
    auth_response(with_store(|store| {
        AuthService::new(store)
            .register(&email, &password, &name)
            .map(Some)
            .map_err(describe)
    }))
}

/// Signs in with exact email and password.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_login(email: String, password: String) -> AuthResponse {
    auth_response(with_store(|store| {
        AuthService::new(store)
            .login(&email, &password)
            .map(Some)
            .map_err(describe)
    }))
}

/// Returns the signed-in user, or `user = None` when anonymous.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_current_user() -> AuthResponse {
    auth_response(with_store(|store| {
        AuthService::new(store).current_user().map_err(describe)
    }))
}

/// Clears the session pointer. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_logout() -> String {
    match with_store(|store| AuthService::new(store).logout().map_err(describe)) {
        Ok(()) => String::new(),
        Err(message) => message,
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_create(title: String, description: String) -> ActionResponse {
    action_response(
        "Task created.",
        with_owner(|store, owner| {
            TaskService::new(store)
                .create(owner, TaskDraft { title, description })
                .map(|task| task.id)
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> ListResponse<TaskItem> {
    ListResponse::from_result(with_owner(|store, owner| {
        TaskService::new(store)
            .list(owner)
            .map(|tasks| tasks.into_iter().map(to_task_item).collect())
    }))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_set_completed(task_id: String, completed: bool) -> ActionResponse {
    action_response(
        "Task updated.",
        with_owner(|store, owner| {
            TaskService::new(store)
                .set_completed(owner, &RecordId::new(task_id), completed)
                .map(|task| task.id)
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_create(title: String) -> ActionResponse {
    action_response(
        "Note created.",
        with_owner(|store, owner| {
            NoteService::new(store)
                .create(owner, &title)
                .map(|note| note.id)
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_list() -> ListResponse<NoteItem> {
    ListResponse::from_result(with_owner(|store, owner| {
        NoteService::new(store)
            .list(owner)
            .map(|notes| notes.into_iter().map(to_note_item).collect())
    }))
}

/// Replaces note markup; called on every editor change.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update_content(note_id: String, content: String) -> ActionResponse {
    action_response(
        "Note saved.",
        with_owner(|store, owner| {
            NoteService::new(store)
                .update_content(owner, &RecordId::new(note_id), content)
                .map(|note| note.id)
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn meal_create(
    name: String,
    instructions: String,
    ingredients: Vec<String>,
    prep_time: f64,
    cook_time: f64,
    servings: f64,
) -> ActionResponse {
    let draft = MealDraft {
        name,
        instructions,
        ingredients,
        prep_time,
        cook_time,
        servings,
    };
    action_response(
        "Recipe saved.",
        with_owner(|store, owner| {
            MealService::new(store)
                .create(owner, draft)
                .map(|meal| meal.id)
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn meal_list() -> ListResponse<MealItem> {
    ListResponse::from_result(with_owner(|store, owner| {
        MealService::new(store)
            .list(owner)
            .map(|meals| meals.into_iter().map(to_meal_item).collect())
    }))
}

/// Saves a workout. `date` is `YYYY-MM-DD`; `None` means today.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_create(
    name: String,
    date: Option<String>,
    exercises: Vec<ExerciseItem>,
) -> ActionResponse {
    let date = match date.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => match raw.parse() {
            Ok(date) => Some(date),
            Err(_) => return ActionResponse::failure(format!("Invalid date `{raw}`.")),
        },
        None => None,
    };
    let draft = WorkoutDraft {
        name,
        date,
        exercises: exercises
            .into_iter()
            .map(|exercise| ExerciseDraft {
                name: exercise.name,
                sets: exercise.sets,
                reps: exercise.reps,
                weight: exercise.weight,
            })
            .collect(),
    };
    action_response(
        "Workout saved.",
        with_owner(|store, owner| {
            WorkoutService::new(store)
                .create(owner, draft)
                .map(|workout| workout.id)
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn workout_list() -> ListResponse<WorkoutItem> {
    ListResponse::from_result(with_owner(|store, owner| {
        WorkoutService::new(store)
            .list(owner)
            .map(|workouts| workouts.into_iter().map(to_workout_item).collect())
    }))
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_metrics() -> DashboardResponse {
    match with_owner(|store, owner| DashboardService::new(store).metrics(owner)) {
        Ok(metrics) => DashboardResponse {
            ok: true,
            total_tasks: saturating_u32(metrics.total_tasks),
            completed_tasks: saturating_u32(metrics.completed_tasks),
            total_notes: saturating_u32(metrics.total_notes),
            total_meals: saturating_u32(metrics.total_meals),
            total_workouts: saturating_u32(metrics.total_workouts),
            message: String::new(),
        },
        Err(message) => DashboardResponse {
            message,
            ..DashboardResponse::default()
        },
    }
}

fn resolve_store_path() -> PathBuf {
    STORE_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORE_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(SqliteStore<'_>) -> Result<T, String>) -> Result<T, String> {
    let path = resolve_store_path();
    let conn = open_db(&path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("store open failed: {err}")
    })?;
    f(SqliteStore::new(&conn))
}

fn with_owner<T>(
    f: impl FnOnce(&SqliteStore<'_>, &RecordId) -> Result<T, ServiceError>,
) -> Result<T, String> {
    with_store(|store| {
        let user = AuthService::new(&store)
            .current_user()
            .map_err(describe)?
            .ok_or_else(|| MSG_NOT_SIGNED_IN.to_string())?;
        f(&store, &user.id).map_err(describe)
    })
}

fn describe(err: ServiceError) -> String {
    match err {
        ServiceError::Validation(message) => message,
        other => other.to_string(),
    }
}

fn auth_response(result: Result<Option<User>, String>) -> AuthResponse {
    match result {
        Ok(user) => AuthResponse {
            ok: true,
            message: if user.is_some() {
                "Signed in.".to_string()
            } else {
                "Signed out.".to_string()
            },
            user: user.map(to_user_view),
        },
        Err(message) => AuthResponse {
            ok: false,
            user: None,
            message,
        },
    }
}

fn action_response(success: &str, result: Result<RecordId, String>) -> ActionResponse {
    match result {
        Ok(id) => ActionResponse::success(success, &id),
        Err(message) => ActionResponse::failure(message),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_user_view(user: User) -> UserView {
    UserView {
        id: user.id.to_string(),
        email: user.email,
        name: user.name,
    }
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title,
        description: task.description,
        completed: task.completed,
        created_at: format_timestamp(task.created_at),
    }
}

fn to_note_item(note: Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        title: note.title,
        content: note.content,
        created_at: format_timestamp(note.created_at),
        updated_at: format_timestamp(note.updated_at),
    }
}

fn to_meal_item(meal: Meal) -> MealItem {
    MealItem {
        id: meal.id.to_string(),
        name: meal.name,
        instructions: meal.instructions,
        ingredients: meal.ingredients,
        prep_time: meal.prep_time,
        cook_time: meal.cook_time,
        servings: meal.servings,
    }
}

fn to_workout_item(workout: Workout) -> WorkoutItem {
    WorkoutItem {
        id: workout.id.to_string(),
        name: workout.name,
        date: workout.date.to_string(),
        exercises: workout
            .exercises
            .into_iter()
            .map(|exercise| ExerciseItem {
                id: exercise.id.to_string(),
                name: exercise.name,
                sets: exercise.sets,
                reps: exercise.reps,
                weight: exercise.weight,
            })
            .collect(),
    }
}
