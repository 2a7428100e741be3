//! Registration, login and logout.
//!
//! # Responsibility
//! - Drive the `Anonymous <-> Authenticated` session state machine.
//!
//! # Invariants
//! - Failed login or registration never writes the user collection or the
//!   session pointer.
//! - Email uniqueness is checked by a linear scan at registration only.
//! - Passwords are compared as exact plaintext; this is a local claim, not a
//!   security boundary.

use super::{ServiceError, ServiceResult};
use crate::kv::KeyValueStore;
use crate::model::user::User;
use crate::repo::UserRepository;
use crate::session::SessionStore;
use log::{info, warn};

pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_EMAIL_TAKEN: &str = "Email already exists";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Session state as seen by the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}

pub struct AuthService<S> {
    store: S,
}

impl<S: KeyValueStore> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an account and signs it in.
    ///
    /// # Errors
    /// - `Validation(MSG_FIELDS_REQUIRED)` when any field is empty. Whitespace
    ///   counts as a value.
    /// - `Validation(MSG_EMAIL_TAKEN)` when the exact email is registered.
    pub fn register(&self, email: &str, password: &str, name: &str) -> ServiceResult<User> {
        if [email, password, name].iter().any(|value| value.is_empty()) {
            warn!("event=auth_register module=service status=rejected reason=missing_fields");
            return Err(ServiceError::validation(MSG_FIELDS_REQUIRED));
        }

        let users = self.users();
        if users.find_by_email(email)?.is_some() {
            warn!("event=auth_register module=service status=rejected reason=email_taken");
            return Err(ServiceError::validation(MSG_EMAIL_TAKEN));
        }

        let user = users.create(email, password, name)?;
        self.session().set_current_user(&user)?;
        info!("event=auth_register module=service status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Signs in when `email` exists and `password` matches exactly.
    pub fn login(&self, email: &str, password: &str) -> ServiceResult<User> {
        let user = self
            .users()
            .find_by_email(email)?
            .filter(|user| user.password_matches(password))
            .ok_or_else(|| {
                warn!("event=auth_login module=service status=rejected reason=invalid_credentials");
                ServiceError::validation(MSG_INVALID_CREDENTIALS)
            })?;

        self.session().set_current_user(&user)?;
        info!("event=auth_login module=service status=ok user_id={}", user.id);
        Ok(user)
    }

    pub fn logout(&self) -> ServiceResult<()> {
        self.session().logout()?;
        Ok(())
    }

    pub fn current_user(&self) -> ServiceResult<Option<User>> {
        Ok(self.session().current_user()?)
    }

    pub fn state(&self) -> ServiceResult<AuthState> {
        Ok(match self.current_user()? {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Anonymous,
        })
    }

    fn users(&self) -> UserRepository<&S> {
        UserRepository::new(&self.store)
    }

    fn session(&self) -> SessionStore<&S> {
        SessionStore::new(&self.store)
    }
}
