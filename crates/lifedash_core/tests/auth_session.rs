use lifedash_core::service::auth_service::{
    MSG_EMAIL_TAKEN, MSG_FIELDS_REQUIRED, MSG_INVALID_CREDENTIALS,
};
use lifedash_core::{
    AuthService, AuthState, KeyValueStore, MemoryStore, ServiceError, SessionStore,
    UserRepository,
};

fn validation_message(err: ServiceError) -> String {
    match err {
        ServiceError::Validation(message) => message,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn register_signs_in_new_user() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);

    let user = auth.register("a@b.com", "x", "A").unwrap();

    assert!(!user.id.as_str().is_empty());
    assert_eq!(auth.state().unwrap(), AuthState::Authenticated(user.clone()));
    assert_eq!(UserRepository::new(&store).list().unwrap(), vec![user]);
}

#[test]
fn register_duplicate_email_fails_without_mutation() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    auth.register("a@b.com", "x", "A").unwrap();
    auth.logout().unwrap();
    let users_before = store.get("users").unwrap();

    let err = auth.register("a@b.com", "other", "Other").unwrap_err();

    assert_eq!(validation_message(err), MSG_EMAIL_TAKEN);
    assert_eq!(store.get("users").unwrap(), users_before);
    assert_eq!(auth.current_user().unwrap(), None);
}

#[test]
fn register_requires_all_fields() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);

    for (email, password, name) in [("", "x", "A"), ("a@b.com", "", "A"), ("a@b.com", "x", "")] {
        let err = auth.register(email, password, name).unwrap_err();
        assert_eq!(validation_message(err), MSG_FIELDS_REQUIRED);
    }
    assert_eq!(store.get("users").unwrap(), None);
    assert_eq!(auth.state().unwrap(), AuthState::Anonymous);
}

#[test]
fn register_accepts_any_non_empty_fields() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);

    let spaced = auth.register(" ", " ", " ").unwrap();
    assert_eq!(spaced.email, " ");
    let unshaped = auth.register("not-an-email", "x", "A").unwrap();
    assert_eq!(auth.current_user().unwrap(), Some(unshaped.clone()));

    assert_eq!(
        UserRepository::new(&store).list().unwrap(),
        vec![spaced, unshaped]
    );
}

#[test]
fn login_with_wrong_password_leaves_session_unset() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    auth.register("a@b.com", "x", "A").unwrap();
    auth.logout().unwrap();

    let err = auth.login("a@b.com", "y").unwrap_err();

    assert_eq!(validation_message(err), MSG_INVALID_CREDENTIALS);
    assert_eq!(auth.current_user().unwrap(), None);
    assert_eq!(store.get("currentUser").unwrap(), None);
}

#[test]
fn login_with_unknown_email_uses_same_message() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);

    let err = auth.login("nobody@b.com", "x").unwrap_err();
    assert_eq!(validation_message(err), MSG_INVALID_CREDENTIALS);
}

#[test]
fn login_email_match_is_case_sensitive() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    auth.register("a@b.com", "x", "A").unwrap();
    auth.logout().unwrap();

    assert!(auth.login("A@B.com", "x").is_err());
    let user = auth.login("a@b.com", "x").unwrap();
    assert_eq!(auth.current_user().unwrap(), Some(user));
}

#[test]
fn current_user_is_absent_after_logout() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    auth.register("a@b.com", "x", "A").unwrap();

    auth.logout().unwrap();

    assert_eq!(auth.current_user().unwrap(), None);
    assert_eq!(auth.state().unwrap(), AuthState::Anonymous);
}

#[test]
fn login_replaces_existing_session() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    let first = auth.register("a@b.com", "x", "A").unwrap();
    let second = auth.register("c@d.com", "y", "C").unwrap();
    assert_eq!(auth.current_user().unwrap(), Some(second));

    auth.login("a@b.com", "x").unwrap();
    assert_eq!(
        SessionStore::new(&store).current_user().unwrap(),
        Some(first)
    );
}

#[test]
fn stored_session_pointer_uses_plain_user_document() {
    let store = MemoryStore::new();
    store
        .set(
            "users",
            r#"[{"id":"abc123xyz","email":"a@b.com","password":"x","name":"A"}]"#,
        )
        .unwrap();
    let auth = AuthService::new(&store);

    let user = auth.login("a@b.com", "x").unwrap();

    assert_eq!(user.id.as_str(), "abc123xyz");
    let pointer: serde_json::Value =
        serde_json::from_str(&store.get("currentUser").unwrap().unwrap()).unwrap();
    assert_eq!(pointer["email"], "a@b.com");
    assert_eq!(pointer["name"], "A");
}
