use lifedash_core::db::{open_db, open_db_in_memory};
use lifedash_core::{
    KeyValueStore, KvError, MemoryStore, RecordId, RepoError, ServiceError, SqliteStore,
    TaskDraft, TaskService,
};

#[test]
fn sqlite_store_get_set_remove() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::new(&conn);

    assert_eq!(store.get("users").unwrap(), None);

    store.set("users", "[]").unwrap();
    store.set("users", "[{\"id\":\"a\"}]").unwrap();
    assert_eq!(
        store.get("users").unwrap().as_deref(),
        Some("[{\"id\":\"a\"}]")
    );

    store.remove("users").unwrap();
    store.remove("users").unwrap();
    assert_eq!(store.get("users").unwrap(), None);
}

#[test]
fn sqlite_store_lists_keys_in_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    store.set("tasks_b", "[]").unwrap();
    store.set("currentUser", "{}").unwrap();
    store.set("tasks_a", "[]").unwrap();

    assert_eq!(
        store.keys().unwrap(),
        vec!["currentUser", "tasks_a", "tasks_b"]
    );
}

#[test]
fn sqlite_store_persists_records_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifedash.sqlite3");
    let owner = RecordId::new("owner1");

    let created = {
        let conn = open_db(&path).unwrap();
        let service = TaskService::new(SqliteStore::new(&conn));
        service.create(&owner, TaskDraft::new("water plants")).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let service = TaskService::new(SqliteStore::new(&conn));
    assert_eq!(service.list(&owner).unwrap(), vec![created]);
}

#[test]
fn quota_failure_aborts_create_and_keeps_collection() {
    let store = MemoryStore::with_quota(400);
    let service = TaskService::new(&store);
    let owner = RecordId::new("owner1");

    let first = service.create(&owner, TaskDraft::new("short")).unwrap();
    let before = store.get("tasks_owner1").unwrap();

    let long_title = "x".repeat(400);
    let err = service
        .create(&owner, TaskDraft::new(long_title))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::Store(KvError::QuotaExceeded { .. }))
    ));
    assert_eq!(store.get("tasks_owner1").unwrap(), before);
    assert_eq!(service.list(&owner).unwrap(), vec![first]);
}
