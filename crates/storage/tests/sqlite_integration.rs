use storage::repository::{KeyValueStore, Storage, StorageError};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_replaces_blob() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("stats").await.unwrap(), None);

    repo.set("stats", r#"{"correct":1,"total":1}"#).await.unwrap();
    repo.set("stats", r#"{"correct":1,"total":2}"#).await.unwrap();

    let stored = repo.get("stats").await.unwrap();
    assert_eq!(stored.as_deref(), Some(r#"{"correct":1,"total":2}"#));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.set("k", "v").await.unwrap();
    repo.migrate().await.expect("second migrate");

    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_storage_keeps_keys_apart() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("storage");

    storage.kv.set("a", "1").await.unwrap();
    storage.kv.set("b", "2").await.unwrap();

    assert_eq!(storage.kv.require("a").await.unwrap(), "1");
    assert_eq!(storage.kv.require("b").await.unwrap(), "2");
    let missing = storage.kv.require("c").await.unwrap_err();
    assert!(matches!(missing, StorageError::NotFound));
}
