//! PostgreSQL store tests. These need a reachable server, so they are
//! kept behind the `postgres_tests` feature:
//!
//! ```text
//! CONFSTORE_TEST_POSTGRES_URL=postgresql://localhost/confstore_test \
//!     cargo test --features postgres_tests
//! ```
#![cfg(feature = "postgres_tests")]

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use confstore::storage::migrations::run_postgres_migrations;
use confstore::storage::{PostgresStore, Store};

async fn test_pool() -> PgPool {
    let url = std::env::var("CONFSTORE_TEST_POSTGRES_URL")
        .expect("CONFSTORE_TEST_POSTGRES_URL must point at a test database");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test postgres");
    run_postgres_migrations(&pool).await.expect("migrations");
    pool
}

/// Tests run in parallel against one shared database, so each one cleans
/// up only its own keys.
async fn reset(store: &PostgresStore, names: &[&str]) {
    for name in names {
        store.delete(name).await.expect("cleanup");
    }
}

#[tokio::test]
async fn put_then_get_roundtrip() {
    let store = PostgresStore::new(test_pool().await);
    reset(&store, &["pg/name"]).await;

    store.put("pg/name", r#"{"value":"str"}"#).await.unwrap();

    let found = store.get_by_name("pg/name").await.unwrap().expect("row exists");
    assert_eq!(found.name, "pg/name");
    assert_eq!(found.value, r#"{"value":"str"}"#);

    let by_id = store.get_by_id(&found.id).await.unwrap().expect("row by id");
    assert_eq!(by_id, found);
}

#[tokio::test]
async fn upsert_replaces_value_and_keeps_id() {
    let store = PostgresStore::new(test_pool().await);
    reset(&store, &["pg/upsert"]).await;

    store.put("pg/upsert", r#"{"value":1}"#).await.unwrap();
    let first = store.get_by_name("pg/upsert").await.unwrap().unwrap();

    store.put("pg/upsert", r#"{"value":2}"#).await.unwrap();
    let second = store.get_by_name("pg/upsert").await.unwrap().unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.value, r#"{"value":2}"#);
}

#[tokio::test]
async fn delete_reports_row_existence() {
    let store = PostgresStore::new(test_pool().await);
    reset(&store, &["pg/doomed"]).await;

    store.put("pg/doomed", r#"{"value":true}"#).await.unwrap();
    assert!(store.delete("pg/doomed").await.unwrap());
    assert!(!store.delete("pg/doomed").await.unwrap());
    assert!(store.get_by_name("pg/doomed").await.unwrap().is_none());
}

#[tokio::test]
async fn absent_rows_are_none_not_errors() {
    let store = PostgresStore::new(test_pool().await);

    assert!(store.get_by_name("pg/never-written").await.unwrap().is_none());
    assert!(store.get_by_id("123456789").await.unwrap().is_none());
    assert!(store.get_by_id("not-a-number").await.unwrap().is_none());
}
