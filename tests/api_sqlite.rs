//! End-to-end API tests against the SQLite store backend.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use sqlx::sqlite::SqlitePoolOptions;

use common::{api_request, router_with_store, send, send_json};
use confstore::config::DatabaseConfig;
use confstore::storage::migrations::run_sqlite_migrations;
use confstore::storage::{create_sqlite_pool, SqliteStore};

/// In-memory SQLite with a single pooled connection; more connections
/// would each see their own empty database.
async fn sqlite_router() -> axum::Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    run_sqlite_migrations(&pool).await.expect("migrations");
    router_with_store(Arc::new(SqliteStore::new(pool)))
}

#[tokio::test]
async fn put_get_delete_roundtrip() {
    let router = sqlite_router().await;

    let (status, body) =
        send(&router, api_request("PUT", "/v1/data/bla", Some(r#"{"value":"str"}"#))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"id":"1","name":"bla","value":"str"}"#);

    let (status, body) = send_json(&router, api_request("GET", "/v1/data/bla", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "str");

    let (status, _) = send(&router, api_request("DELETE", "/v1/data/bla", None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, api_request("GET", "/v1/data/bla", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upsert_preserves_row_id() {
    let router = sqlite_router().await;

    send(&router, api_request("PUT", "/v1/data/stable", Some(r#"{"value":1}"#))).await;
    let (_, first) = send_json(&router, api_request("GET", "/v1/data/stable", None)).await;

    send(&router, api_request("PUT", "/v1/data/stable", Some(r#"{"value":2}"#))).await;
    let (_, second) = send_json(&router, api_request("GET", "/v1/data/stable", None)).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["value"], 2);
}

#[tokio::test]
async fn lookup_by_id_matches_lookup_by_name() {
    let router = sqlite_router().await;

    send(&router, api_request("PUT", "/v1/data/smurf/color", Some(r#"{"value":"blue"}"#))).await;

    let (_, by_name) = send_json(&router, api_request("GET", "/v1/data/smurf/color", None)).await;
    let id = by_name["id"].as_str().unwrap();

    let (status, by_id) =
        send_json(&router, api_request("GET", &format!("/v1/data?id={}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id, by_name);
}

#[tokio::test]
async fn file_backed_store_survives_pool_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("confstore.db").display()),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };

    {
        let pool = create_sqlite_pool(&config).await.expect("first pool");
        run_sqlite_migrations(&pool).await.expect("migrations");
        let router = router_with_store(Arc::new(SqliteStore::new(pool)));
        send(&router, api_request("PUT", "/v1/data/durable", Some(r#"{"value":"kept"}"#))).await;
    }

    let pool = create_sqlite_pool(&config).await.expect("second pool");
    let router = router_with_store(Arc::new(SqliteStore::new(pool)));

    let (status, body) = send_json(&router, api_request("GET", "/v1/data/durable", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "kept");
}

#[tokio::test]
async fn generated_password_persists() {
    let router = sqlite_router().await;
    let body = r#"{"type":"password","parameters":{}}"#;

    let (status, first) = send_json(&router, api_request("POST", "/v1/data/pw", Some(body))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = send_json(&router, api_request("POST", "/v1/data/pw", Some(body))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["value"], second["value"]);
}
