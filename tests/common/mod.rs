//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use confstore::api::build_router;
use confstore::auth::validator_from_config;
use confstore::config::{AuthConfig, CaConfig};
use confstore::errors::{Error, Result};
use confstore::generators::{CaProvider, GeneratorFactory};
use confstore::storage::{Configuration, MemoryStore, SharedStore, Store};

/// Router backed by a fresh in-memory store with auth disabled.
pub fn memory_router() -> Router {
    router_with_store(Arc::new(MemoryStore::new()))
}

pub fn router_with_store(store: SharedStore) -> Router {
    let ca = Arc::new(CaProvider::new(store.clone(), CaConfig::default()));
    build_router(
        store,
        GeneratorFactory::new(ca),
        validator_from_config(&AuthConfig::default()),
    )
}

pub fn router_with_bearer_token(store: SharedStore, token: &str) -> Router {
    let ca = Arc::new(CaProvider::new(store.clone(), CaConfig::default()));
    build_router(
        store,
        GeneratorFactory::new(ca),
        validator_from_config(&AuthConfig { token: Some(token.to_string()) }),
    )
}

/// Build a request the way a well-behaved client would: PUT/POST carry
/// `Content-Type: application/json`.
pub fn api_request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if method == "PUT" || method == "POST" {
        builder = builder.header("content-type", "application/json");
    }

    let body = match body {
        Some(content) => Body::from(content.to_string()),
        None => Body::empty(),
    };

    builder.body(body).expect("valid test request")
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response: Response<Body> =
        router.clone().oneshot(request).await.expect("router never errors");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}

pub async fn send_json(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(router, request).await;
    let value = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    (status, value)
}

/// Store stub whose every operation fails, for exercising 500 paths.
pub struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn put(&self, _name: &str, _value: &str) -> Result<()> {
        Err(Error::internal("Kaboom!"))
    }

    async fn get_by_name(&self, _name: &str) -> Result<Option<Configuration>> {
        Err(Error::internal("Kaboom!"))
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<Configuration>> {
        Err(Error::internal("Kaboom!"))
    }

    async fn delete(&self, _name: &str) -> Result<bool> {
        Err(Error::internal("Kaboom!"))
    }
}
