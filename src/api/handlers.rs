//! Request handlers for the `/v1/data` API.
//!
//! Each handler follows the same shape: canonicalize the name, gate the
//! transport preconditions, then talk to the store and/or generator
//! factory. Validation failures never reach the backend.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::storage::Configuration;

use super::error::ApiError;
use super::path::canonicalize_name;
use super::routes::ApiState;

const EMPTY_BODY_MESSAGE: &str = "Request can't be empty";
const NOT_JSON_MESSAGE: &str = "Request Body should be JSON string";
// The misspelling is part of the wire contract.
const MISSING_VALUE_KEY_MESSAGE: &str = "JSON request body shoud contain the key 'value'";
const MISSING_TYPE_KEY_MESSAGE: &str = "JSON request body shoud contain the key 'type'";
const UNSUPPORTED_MEDIA_TYPE_MESSAGE: &str =
    "Unsupported Media Type - Accepts application/json only";

/// Response body for every successful data operation that returns content.
///
/// Field order is part of the contract: `id`, `name`, `value`.
#[derive(Debug, Serialize)]
struct ConfigurationResponse {
    id: String,
    name: String,
    value: Value,
}

impl ConfigurationResponse {
    /// Build the response from a stored row, re-embedding the envelope's
    /// `value` as a raw JSON value.
    fn from_stored(config: Configuration) -> Result<Self, ApiError> {
        let envelope: Value = serde_json::from_str(&config.value).map_err(|e| {
            tracing::error!(error = %e, config_name = %config.name, "Stored value is not valid JSON");
            ApiError::internal("Stored configuration value is malformed")
        })?;

        let value = envelope.get("value").cloned().ok_or_else(|| {
            tracing::error!(config_name = %config.name, "Stored value is missing its envelope");
            ApiError::internal("Stored configuration value is malformed")
        })?;

        Ok(Self { id: config.id, name: config.name, value })
    }
}

/// GET/PUT/POST/DELETE `/v1/data` — only lookup-by-id via GET is valid here.
pub async fn data_root_handler(
    State(state): State<ApiState>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let id = match params.get("id") {
        Some(id) if !id.is_empty() => id,
        _ => return Err(ApiError::bad_request("Query parameter 'id' is required")),
    };

    if method != Method::GET {
        return Err(ApiError::MethodNotAllowed(format!(
            "Method {} not allowed for lookup by id",
            method
        )));
    }

    match state.store.get_by_id(id).await.map_err(ApiError::from)? {
        Some(config) => Ok(Json(ConfigurationResponse::from_stored(config)?).into_response()),
        None => Err(ApiError::not_found(format!("Configuration with id '{}' not found", id))),
    }
}

/// GET `/v1/data/<name>`
pub async fn get_handler(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let name = canonicalize_name(&name)?;

    match state.store.get_by_name(&name).await.map_err(ApiError::from)? {
        Some(config) => Ok(Json(ConfigurationResponse::from_stored(config)?).into_response()),
        None => Err(ApiError::not_found(format!("Configuration '{}' not found", name))),
    }
}

/// PUT `/v1/data/<name>`
pub async fn put_handler(
    State(state): State<ApiState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, ApiError> {
    let name = canonicalize_name(&name)?;
    require_json_content_type(&headers)?;

    let parsed = parse_json_body(&body)?;
    let value = parsed
        .get("value")
        .ok_or_else(|| ApiError::bad_request(MISSING_VALUE_KEY_MESSAGE))?;

    let envelope = serde_json::json!({ "value": value }).to_string();
    state.store.put(&name, &envelope).await.map_err(ApiError::from)?;

    info!(config_name = %name, "Stored configuration");

    let stored = read_back(&state, &name).await?;
    Ok(Json(ConfigurationResponse::from_stored(stored)?).into_response())
}

/// POST `/v1/data/<name>` — generate-if-absent.
pub async fn post_handler(
    State(state): State<ApiState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, ApiError> {
    let name = canonicalize_name(&name)?;
    require_json_content_type(&headers)?;

    let parsed = parse_json_body(&body)?;
    let value_type = parsed
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request(MISSING_TYPE_KEY_MESSAGE))?;
    let parameters = parsed.get("parameters").cloned().unwrap_or(Value::Null);

    // Existing values are returned untouched; the generator is only
    // consulted when nothing is stored under the name.
    if let Some(existing) = state.store.get_by_name(&name).await.map_err(ApiError::from)? {
        return Ok(Json(ConfigurationResponse::from_stored(existing)?).into_response());
    }

    let generator = state.generators.get_generator(value_type).map_err(ApiError::from)?;
    let generated = generator.generate(&parameters).await.map_err(ApiError::from)?;

    let envelope = serde_json::json!({ "value": generated }).to_string();
    state.store.put(&name, &envelope).await.map_err(ApiError::from)?;

    info!(config_name = %name, value_type = %value_type, "Generated and stored configuration");

    let stored = read_back(&state, &name).await?;
    Ok((StatusCode::CREATED, Json(ConfigurationResponse::from_stored(stored)?)).into_response())
}

/// DELETE `/v1/data/<name>`
pub async fn delete_handler(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let name = canonicalize_name(&name)?;

    if state.store.delete(&name).await.map_err(ApiError::from)? {
        info!(config_name = %name, "Deleted configuration");
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(ApiError::not_found(format!("Configuration '{}' not found", name)))
    }
}

/// Fallback for everything outside the recognized `/v1/data` space.
pub async fn invalid_path_handler() -> ApiError {
    ApiError::bad_request("Invalid path: expected /v1/data or /v1/data/<name>")
}

/// Fallback for unsupported methods on a recognized data path, so the 405
/// carries the same JSON error body as every other error response.
pub async fn method_not_allowed_handler(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(format!("Method {} not allowed", method))
}

fn require_json_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    // Tolerate parameters such as `application/json; charset=utf-8`.
    if content_type == "application/json" || content_type.starts_with("application/json;") {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType(UNSUPPORTED_MEDIA_TYPE_MESSAGE.to_string()))
    }
}

/// Shared PUT/POST body gate: non-empty, JSON, top-level object.
fn parse_json_body(body: &str) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request(EMPTY_BODY_MESSAGE));
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => Err(ApiError::bad_request(NOT_JSON_MESSAGE)),
    }
}

async fn read_back(state: &ApiState, name: &str) -> Result<Configuration, ApiError> {
    state
        .store
        .get_by_name(name)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::internal("Configuration disappeared after write"))
}
