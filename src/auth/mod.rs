//! # Request Authentication
//!
//! The token validator is an external collaborator consumed as a pass/fail
//! gate: `validate(request headers) -> bool`. The server ships two
//! implementations — allow-all for deployments that terminate auth
//! elsewhere, and a shared-secret bearer check — selected by
//! configuration. Richer schemes plug in behind the same trait.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::error::ApiError;
use crate::config::AuthConfig;

/// Pass/fail authentication gate consulted before dispatch.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, headers: &HeaderMap) -> bool;
}

pub type TokenValidatorState = Arc<dyn TokenValidator>;

/// Admits every request.
#[derive(Debug, Default)]
pub struct AllowAllValidator;

impl TokenValidator for AllowAllValidator {
    fn validate(&self, _headers: &HeaderMap) -> bool {
        true
    }
}

/// Requires `Authorization: Bearer <token>` with the configured shared
/// secret. The scheme keyword is matched case-insensitively.
pub struct BearerTokenValidator {
    token: String,
}

impl BearerTokenValidator {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self { token: token.into() }
    }
}

impl TokenValidator for BearerTokenValidator {
    fn validate(&self, headers: &HeaderMap) -> bool {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        match header.split_once(' ') {
            Some((scheme, token)) => {
                scheme.eq_ignore_ascii_case("bearer") && token.trim() == self.token
            }
            None => false,
        }
    }
}

/// Build the validator selected by configuration.
pub fn validator_from_config(config: &AuthConfig) -> TokenValidatorState {
    match &config.token {
        Some(token) => Arc::new(BearerTokenValidator::new(token.clone())),
        None => Arc::new(AllowAllValidator),
    }
}

/// Axum middleware wrapping the data routes: reject the request before any
/// store or generator work when the validator says no.
pub async fn authenticate(
    State(validator): State<TokenValidatorState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if validator.validate(request.headers()) {
        Ok(next.run(request).await)
    } else {
        warn!(path = %request.uri().path(), "Rejected request with invalid credentials");
        Err(ApiError::unauthorized("Unauthorized: invalid or missing token"))
    }
}
