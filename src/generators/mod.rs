//! # Value Generators
//!
//! Server-side synthesis of configuration values for POST
//! generate-if-absent requests. Each generator turns a `parameters` JSON
//! object into a JSON value; the request handler wraps the result in the
//! storage envelope and persists it.
//!
//! The factory is a closed registry — the type string is matched against
//! the known generators and anything else is a validation error, so an
//! unknown type can never reach generation code.

pub mod ca;
pub mod certificate;
pub mod password;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{Error, Result};

pub use ca::{CaPair, CaProvider};
pub use certificate::CertificateGenerator;
pub use password::PasswordGenerator;

/// A generator produces a value from its declared parameters and nothing
/// else. Implementations must be safe to invoke concurrently; the only
/// shared mutation allowed is root-certificate persistence through the
/// store (see [`CaProvider`]).
#[async_trait]
pub trait ValueGenerator: Send + Sync {
    async fn generate(&self, parameters: &Value) -> Result<Value>;
}

impl std::fmt::Debug for dyn ValueGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValueGenerator")
    }
}

/// Resolves a value type string to a generator instance.
#[derive(Clone)]
pub struct GeneratorFactory {
    ca_provider: Arc<CaProvider>,
}

impl GeneratorFactory {
    /// Create a factory with the root-of-trust provider the certificate
    /// generator depends on.
    pub fn new(ca_provider: Arc<CaProvider>) -> Self {
        Self { ca_provider }
    }

    pub fn get_generator(&self, value_type: &str) -> Result<Box<dyn ValueGenerator>> {
        match value_type {
            "password" => Ok(Box::new(PasswordGenerator::new())),
            "certificate" => Ok(Box::new(CertificateGenerator::new(self.ca_provider.clone()))),
            other => Err(Error::validation(format!("Unsupported value type: '{}'", other))),
        }
    }
}
