//! Password generation.

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::Rng;
use serde_json::Value;

use crate::errors::Result;

use super::ValueGenerator;

const PASSWORD_LENGTH: usize = 20;
const PASSWORD_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates fixed-length lowercase-alphanumeric passwords from the
/// operating system's secure random source. Parameters are ignored.
#[derive(Debug, Default)]
pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ValueGenerator for PasswordGenerator {
    async fn generate(&self, _parameters: &Value) -> Result<Value> {
        let mut rng = OsRng;
        let password: String = (0..PASSWORD_LENGTH)
            .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
            .collect();

        Ok(Value::String(password))
    }
}
