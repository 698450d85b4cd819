//! # confstore
//!
//! A networked configuration/secret store. Clients store and retrieve
//! named JSON values over HTTP; for generated value types (passwords,
//! certificates) the server synthesizes the value on first request and
//! returns the stored result on every request after that.
//!
//! ## Architecture
//!
//! ```text
//! HTTP request → Router → [Token Validator] → Request Handler
//!                                 ↓                ↓
//!                          Path Validator    Store / Generator Factory
//! ```
//!
//! ## Core Components
//!
//! - **API layer**: axum-based router and handlers for `/v1/data`
//! - **Storage layer**: name-keyed values behind the [`storage::Store`]
//!   trait (in-memory, SQLite, PostgreSQL via sqlx)
//! - **Generators**: password and certificate synthesis, sharing one
//!   store-persisted root of trust
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use confstore::{
//!     api::{build_router, start_api_server},
//!     auth::validator_from_config,
//!     generators::{CaProvider, GeneratorFactory},
//!     storage::build_store,
//!     Config, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let store = build_store(&config.database).await?;
//!     let ca = Arc::new(CaProvider::new(store.clone(), config.ca.clone()));
//!     let router = build_router(
//!         store,
//!         GeneratorFactory::new(ca),
//!         validator_from_config(&config.auth),
//!     );
//!     start_api_server(config.api, router).await
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod generators;
pub mod observability;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use errors::{Error, Result};
pub use observability::init_tracing;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "confstore");
    }
}
