//! # Storage Layer
//!
//! Persistence abstraction for named configuration values. Every backend
//! (in-memory map, SQLite, PostgreSQL) sits behind the [`Store`] trait so
//! the request handler never sees which one it is talking to.

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::DatabaseConfig;
use crate::errors::{Error, Result};

pub use memory::MemoryStore;
pub use pool::{create_postgres_pool, create_sqlite_pool};
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

/// A persisted name→value record with a stable identifier.
///
/// `value` is an opaque string holding JSON of the shape
/// `{"value": <json>}`; the store never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: String,
    pub name: String,
    pub value: String,
}

/// Backend-agnostic persistence contract.
///
/// Lookups report absence as `Ok(None)` — an `Err` always means a genuine
/// backend failure. `put` is an upsert: writing an existing name replaces
/// its value and preserves its identifier.
#[async_trait]
pub trait Store: Send + Sync {
    async fn put(&self, name: &str, value: &str) -> Result<()>;

    async fn get_by_name(&self, name: &str) -> Result<Option<Configuration>>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Configuration>>;

    /// Returns `true` if a row existed and was removed.
    async fn delete(&self, name: &str) -> Result<bool>;
}

/// Shared handle to the configured store backend
pub type SharedStore = Arc<dyn Store>;

/// Build the store selected by the database configuration.
///
/// SQL backends get their connection pool created here and, when
/// `auto_migrate` is set, the schema applied before the first request.
pub async fn build_store(config: &DatabaseConfig) -> Result<SharedStore> {
    if config.is_memory() {
        tracing::info!(backend = "memory", "Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if config.is_sqlite() {
        let pool = create_sqlite_pool(config).await?;
        if config.auto_migrate {
            migrations::run_sqlite_migrations(&pool).await?;
        }
        tracing::info!(backend = "sqlite", "Using SQLite store");
        return Ok(Arc::new(SqliteStore::new(pool)));
    }

    if config.is_postgres() {
        let pool = create_postgres_pool(config).await?;
        if config.auto_migrate {
            migrations::run_postgres_migrations(&pool).await?;
        }
        tracing::info!(backend = "postgresql", "Using PostgreSQL store");
        return Ok(Arc::new(PostgresStore::new(pool)));
    }

    Err(Error::config(format!(
        "Unsupported database URL '{}': expected 'memory', 'sqlite://...' or 'postgresql://...'",
        config.url
    )))
}
