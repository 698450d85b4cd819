//! SQLite store backend.
//!
//! Shares the access pattern of the PostgreSQL backend: a single
//! `configurations` table keyed by `config_key`, native upsert for `put`,
//! and `fetch_optional` so absence is `None` rather than an error.

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Sqlite};

use crate::errors::{Error, Result};

use super::{Configuration, Store};

#[derive(Debug, FromRow)]
struct ConfigurationRow {
    id: i64,
    config_key: String,
    value: String,
}

impl From<ConfigurationRow> for Configuration {
    fn from(row: ConfigurationRow) -> Self {
        Configuration { id: row.id.to_string(), name: row.config_key, value: row.value }
    }
}

/// SQLite implementation of [`Store`]
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn put(&self, name: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO configurations (config_key, value) VALUES ($1, $2) \
             ON CONFLICT (config_key) DO UPDATE SET value = excluded.value",
        )
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, config_key = %name, "Failed to upsert configuration");
            Error::database(e, format!("Failed to write configuration '{}'", name))
        })?;

        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Configuration>> {
        let row = sqlx::query_as::<_, ConfigurationRow>(
            "SELECT id, config_key, value FROM configurations WHERE config_key = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, config_key = %name, "Failed to get configuration by name");
            Error::database(e, format!("Failed to read configuration '{}'", name))
        })?;

        Ok(row.map(Configuration::from))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Configuration>> {
        // Identifiers are auto-increment integers; a non-numeric id cannot
        // match any row.
        let numeric_id: i64 = match id.parse() {
            Ok(parsed) => parsed,
            Err(_) => return Ok(None),
        };

        let row = sqlx::query_as::<_, ConfigurationRow>(
            "SELECT id, config_key, value FROM configurations WHERE id = $1",
        )
        .bind(numeric_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, config_id = %id, "Failed to get configuration by id");
            Error::database(e, format!("Failed to read configuration with id '{}'", id))
        })?;

        Ok(row.map(Configuration::from))
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM configurations WHERE config_key = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, config_key = %name, "Failed to delete configuration");
                Error::database(e, format!("Failed to delete configuration '{}'", name))
            })?;

        Ok(result.rows_affected() > 0)
    }
}
