//! # Database Schema Setup
//!
//! Embedded schema statements for the SQL store backends, applied at
//! startup when auto-migrate is enabled. The schema is fixed — one
//! `configurations` table per dialect with a unique `config_key` — so no
//! migration version tracking is needed.

use sqlx::{Pool, Postgres, Sqlite};
use tracing::info;

use crate::errors::{Error, Result};

/// Schema statements for SQLite
pub fn sqlite_migrations() -> Vec<&'static str> {
    vec![
        "CREATE TABLE IF NOT EXISTS configurations (\
         id INTEGER PRIMARY KEY AUTOINCREMENT, \
         config_key VARCHAR(255) NOT NULL UNIQUE, \
         value TEXT NOT NULL)",
    ]
}

/// Schema statements for PostgreSQL
pub fn postgres_migrations() -> Vec<&'static str> {
    vec![
        "CREATE TABLE IF NOT EXISTS configurations (\
         id SERIAL NOT NULL PRIMARY KEY, \
         config_key VARCHAR(255) NOT NULL UNIQUE, \
         value TEXT NOT NULL)",
    ]
}

/// Apply the SQLite schema
pub async fn run_sqlite_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    for statement in sqlite_migrations() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| Error::database(e, "Failed to apply SQLite schema"))?;
    }

    info!(database_type = "sqlite", "Database schema applied");
    Ok(())
}

/// Apply the PostgreSQL schema
pub async fn run_postgres_migrations(pool: &Pool<Postgres>) -> Result<()> {
    for statement in postgres_migrations() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| Error::database(e, "Failed to apply PostgreSQL schema"))?;
    }

    info!(database_type = "postgresql", "Database schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialects_share_one_table_shape() {
        let sqlite = sqlite_migrations();
        let postgres = postgres_migrations();

        assert_eq!(sqlite.len(), postgres.len());
        for statement in sqlite.iter().chain(postgres.iter()) {
            assert!(statement.contains("configurations"));
            assert!(statement.contains("config_key VARCHAR(255) NOT NULL UNIQUE"));
            assert!(statement.contains("value TEXT NOT NULL"));
        }
    }

    #[tokio::test]
    async fn test_run_sqlite_migrations_is_idempotent() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        run_sqlite_migrations(&pool).await.unwrap();
        run_sqlite_migrations(&pool).await.unwrap();

        sqlx::query("INSERT INTO configurations (config_key, value) VALUES ('a', '{}')")
            .execute(&pool)
            .await
            .unwrap();
    }
}
