//! In-memory store backend.
//!
//! A mutex-guarded map, used for tests and single-process deployments where
//! durability does not matter. Identifiers are handed out by a counter and
//! survive value overwrites exactly like the SQL auto-increment ids do.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::{Error, Result};

use super::{Configuration, Store};

#[derive(Debug)]
struct Inner {
    /// name → (id, value)
    rows: HashMap<String, (u64, String)>,
    next_id: u64,
}

/// Mutex-guarded in-memory implementation of [`Store`]
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Identifiers start at 1, matching the SQL auto-increment columns.
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner { rows: HashMap::new(), next_id: 1 }) }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| Error::internal("Memory store lock poisoned"))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn put(&self, name: &str, value: &str) -> Result<()> {
        let mut inner = self.lock()?;
        match inner.rows.get_mut(name) {
            Some((_, existing)) => {
                *existing = value.to_string();
            }
            None => {
                let id = inner.next_id;
                inner.next_id += 1;
                inner.rows.insert(name.to_string(), (id, value.to_string()));
            }
        }
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Configuration>> {
        let inner = self.lock()?;
        Ok(inner.rows.get(name).map(|(id, value)| Configuration {
            id: id.to_string(),
            name: name.to_string(),
            value: value.clone(),
        }))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Configuration>> {
        let inner = self.lock()?;
        Ok(inner.rows.iter().find(|(_, (row_id, _))| row_id.to_string() == id).map(
            |(name, (row_id, value))| Configuration {
                id: row_id.to_string(),
                name: name.clone(),
                value: value.clone(),
            },
        ))
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let mut inner = self.lock()?;
        Ok(inner.rows.remove(name).is_some())
    }
}
