//! In-memory durable store, for tests and ephemeral runs.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::Result;
use crate::store::DurableStore;

/// `HashMap`-backed [`DurableStore`]. Never fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.rows.read().get(key).cloned())
    }

    fn upsert(&self, key: &str, value: &str) -> Result<()> {
        self.rows.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.rows.write().remove(key);
        Ok(())
    }
}
