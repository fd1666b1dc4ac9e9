//! Keyed state store abstraction
//!
//! The engine keeps mood history and per-user conversation state behind this
//! trait so that a persistent backing can be substituted without touching the
//! engine logic.
//!
//! - `InMemoryStore` - Default, uses a HashMap (no persistence across restarts)

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::Result;

/// Store for values addressed by string key
pub trait StateStore<V>: Send + Sync {
    /// Get value by key
    fn get(&self, key: &str) -> Result<Option<V>>;

    /// Insert or replace value
    fn put(&self, key: &str, value: V) -> Result<()>;

    /// Delete value, returning whether it existed
    fn delete(&self, key: &str) -> Result<bool>;

    /// Backend name for logging
    fn backend(&self) -> &'static str {
        "custom"
    }
}

/// In-memory store (default)
pub struct InMemoryStore<V> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V> InMemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All keys currently stored
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl<V> Default for InMemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> StateStore<V> for InMemoryStore<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Result<Option<V>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: V) -> Result<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn backend(&self) -> &'static str {
        "in_memory"
    }
}
