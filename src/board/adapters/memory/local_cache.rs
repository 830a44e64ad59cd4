//! In-memory local cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::ports::{LocalCache, LocalCacheError, LocalCacheResult};

/// Thread-safe in-memory key/value cache.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryLocalCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// Returns whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(err: &impl std::fmt::Display) -> LocalCacheError {
    LocalCacheError::storage(std::io::Error::other(err.to_string()))
}

impl LocalCache for InMemoryLocalCache {
    fn get(&self, key: &str) -> LocalCacheResult<Option<String>> {
        let entries = self.entries.read().map_err(|err| poisoned(&err))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> LocalCacheResult<()> {
        let mut entries = self.entries.write().map_err(|err| poisoned(&err))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
