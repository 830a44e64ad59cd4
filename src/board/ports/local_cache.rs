//! Local persistent cache port.
//!
//! A string key/value store surviving restarts. Keys are scoped by user
//! partition; values are full JSON snapshots.

use std::sync::Arc;
use thiserror::Error;

/// Result type for local cache operations.
pub type LocalCacheResult<T> = Result<T, LocalCacheError>;

/// Local key/value cache contract.
pub trait LocalCache: Send + Sync {
    /// Reads a value; `None` when the key was never written.
    ///
    /// # Errors
    ///
    /// Returns [`LocalCacheError`] when the underlying storage fails.
    fn get(&self, key: &str) -> LocalCacheResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`LocalCacheError`] when the underlying storage fails.
    fn set(&self, key: &str, value: &str) -> LocalCacheResult<()>;
}

/// Errors returned by local cache implementations.
#[derive(Debug, Clone, Error)]
pub enum LocalCacheError {
    /// The key cannot be stored by this cache.
    #[error("invalid cache key: {0}")]
    InvalidKey(String),

    /// Storage-layer failure.
    #[error("local cache error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl LocalCacheError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
