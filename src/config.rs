//! Runtime configuration for storage partitioning and authentication policy.
//!
//! Configuration is plain data deserialised with `serde`; every field has a
//! default so a partial JSON document is enough to override one value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level board configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Remote collection and local cache naming.
    pub storage: StorageConfig,
    /// Credential validation and lockout policy.
    pub auth: AuthConfig,
}

impl BoardConfig {
    /// Parses a configuration from JSON text.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::Parse)
    }
}

/// Naming of remote partitions and local cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    /// Root segment of every partition path (`{users_root}/{uid}/...`).
    pub users_root: String,
    /// Collection holding active tasks.
    pub tasks_collection: String,
    /// Collection holding completed tasks.
    pub completed_collection: String,
    /// Optional prefix for local cache keys (`{namespace}-tasks-{uid}`).
    pub cache_namespace: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_root: "users".to_owned(),
            tasks_collection: "tasks".to_owned(),
            completed_collection: "completedTasks".to_owned(),
            cache_namespace: None,
        }
    }
}

impl StorageConfig {
    /// Builds a cache key from a base name and a partition key.
    #[must_use]
    pub fn cache_key(&self, base: &str, partition: &str) -> String {
        match &self.cache_namespace {
            Some(namespace) => format!("{namespace}-{base}-{partition}"),
            None => format!("{base}-{partition}"),
        }
    }
}

/// Credential policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthConfig {
    /// Minimum password length accepted at sign-up.
    pub min_password_length: usize,
    /// Consecutive failed sign-ins before the in-memory provider locks an
    /// account.
    pub max_failed_sign_ins: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            max_failed_sign_ins: 5,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[source] serde_json::Error),
}
