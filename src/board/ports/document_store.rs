//! Remote document store port.
//!
//! The store holds one collection of documents per user partition and
//! logical collection. It issues document identifiers on creation.

use crate::board::domain::{DocumentFields, TaskId, UserId};
use crate::config::StorageConfig;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Logical collection inside a user partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Active board tasks.
    Tasks,
    /// Completed tasks.
    CompletedTasks,
}

/// Fully qualified collection path (`users/{uid}/tasks`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionPath {
    root: String,
    user: UserId,
    collection: Collection,
    collection_name: String,
}

impl PartitionPath {
    /// Builds the path of a user's collection using configured names.
    #[must_use]
    pub fn new(storage: &StorageConfig, user: &UserId, collection: Collection) -> Self {
        let collection_name = match collection {
            Collection::Tasks => storage.tasks_collection.clone(),
            Collection::CompletedTasks => storage.completed_collection.clone(),
        };
        Self {
            root: storage.users_root.clone(),
            user: user.clone(),
            collection,
            collection_name,
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the logical collection.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }
}

impl fmt::Display for PartitionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.root, self.user, self.collection_name)
    }
}

/// A document as listed from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-issued identifier.
    pub id: TaskId,
    /// Document fields.
    pub fields: DocumentFields,
}

/// Remote document store contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document and returns its store-issued identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError`] when the store rejects the write or is
    /// unreachable.
    async fn create(
        &self,
        path: &PartitionPath,
        fields: DocumentFields,
    ) -> DocumentStoreResult<TaskId>;

    /// Merges fields into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] when the document does not
    /// exist.
    async fn update(
        &self,
        path: &PartitionPath,
        id: &TaskId,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()>;

    /// Deletes a document. Deleting an absent document succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError`] when the store is unreachable.
    async fn delete(&self, path: &PartitionPath, id: &TaskId) -> DocumentStoreResult<()>;

    /// Lists every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError`] when the store is unreachable.
    async fn list_all(&self, path: &PartitionPath) -> DocumentStoreResult<Vec<StoredDocument>>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// The store could not be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// The document was not found.
    #[error("document not found: {0}")]
    NotFound(TaskId),

    /// Backend-specific failure.
    #[error("document store error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
