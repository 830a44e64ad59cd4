//! Task store adapter: remote persistence with local-cache fallback.
//!
//! Every remote call goes through [`settle`], the one place where a failed
//! store operation is logged and turned into a local fallback. Remote calls
//! are never retried.

use crate::board::{
    domain::{
        BoardSnapshot, ColumnModel, CompletedTask, DocumentFields, Task, TaskDocument, TaskId,
        UserId,
    },
    ports::{
        Collection, DocumentStore, DocumentStoreResult, LocalCache, LocalCacheError,
        LocalCacheResult, PartitionPath, StoredDocument,
    },
};
use crate::config::StorageConfig;
use std::sync::Arc;
use tracing::{debug, warn};

const ACTIVE_CACHE_KEY: &str = "tasks";
const COMPLETED_CACHE_KEY: &str = "completed-tasks";

/// How a board change was persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Durability {
    /// The remote store accepted the change.
    Synced,
    /// The change is only ever kept locally (same-column reordering).
    CachedOnly,
    /// The remote store failed; the change was kept in the local cache.
    Fallback,
}

impl Durability {
    /// Combines two steps of one logical operation.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Fallback, _) | (_, Self::Fallback) => Self::Fallback,
            (Self::CachedOnly, _) | (_, Self::CachedOnly) => Self::CachedOnly,
            (Self::Synced, Self::Synced) => Self::Synced,
        }
    }
}

/// Result of one remote call after the fallback policy was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence<T> {
    /// The remote store accepted the call.
    Remote(T),
    /// The remote call failed; the caller must apply the change locally.
    LocalFallback,
}

impl<T> Persistence<T> {
    /// Returns the durability this call achieved.
    #[must_use]
    pub const fn durability(&self) -> Durability {
        match self {
            Self::Remote(_) => Durability::Synced,
            Self::LocalFallback => Durability::Fallback,
        }
    }

    /// Returns the remote value, if any.
    #[must_use]
    pub fn remote(self) -> Option<T> {
        match self {
            Self::Remote(value) => Some(value),
            Self::LocalFallback => None,
        }
    }
}

/// Board loaded at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBoard {
    /// The board contents.
    pub model: ColumnModel,
    /// `Synced` when read from the remote store, `Fallback` when read from
    /// the local cache.
    pub durability: Durability,
}

/// Translates board operations into document store calls for one user.
pub struct TaskStoreAdapter<S, L>
where
    S: DocumentStore,
    L: LocalCache,
{
    store: Arc<S>,
    cache: Arc<L>,
    tasks_path: PartitionPath,
    completed_path: PartitionPath,
    active_key: String,
    completed_key: String,
}

impl<S, L> TaskStoreAdapter<S, L>
where
    S: DocumentStore,
    L: LocalCache,
{
    /// Creates an adapter scoped to one user partition.
    #[must_use]
    pub fn new(store: Arc<S>, cache: Arc<L>, storage: &StorageConfig, user: &UserId) -> Self {
        Self {
            store,
            cache,
            tasks_path: PartitionPath::new(storage, user, Collection::Tasks),
            completed_path: PartitionPath::new(storage, user, Collection::CompletedTasks),
            active_key: storage.cache_key(ACTIVE_CACHE_KEY, user.as_str()),
            completed_key: storage.cache_key(COMPLETED_CACHE_KEY, user.as_str()),
        }
    }

    /// Returns the path of a collection in this partition.
    #[must_use]
    pub const fn path(&self, collection: Collection) -> &PartitionPath {
        match collection {
            Collection::Tasks => &self.tasks_path,
            Collection::CompletedTasks => &self.completed_path,
        }
    }

    /// Creates a document and returns its store-issued identifier.
    pub async fn create_task(
        &self,
        collection: Collection,
        document: &TaskDocument,
    ) -> Persistence<TaskId> {
        let path = self.path(collection);
        settle("create", path, self.store.create(path, document.fields()).await)
    }

    /// Merges fields into a stored document.
    pub async fn update_task(
        &self,
        collection: Collection,
        id: &TaskId,
        fields: DocumentFields,
    ) -> Persistence<()> {
        let path = self.path(collection);
        settle("update", path, self.store.update(path, id, fields).await)
    }

    /// Deletes a stored document.
    pub async fn delete_task(&self, collection: Collection, id: &TaskId) -> Persistence<()> {
        let path = self.path(collection);
        settle("delete", path, self.store.delete(path, id).await)
    }

    /// Lists active tasks, skipping documents that fail validation.
    ///
    /// # Errors
    ///
    /// Returns the store error when the listing itself fails.
    pub async fn list_tasks(&self) -> DocumentStoreResult<Vec<Task>> {
        let documents = self.store.list_all(&self.tasks_path).await?;
        Ok(parse_documents(documents, &self.tasks_path, TaskDocument::parse_active))
    }

    /// Lists completed tasks, skipping documents that fail validation.
    ///
    /// # Errors
    ///
    /// Returns the store error when the listing itself fails.
    pub async fn list_completed(&self) -> DocumentStoreResult<Vec<CompletedTask>> {
        let documents = self.store.list_all(&self.completed_path).await?;
        Ok(parse_documents(
            documents,
            &self.completed_path,
            TaskDocument::parse_completed,
        ))
    }

    /// Loads the board, preferring the remote store.
    ///
    /// A remote load keeps the column order recorded in the local cache for
    /// tasks the cache knows. When either listing fails the cached snapshot
    /// is used instead.
    pub async fn load(&self) -> LoadedBoard {
        let cached = self.read_snapshot().into_model();
        match self.fetch_remote().await {
            Ok((active, completed)) => {
                let mut model = ColumnModel::from_tasks(active, completed);
                model.adopt_order(&cached);
                LoadedBoard {
                    model,
                    durability: Durability::Synced,
                }
            }
            Err(err) => {
                warn!(
                    path = %self.tasks_path,
                    error = %err,
                    "remote load failed; using cached board"
                );
                LoadedBoard {
                    model: cached,
                    durability: Durability::Fallback,
                }
            }
        }
    }

    async fn fetch_remote(&self) -> DocumentStoreResult<(Vec<Task>, Vec<CompletedTask>)> {
        let active = self.list_tasks().await?;
        let completed = self.list_completed().await?;
        Ok((active, completed))
    }

    /// Reads the cached snapshot; unreadable entries count as empty.
    #[must_use]
    pub fn read_snapshot(&self) -> BoardSnapshot {
        let active = self.read_cache(&self.active_key);
        let completed = self.read_cache(&self.completed_key);
        BoardSnapshot::parse(active.as_deref(), completed.as_deref())
    }

    /// Rewrites the cached snapshot from the current board.
    ///
    /// # Errors
    ///
    /// Returns [`LocalCacheError`] when the cache
    /// rejects a write or the snapshot cannot be encoded.
    pub fn save_snapshot(&self, model: &ColumnModel) -> LocalCacheResult<()> {
        let snapshot = BoardSnapshot::capture(model);
        let active = snapshot
            .active_json()
            .map_err(LocalCacheError::storage)?;
        let completed = snapshot
            .completed_json()
            .map_err(LocalCacheError::storage)?;
        self.cache.set(&self.active_key, &active)?;
        self.cache.set(&self.completed_key, &completed)?;
        debug!(key = %self.active_key, tasks = snapshot.len(), "local snapshot saved");
        Ok(())
    }

    fn read_cache(&self, key: &str) -> Option<String> {
        match self.cache.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "local cache read failed");
                None
            }
        }
    }
}

/// Applies the fallback policy to a remote result.
fn settle<T>(
    operation: &'static str,
    path: &PartitionPath,
    result: DocumentStoreResult<T>,
) -> Persistence<T> {
    match result {
        Ok(value) => Persistence::Remote(value),
        Err(err) => {
            warn!(
                operation,
                path = %path,
                error = %err,
                "remote store call failed; falling back to local cache"
            );
            Persistence::LocalFallback
        }
    }
}

fn parse_documents<T, E: std::fmt::Display>(
    documents: Vec<StoredDocument>,
    path: &PartitionPath,
    parse: impl Fn(TaskId, &DocumentFields) -> Result<T, E>,
) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document.id.clone();
            match parse(document.id, &document.fields) {
                Ok(task) => Some(task),
                Err(err) => {
                    warn!(path = %path, id = %id, error = %err, "skipping malformed document");
                    None
                }
            }
        })
        .collect()
}
