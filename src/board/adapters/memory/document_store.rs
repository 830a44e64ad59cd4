//! In-memory document store with switchable connectivity.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{DocumentFields, TaskId},
    ports::{DocumentStore, DocumentStoreError, DocumentStoreResult, PartitionPath, StoredDocument},
};

/// Thread-safe in-memory document store.
///
/// The store can be taken offline, or told to fail a number of upcoming
/// calls, to exercise fallback behaviour.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    collections: HashMap<PartitionPath, Vec<StoredDocument>>,
    next_id: u64,
    offline: bool,
    failures_remaining: usize,
}

impl InMemoryStoreState {
    fn check_available(&mut self, operation: &str) -> DocumentStoreResult<()> {
        if self.offline {
            return Err(DocumentStoreError::Unavailable(format!(
                "{operation}: store is offline"
            )));
        }
        if self.failures_remaining > 0 {
            self.failures_remaining -= 1;
            return Err(DocumentStoreError::Unavailable(format!(
                "{operation}: injected failure"
            )));
        }
        Ok(())
    }
}

fn poisoned(err: &impl std::fmt::Display) -> DocumentStoreError {
    DocumentStoreError::backend(std::io::Error::other(err.to_string()))
}

impl InMemoryDocumentStore {
    /// Creates an empty, online store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the store on or off; while offline every call fails.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.write() {
            state.offline = offline;
        }
    }

    /// Makes the next `count` calls fail, whatever their kind.
    pub fn fail_next(&self, count: usize) {
        if let Ok(mut state) = self.state.write() {
            state.failures_remaining = count;
        }
    }

    /// Returns the documents of a collection in creation order.
    #[must_use]
    pub fn documents(&self, path: &PartitionPath) -> Vec<StoredDocument> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.collections.get(path).cloned())
            .unwrap_or_default()
    }

    /// Returns the fields of one document.
    #[must_use]
    pub fn document(&self, path: &PartitionPath, id: &TaskId) -> Option<DocumentFields> {
        self.documents(path)
            .into_iter()
            .find(|document| &document.id == id)
            .map(|document| document.fields)
    }

    /// Seeds a document under a chosen identifier.
    pub fn insert(&self, path: &PartitionPath, id: TaskId, fields: DocumentFields) {
        if let Ok(mut state) = self.state.write() {
            state
                .collections
                .entry(path.clone())
                .or_default()
                .push(StoredDocument { id, fields });
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(
        &self,
        path: &PartitionPath,
        fields: DocumentFields,
    ) -> DocumentStoreResult<TaskId> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.check_available("create")?;
        state.next_id += 1;
        let id = TaskId::new(format!("doc-{}", state.next_id));
        state
            .collections
            .entry(path.clone())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn update(
        &self,
        path: &PartitionPath,
        id: &TaskId,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.check_available("update")?;
        let document = state
            .collections
            .get_mut(path)
            .and_then(|documents| documents.iter_mut().find(|document| &document.id == id))
            .ok_or_else(|| DocumentStoreError::NotFound(id.clone()))?;
        document.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, path: &PartitionPath, id: &TaskId) -> DocumentStoreResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.check_available("delete")?;
        if let Some(documents) = state.collections.get_mut(path) {
            documents.retain(|document| &document.id != id);
        }
        Ok(())
    }

    async fn list_all(&self, path: &PartitionPath) -> DocumentStoreResult<Vec<StoredDocument>> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.check_available("list")?;
        Ok(state.collections.get(path).cloned().unwrap_or_default())
    }
}
