//! Port contracts for board persistence and presentation.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod document_store;
pub mod local_cache;
pub mod presenter;

pub use document_store::{
    Collection, DocumentStore, DocumentStoreError, DocumentStoreResult, PartitionPath,
    StoredDocument,
};
pub use local_cache::{LocalCache, LocalCacheError, LocalCacheResult};
pub use presenter::{BoardPresenter, Notification, Severity};
