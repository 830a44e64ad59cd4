//! In-memory adapters used by tests and local development.

mod document_store;
mod local_cache;
mod presenter;

pub use document_store::InMemoryDocumentStore;
pub use local_cache::InMemoryLocalCache;
pub use presenter::RecordingPresenter;
