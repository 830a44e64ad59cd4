//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    auth::adapters::memory::InMemoryAuthProvider,
    board::{
        adapters::memory::{InMemoryDocumentStore, InMemoryLocalCache, RecordingPresenter},
        domain::{ColumnId, ColumnModel, TaskId},
        ports::Severity,
        services::{BoardPorts, BoardService},
    },
    config::BoardConfig,
    session::SessionManager,
};

/// Ports backed entirely by in-memory adapters.
pub type MemoryPorts =
    BoardPorts<InMemoryDocumentStore, InMemoryLocalCache, RecordingPresenter, DefaultClock>;

/// Board service over in-memory ports.
pub type MemoryBoard =
    BoardService<InMemoryDocumentStore, InMemoryLocalCache, RecordingPresenter, DefaultClock>;

/// Session manager over in-memory ports and auth provider.
pub type MemorySession = SessionManager<
    InMemoryAuthProvider,
    InMemoryDocumentStore,
    InMemoryLocalCache,
    RecordingPresenter,
    DefaultClock,
>;

/// Provides fresh in-memory board ports.
#[fixture]
pub fn ports() -> MemoryPorts {
    BoardPorts {
        store: Arc::new(InMemoryDocumentStore::new()),
        cache: Arc::new(InMemoryLocalCache::new()),
        presenter: Arc::new(RecordingPresenter::new()),
        clock: Arc::new(DefaultClock),
    }
}

/// Session pieces shared between a test and the session under test.
pub struct SessionHarness {
    /// Auth provider the session signs in against.
    pub provider: Arc<InMemoryAuthProvider>,
    /// Board ports the session opens boards on.
    pub ports: MemoryPorts,
    /// The session under test.
    pub session: MemorySession,
}

/// Provides a signed-out session with default configuration.
#[fixture]
pub fn harness(ports: MemoryPorts) -> SessionHarness {
    let config = BoardConfig::default();
    let provider = Arc::new(InMemoryAuthProvider::new(config.auth));
    let session = SessionManager::new(Arc::clone(&provider), ports.clone(), config);
    SessionHarness {
        provider,
        ports,
        session,
    }
}

/// Returns the titles of a column in board order.
pub fn titles(model: &ColumnModel, column: ColumnId) -> Vec<String> {
    model
        .column(column)
        .iter()
        .map(|task| task.title().to_string())
        .collect()
}

/// Finds an active task by title.
///
/// # Errors
///
/// Returns an error when no active task has the title.
pub fn active_id(model: &ColumnModel, title: &str) -> Result<TaskId, eyre::Report> {
    model
        .active_tasks()
        .find(|task| task.title().as_str() == title)
        .map(|task| task.id().clone())
        .ok_or_else(|| eyre::eyre!("no active task titled {title:?}"))
}

/// Finds a completed task by title.
///
/// # Errors
///
/// Returns an error when no completed task has the title.
pub fn completed_id(model: &ColumnModel, title: &str) -> Result<TaskId, eyre::Report> {
    model
        .completed()
        .iter()
        .find(|completed| completed.task().title().as_str() == title)
        .map(|completed| completed.id().clone())
        .ok_or_else(|| eyre::eyre!("no completed task titled {title:?}"))
}

/// Returns the notification messages of one severity.
pub fn messages(ports: &MemoryPorts, severity: Severity) -> Vec<String> {
    ports
        .presenter
        .notifications_with(severity)
        .into_iter()
        .map(|notification| notification.message)
        .collect()
}
