//! Shared world state for board lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    auth::{adapters::memory::InMemoryAuthProvider, domain::AuthUser},
    board::{
        adapters::memory::{InMemoryDocumentStore, InMemoryLocalCache, RecordingPresenter},
        domain::{ColumnId, ColumnModel, TaskId},
        services::{BoardPorts, BoardService, TaskStoreAdapter},
    },
    config::BoardConfig,
    session::SessionManager,
};

/// Session type used by the BDD world.
pub type TestSession = SessionManager<
    InMemoryAuthProvider,
    InMemoryDocumentStore,
    InMemoryLocalCache,
    RecordingPresenter,
    DefaultClock,
>;

/// Board type used by the BDD world.
pub type TestBoard =
    BoardService<InMemoryDocumentStore, InMemoryLocalCache, RecordingPresenter, DefaultClock>;

/// Scenario world for board lifecycle behaviour tests.
pub struct BoardWorld {
    pub config: BoardConfig,
    pub store: Arc<InMemoryDocumentStore>,
    pub cache: Arc<InMemoryLocalCache>,
    pub presenter: Arc<RecordingPresenter>,
    pub session: TestSession,
    pub user: Option<AuthUser>,
}

impl BoardWorld {
    /// Creates a world with a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        let config = BoardConfig::default();
        let store = Arc::new(InMemoryDocumentStore::new());
        let cache = Arc::new(InMemoryLocalCache::new());
        let presenter = Arc::new(RecordingPresenter::new());
        let ports = BoardPorts {
            store: Arc::clone(&store),
            cache: Arc::clone(&cache),
            presenter: Arc::clone(&presenter),
            clock: Arc::new(DefaultClock),
        };
        let provider = Arc::new(InMemoryAuthProvider::new(config.auth));
        let session = SessionManager::new(provider, ports, config.clone());

        Self {
            config,
            store,
            cache,
            presenter,
            session,
            user: None,
        }
    }

    /// Returns the open board.
    ///
    /// # Errors
    ///
    /// Returns an error when no user is signed in.
    pub fn board(&self) -> Result<&TestBoard, eyre::Report> {
        self.session
            .board()
            .ok_or_else(|| eyre::eyre!("no board is open in scenario world"))
    }

    /// Returns the open board mutably.
    ///
    /// # Errors
    ///
    /// Returns an error when no user is signed in.
    pub fn board_mut(&mut self) -> Result<&mut TestBoard, eyre::Report> {
        self.session
            .board_mut()
            .ok_or_else(|| eyre::eyre!("no board is open in scenario world"))
    }

    /// Reads the board the local cache holds for the scenario user.
    ///
    /// # Errors
    ///
    /// Returns an error when no user has signed in during the scenario.
    pub fn cached_board(&self) -> Result<ColumnModel, eyre::Report> {
        let user = self
            .user
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing signed-in user in scenario world"))?;
        let adapter = TaskStoreAdapter::new(
            Arc::clone(&self.store),
            Arc::clone(&self.cache),
            &self.config.storage,
            user.id(),
        );
        Ok(adapter.read_snapshot().into_model())
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a column name used in a scenario.
///
/// # Errors
///
/// Returns an error for names outside the fixed column set.
pub fn column(name: &str) -> Result<ColumnId, eyre::Report> {
    ColumnId::try_from(name).map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))
}

/// Finds an active or completed task by title.
///
/// # Errors
///
/// Returns an error when no task has the title.
pub fn task_id(model: &ColumnModel, title: &str) -> Result<TaskId, eyre::Report> {
    model
        .active_tasks()
        .find(|task| task.title().as_str() == title)
        .map(|task| task.id().clone())
        .or_else(|| {
            model
                .completed()
                .iter()
                .find(|completed| completed.task().title().as_str() == title)
                .map(|completed| completed.id().clone())
        })
        .ok_or_else(|| eyre::eyre!("no task titled {title:?}"))
}

/// Returns the titles of a column, joined the way scenarios write them.
pub fn column_titles(model: &ColumnModel, column: ColumnId) -> String {
    model
        .column(column)
        .iter()
        .map(|task| task.title().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
