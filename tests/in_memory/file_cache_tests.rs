//! Board sessions backed by the file-based local cache.

use std::sync::Arc;

use camino::Utf8Path;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskboard::{
    board::{
        adapters::{
            fs::FileLocalCache,
            memory::{InMemoryDocumentStore, RecordingPresenter},
        },
        domain::{ColumnId, TaskDraft, UserId},
        ports::Severity,
        services::{BoardPorts, BoardService},
    },
    config::StorageConfig,
};

use super::helpers::titles;

type FilePorts =
    BoardPorts<InMemoryDocumentStore, FileLocalCache, RecordingPresenter, DefaultClock>;

/// Temporary directory kept alive for the duration of a test.
struct CacheDir {
    temp: tempfile::TempDir,
}

impl CacheDir {
    fn open(&self, store: &Arc<InMemoryDocumentStore>) -> Result<FilePorts, eyre::Report> {
        let path = Utf8Path::from_path(self.temp.path())
            .ok_or_else(|| eyre::eyre!("temporary directory path is not UTF-8"))?;
        Ok(BoardPorts {
            store: Arc::clone(store),
            cache: Arc::new(FileLocalCache::open(path)?),
            presenter: Arc::new(RecordingPresenter::new()),
            clock: Arc::new(DefaultClock),
        })
    }
}

#[fixture]
fn cache_dir() -> CacheDir {
    CacheDir {
        temp: tempfile::tempdir().expect("temporary directory"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offline_changes_survive_a_restart(cache_dir: CacheDir) -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryDocumentStore::new());
    let user = UserId::new("user-1")?;
    let storage = StorageConfig::default();

    let mut board = BoardService::open(user.clone(), cache_dir.open(&store)?, &storage).await;
    store.set_offline(true);
    let outcome = board
        .add_task(TaskDraft::new("Written offline", ColumnId::Ideas))
        .await?;
    eyre::ensure!(outcome.is_fallback(), "store was offline");
    drop(board);

    let restarted = BoardService::open(user, cache_dir.open(&store)?, &storage).await;

    assert_eq!(
        titles(restarted.model(), ColumnId::Ideas),
        ["Written offline"]
    );
    assert!(cache_dir.temp.path().join("tasks-user-1.json").exists());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn email_shaped_user_ids_are_cached_on_disk(
    cache_dir: CacheDir,
) -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryDocumentStore::new());
    let user = UserId::new("alice@example.com")?;
    let storage = StorageConfig::default();
    store.set_offline(true);

    let ports = cache_dir.open(&store)?;
    let presenter = Arc::clone(&ports.presenter);
    let mut board = BoardService::open(user.clone(), ports, &storage).await;
    board
        .add_task(TaskDraft::new("Draft the plan", ColumnId::Ideas))
        .await?;
    drop(board);

    let reopened = BoardService::open(user, cache_dir.open(&store)?, &storage).await;

    assert_eq!(titles(reopened.model(), ColumnId::Ideas), ["Draft the plan"]);
    assert!(presenter.notifications_with(Severity::Error).is_empty());
    assert!(
        cache_dir
            .temp
            .path()
            .join("tasks-alice%40example%2Ecom.json")
            .exists()
    );
    Ok(())
}
