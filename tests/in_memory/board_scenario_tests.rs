//! End-to-end board workflows against the in-memory store and cache.

use std::sync::Arc;

use super::helpers::{MemoryBoard, MemoryPorts, active_id, completed_id, messages, ports, titles};
use mockable::DefaultClock;
use rstest::rstest;
use taskboard::{
    board::{
        adapters::memory::{InMemoryLocalCache, RecordingPresenter},
        domain::{ColumnId, DropGesture, DropHalf, TaskDraft, UserId},
        ports::{Collection, Severity},
        services::{BoardPorts, BoardService, Durability},
    },
    config::StorageConfig,
};

fn user() -> Result<UserId, eyre::Report> {
    UserId::new("user-1").map_err(|err| eyre::eyre!("fixture user id: {err}"))
}

async fn open(ports: &MemoryPorts) -> Result<MemoryBoard, eyre::Report> {
    Ok(BoardService::open(user()?, ports.clone(), &StorageConfig::default()).await)
}

async fn add(board: &mut MemoryBoard, title: &str, column: ColumnId) -> Result<(), eyre::Report> {
    let outcome = board.add_task(TaskDraft::new(title, column)).await?;
    eyre::ensure!(outcome.is_applied(), "add of {title:?} was not applied");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_complete_and_restore(ports: MemoryPorts) -> Result<(), eyre::Report> {
    let mut board = open(&ports).await?;
    add(&mut board, "A", ColumnId::InProgress).await?;
    add(&mut board, "B", ColumnId::InProgress).await?;
    let a = active_id(board.model(), "A")?;
    let b = active_id(board.model(), "B")?;

    let dropped = board
        .drop_task(
            &DropGesture::new(b, ColumnId::InProgress, ColumnId::InProgress)
                .onto(a.clone(), DropHalf::Upper),
        )
        .await;
    eyre::ensure!(dropped.is_applied(), "drop was not applied");
    assert_eq!(titles(board.model(), ColumnId::InProgress), ["B", "A"]);

    board.complete_task(&a).await;
    assert_eq!(titles(board.model(), ColumnId::InProgress), ["B"]);
    let archived = completed_id(board.model(), "A")?;
    let store = &ports.store;
    assert_eq!(store.documents(board.adapter().path(Collection::Tasks)).len(), 1);
    assert_eq!(
        store
            .documents(board.adapter().path(Collection::CompletedTasks))
            .len(),
        1
    );

    board.restore_task(&archived).await;
    assert_eq!(titles(board.model(), ColumnId::InProgress), ["B", "A"]);
    assert!(board.model().completed().is_empty());
    assert_eq!(
        messages(&ports, Severity::Success).last().map(String::as_str),
        Some("\"A\" restored to In Progress")
    );
    assert!(messages(&ports, Severity::Warning).is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reopened_board_keeps_local_reordering(ports: MemoryPorts) -> Result<(), eyre::Report> {
    let mut board = open(&ports).await?;
    for title in ["A", "B", "C"] {
        add(&mut board, title, ColumnId::Ideas).await?;
    }
    let a = active_id(board.model(), "A")?;
    let c = active_id(board.model(), "C")?;
    board
        .move_task(&c, ColumnId::Ideas, ColumnId::Ideas, Some(0))
        .await;
    assert_eq!(titles(board.model(), ColumnId::Ideas), ["C", "A", "B"]);
    drop(board);

    let mut reopened = open(&ports).await?;

    assert_eq!(titles(reopened.model(), ColumnId::Ideas), ["C", "A", "B"]);
    assert_eq!(reopened.reload().await, Durability::Synced);
    assert!(reopened.model().find(&a).is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_from_another_device_follow_cached_order(
    ports: MemoryPorts,
) -> Result<(), eyre::Report> {
    let mut board = open(&ports).await?;
    add(&mut board, "First", ColumnId::OnDeck).await?;
    add(&mut board, "Second", ColumnId::OnDeck).await?;
    let second = active_id(board.model(), "Second")?;
    board
        .move_task(&second, ColumnId::OnDeck, ColumnId::OnDeck, Some(0))
        .await;
    drop(board);

    let other_device = BoardPorts {
        store: Arc::clone(&ports.store),
        cache: Arc::new(InMemoryLocalCache::new()),
        presenter: Arc::new(RecordingPresenter::new()),
        clock: Arc::new(DefaultClock),
    };
    let mut elsewhere = BoardService::open(user()?, other_device, &StorageConfig::default()).await;
    elsewhere
        .add_task(TaskDraft::new("Third", ColumnId::OnDeck))
        .await?;

    let reopened = open(&ports).await?;

    assert_eq!(
        titles(reopened.model(), ColumnId::OnDeck),
        ["Second", "First", "Third"]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_store_is_authoritative_once_back_online(
    ports: MemoryPorts,
) -> Result<(), eyre::Report> {
    let mut board = open(&ports).await?;
    add(&mut board, "Synced", ColumnId::Pipeline).await?;
    ports.store.set_offline(true);
    add(&mut board, "Local", ColumnId::Pipeline).await?;
    drop(board);

    let offline = open(&ports).await?;
    assert_eq!(titles(offline.model(), ColumnId::Pipeline), ["Synced", "Local"]);
    drop(offline);

    ports.store.set_offline(false);
    let online = open(&ports).await?;
    assert_eq!(titles(online.model(), ColumnId::Pipeline), ["Synced"]);
    Ok(())
}
