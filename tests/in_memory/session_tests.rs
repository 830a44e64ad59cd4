//! Session lifecycle tests: auth transitions open and close boards.

use super::helpers::{SessionHarness, harness, messages, titles};
use rstest::rstest;
use taskboard::board::{
    domain::{ColumnId, TaskDraft},
    ports::Severity,
};

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "secret1";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_up_starts_an_empty_board_with_welcome(
    mut harness: SessionHarness,
) -> Result<(), eyre::Report> {
    let user = harness.session.sign_up(EMAIL, PASSWORD, PASSWORD).await?;

    let board = harness
        .session
        .board()
        .ok_or_else(|| eyre::eyre!("board should be open"))?;
    assert_eq!(board.user(), user.id());
    assert_eq!(board.model().active_count(), 0);
    assert_eq!(
        messages(&harness.ports, Severity::Success),
        ["Welcome! Start by adding your first task."]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_in_loads_the_saved_board(mut harness: SessionHarness) -> Result<(), eyre::Report> {
    harness.session.sign_up(EMAIL, PASSWORD, PASSWORD).await?;
    harness
        .session
        .board_mut()
        .ok_or_else(|| eyre::eyre!("board should be open"))?
        .add_task(TaskDraft::new("Remember me", ColumnId::Pipeline))
        .await?;
    harness.session.sign_out().await?;

    harness.session.sign_in(EMAIL, PASSWORD).await?;

    let board = harness
        .session
        .board()
        .ok_or_else(|| eyre::eyre!("board should be open"))?;
    assert_eq!(titles(board.model(), ColumnId::Pipeline), ["Remember me"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_out_drops_board_but_keeps_cache(
    mut harness: SessionHarness,
) -> Result<(), eyre::Report> {
    harness.session.sign_up(EMAIL, PASSWORD, PASSWORD).await?;
    let cached_before = harness.ports.cache.len();

    harness.session.sign_out().await?;

    assert!(harness.session.board().is_none());
    assert!(!harness.session.is_signed_in());
    assert_eq!(harness.ports.cache.len(), cached_before);
    assert_eq!(
        messages(&harness.ports, Severity::Success).last().map(String::as_str),
        Some("Logged out successfully")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_sign_out_keeps_the_session(
    mut harness: SessionHarness,
) -> Result<(), eyre::Report> {
    harness.session.sign_up(EMAIL, PASSWORD, PASSWORD).await?;
    harness.provider.set_offline(true);

    let result = harness.session.sign_out().await;

    assert!(result.is_err());
    assert!(harness.session.is_signed_in());
    assert_eq!(
        messages(&harness.ports, Severity::Error),
        ["Error logging out"]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_sign_in_leaves_session_signed_out(mut harness: SessionHarness) {
    let result = harness.session.sign_in(EMAIL, PASSWORD).await;

    let err = result.expect_err("no such account");
    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(!harness.session.is_signed_in());
    assert_eq!(harness.ports.presenter.render_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn observed_auth_changes_open_and_close_boards(
    mut harness: SessionHarness,
) -> Result<(), eyre::Report> {
    let mut receiver = harness.session.subscribe();
    harness.session.sign_up(EMAIL, PASSWORD, PASSWORD).await?;
    let renders = harness.ports.presenter.render_count();

    receiver.changed().await?;
    let observed = receiver.borrow_and_update().clone();
    harness.session.handle_auth_change(observed).await;
    assert_eq!(
        harness.ports.presenter.render_count(),
        renders,
        "observing the open user must not reload"
    );

    harness.session.handle_auth_change(None).await;
    assert!(!harness.session.is_signed_in());

    let user = harness.provider.current_user();
    harness.session.handle_auth_change(user).await;
    assert!(harness.session.is_signed_in());
    Ok(())
}
