//! Then steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, column, column_titles};
use rstest_bdd_macros::then;
use taskboard::board::ports::Severity;

#[then(r#"the "{column_name}" column reads "{expected}""#)]
fn column_reads(
    world: &BoardWorld,
    column_name: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let actual = column_titles(world.board()?.model(), column(&column_name)?);
    eyre::ensure!(
        actual == expected,
        "expected {column_name} to read {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the archive holds "{title}""#)]
fn archive_holds(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let found = board
        .model()
        .completed()
        .iter()
        .any(|completed| completed.task().title().as_str() == title);
    eyre::ensure!(found, "archive does not hold {title:?}");
    Ok(())
}

#[then("the archive is empty")]
fn archive_is_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    let archived = world.board()?.model().completed().len();
    eyre::ensure!(archived == 0, "expected empty archive, found {archived} tasks");
    Ok(())
}

#[then(r#"a warning reads "{message}""#)]
fn warning_reads(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let warnings = world.presenter.notifications_with(Severity::Warning);
    eyre::ensure!(
        warnings.iter().any(|warning| warning.message == message),
        "expected warning {message:?}, found {warnings:?}"
    );
    Ok(())
}

#[then(r#"the local cache holds "{title}" in "{column_name}""#)]
fn cache_holds(
    world: &BoardWorld,
    title: String,
    column_name: String,
) -> Result<(), eyre::Report> {
    let cached = world.cached_board()?;
    let titles = column_titles(&cached, column(&column_name)?);
    eyre::ensure!(
        titles.split(", ").any(|cached_title| cached_title == title),
        "cache column {column_name} holds {titles:?}, expected {title:?}"
    );
    Ok(())
}

#[then("no board is open")]
fn no_board_open(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(!world.session.is_signed_in(), "a board is still open");
    Ok(())
}
