//! When steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, column, run_async, task_id};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::domain::{DropGesture, DropHalf, TaskDraft};

#[when(r#"the user adds "{title}" to "{column_name}""#)]
fn add_task(
    world: &mut BoardWorld,
    title: String,
    column_name: String,
) -> Result<(), eyre::Report> {
    let target = column(&column_name)?;
    let board = world.board_mut()?;
    run_async(board.add_task(TaskDraft::new(title, target))).wrap_err("add task")?;
    Ok(())
}

#[when(r#"the user drops "{dragged}" on the upper half of "{anchor}""#)]
fn drop_on_upper_half(
    world: &mut BoardWorld,
    dragged: String,
    anchor: String,
) -> Result<(), eyre::Report> {
    let board = world.board_mut()?;
    let dragged_id = task_id(board.model(), &dragged)?;
    let anchor_id = task_id(board.model(), &anchor)?;
    let origin = board
        .model()
        .locate(&dragged_id)
        .ok_or_else(|| eyre::eyre!("dragged task is not active"))?
        .column;
    let target = board
        .model()
        .locate(&anchor_id)
        .ok_or_else(|| eyre::eyre!("anchor task is not active"))?
        .column;

    let gesture = DropGesture::new(dragged_id, origin, target).onto(anchor_id, DropHalf::Upper);
    let outcome = run_async(board.drop_task(&gesture));
    eyre::ensure!(outcome.is_applied(), "drop of {dragged:?} was not applied");
    Ok(())
}

#[when(r#"the user completes "{title}""#)]
fn complete_task(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let board = world.board_mut()?;
    let id = task_id(board.model(), &title)?;
    let outcome = run_async(board.complete_task(&id));
    eyre::ensure!(outcome.is_applied(), "completion of {title:?} was not applied");
    Ok(())
}

#[when(r#"the user restores "{title}""#)]
fn restore_task(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let board = world.board_mut()?;
    let id = task_id(board.model(), &title)?;
    let outcome = run_async(board.restore_task(&id));
    eyre::ensure!(outcome.is_applied(), "restore of {title:?} was not applied");
    Ok(())
}

#[when("the user signs out")]
fn sign_out(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.session.sign_out()).wrap_err("sign out")?;
    Ok(())
}
