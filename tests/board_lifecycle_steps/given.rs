//! Given steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a signed-in user with an empty board")]
fn signed_in_user(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let user = run_async(
        world
            .session
            .sign_up("scenario@example.com", "secret1", "secret1"),
    )
    .wrap_err("sign up scenario user")?;
    world.user = Some(user);
    Ok(())
}

#[given("the remote store is offline")]
fn store_offline(world: &mut BoardWorld) {
    world.store.set_offline(true);
}
