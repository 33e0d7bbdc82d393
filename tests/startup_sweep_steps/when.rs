//! When steps for startup sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the sweep runs over "{addresses}""#)]
fn sweep_runs_over(world: &mut SweepWorld, addresses: String) {
    world.report = Some(run_async(world.sweep.run(Some(&addresses))));
}

#[when("the sweep runs with no configured addresses")]
fn sweep_runs_unconfigured(world: &mut SweepWorld) {
    world.report = Some(run_async(world.sweep.run(None)));
}
