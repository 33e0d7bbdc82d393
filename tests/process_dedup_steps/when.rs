//! When steps for process deduplication BDD scenarios.

use super::world::{ProcessWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the same process is requested again")]
fn same_process_requested(world: &mut ProcessWorld) -> Result<(), eyre::Report> {
    let definition = world.definition()?.clone();
    let instance = run_async(world.service.create_process(
        &definition,
        &world.namespace,
        definition.name(),
    ))
    .wrap_err("repeated process request")?;
    world.latest = Some(instance);
    Ok(())
}

#[when(r#"the process is requested for namespace "{namespace}""#)]
fn process_requested_elsewhere(
    world: &mut ProcessWorld,
    namespace: String,
) -> Result<(), eyre::Report> {
    let definition = world.definition()?.clone();
    let instance = run_async(
        world
            .service
            .create_process(&definition, &namespace, definition.name()),
    )
    .wrap_err("process request for another namespace")?;
    world.latest = Some(instance);
    Ok(())
}

#[when("the blue-green status is requested")]
fn blue_green_status_requested(world: &mut ProcessWorld) -> Result<(), eyre::Report> {
    let id = world.first()?.id().clone();
    let view = run_async(world.service.blue_green_status(&id)).wrap_err("render status")?;
    world.status = Some(view);
    Ok(())
}
