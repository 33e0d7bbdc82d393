//! Given steps for process deduplication BDD scenarios.

use super::world::{ProcessWorld, run_async};
use dbaas_aggregator::process::domain::{ProcessDefinition, ProcessState};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a "{operation}" process was requested for namespace "{namespace}""#)]
fn process_requested(
    world: &mut ProcessWorld,
    operation: String,
    namespace: String,
) -> Result<(), eyre::Report> {
    let definition = ProcessDefinition::new(operation.as_str())
        .wrap_err("build process definition")?
        .with_task("copy-data")
        .with_task("switch-over");
    let instance = run_async(
        world
            .service
            .create_process(&definition, &namespace, &operation),
    )
    .wrap_err("first process request")?;
    world.definition = Some(definition);
    world.namespace = namespace;
    world.latest = Some(instance.clone());
    world.first = Some(instance);
    Ok(())
}

#[given("the tracked process is running")]
fn tracked_process_running(world: &mut ProcessWorld) -> Result<(), eyre::Report> {
    let first = world.first()?.clone();
    run_async(world.service.start_process(&first)).wrap_err("start tracked process")?;
    Ok(())
}

#[given("the tracked process has failed")]
fn tracked_process_failed(world: &mut ProcessWorld) -> Result<(), eyre::Report> {
    let id = world.first()?.id().clone();
    world
        .backend
        .transition(&id, ProcessState::InProgress)
        .wrap_err("start tracked process")?;
    world
        .backend
        .transition(&id, ProcessState::Failed)
        .wrap_err("fail tracked process")?;
    Ok(())
}

#[given("the backend has forgotten the tracked process")]
fn backend_forgot_process(world: &mut ProcessWorld) -> Result<(), eyre::Report> {
    let id = world.first()?.id().clone();
    world.backend.forget(&id).wrap_err("forget tracked process")?;
    Ok(())
}
