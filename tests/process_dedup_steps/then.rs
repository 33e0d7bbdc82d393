//! Then steps for process deduplication BDD scenarios.

use super::world::ProcessWorld;
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then("the same process instance is returned")]
fn same_instance_returned(world: &ProcessWorld) -> Result<(), eyre::Report> {
    let first = world.first()?;
    let latest = world.latest()?;
    if first.id() != latest.id() {
        return Err(eyre::eyre!(
            "expected to join {}, got {}",
            first.id(),
            latest.id()
        ));
    }
    Ok(())
}

#[then("a new process instance is returned")]
fn new_instance_returned(world: &ProcessWorld) -> Result<(), eyre::Report> {
    let first = world.first()?;
    let latest = world.latest()?;
    if first.id() == latest.id() {
        return Err(eyre::eyre!("expected a new instance, got {}", latest.id()));
    }
    Ok(())
}

#[then("the backend created {count:usize} processes")]
fn backend_created(world: &ProcessWorld, count: usize) -> Result<(), eyre::Report> {
    let created = world.backend.created_count().wrap_err("read created count")?;
    if created != count {
        return Err(eyre::eyre!("expected {count} created processes, got {created}"));
    }
    Ok(())
}

#[then(r#"the track for namespace "{namespace}" points at the latest instance"#)]
fn track_points_at_latest(world: &ProcessWorld, namespace: String) -> Result<(), eyre::Report> {
    let latest = world.latest()?;
    let tracks = world.tracks.committed().wrap_err("read tracks")?;
    let track = tracks
        .iter()
        .find(|track| track.key().namespace().as_str() == namespace)
        .ok_or_else(|| eyre::eyre!("no track for namespace '{namespace}'"))?;
    if track.process_id() != latest.id() {
        return Err(eyre::eyre!(
            "track points at {}, expected {}",
            track.process_id(),
            latest.id()
        ));
    }
    Ok(())
}

#[then("{count:usize} tracks are stored")]
fn tracks_stored(world: &ProcessWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.tracks.committed().wrap_err("read tracks")?.len();
    if stored != count {
        return Err(eyre::eyre!("expected {count} tracks, found {stored}"));
    }
    Ok(())
}

#[then(r#"the process status is "{status}""#)]
fn process_status_is(world: &ProcessWorld, status: String) -> Result<(), eyre::Report> {
    let view = world
        .status
        .as_ref()
        .ok_or_else(|| eyre::eyre!("status was not requested"))?;
    if view.status != Some(status.as_str()) {
        return Err(eyre::eyre!("expected status {status}, got {:?}", view.status));
    }
    Ok(())
}

#[then(r#"task "{task}" has status "{status}""#)]
fn task_status_is(world: &ProcessWorld, task: String, status: String) -> Result<(), eyre::Report> {
    let view = world
        .status
        .as_ref()
        .ok_or_else(|| eyre::eyre!("status was not requested"))?;
    let entry = view
        .tasks
        .iter()
        .find(|entry| entry.name == task)
        .ok_or_else(|| eyre::eyre!("no task named '{task}'"))?;
    if entry.status != Some(status.as_str()) {
        return Err(eyre::eyre!(
            "expected task {task} to be {status}, got {:?}",
            entry.status
        ));
    }
    Ok(())
}
