//! Then steps for startup sweep BDD scenarios.

use super::world::SweepWorld;
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then("{count:usize} adapters accepted a forced registration")]
fn adapters_accepted(world: &SweepWorld, count: usize) -> Result<(), eyre::Report> {
    let forced = world
        .fleet
        .forced_registrations()
        .wrap_err("read forced registrations")?;
    let report = world.report()?;
    if forced.len() != count || report.registered.len() != count {
        return Err(eyre::eyre!(
            "expected {count} forced registrations, fleet saw {} and report lists {}",
            forced.len(),
            report.registered.len()
        ));
    }
    Ok(())
}

#[then("no adapter failed")]
fn no_adapter_failed(world: &SweepWorld) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if !report.failed.is_empty() {
        return Err(eyre::eyre!("unexpected failures: {:?}", report.failed));
    }
    Ok(())
}

#[then(r#"the adapter "{address}" is reported as failed"#)]
fn adapter_failed(world: &SweepWorld, address: String) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if !report.failed.iter().any(|failure| failure.address == address) {
        return Err(eyre::eyre!(
            "expected '{address}' among failures, got {:?}",
            report.failed
        ));
    }
    Ok(())
}

#[then(r#"the adapter "{address}" was skipped"#)]
fn adapter_skipped(world: &SweepWorld, address: String) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if !report.skipped.iter().any(|skipped| skipped.as_str() == address) {
        return Err(eyre::eyre!(
            "expected '{address}' to be skipped, got {:?}",
            report.skipped
        ));
    }
    Ok(())
}

#[then("no adapter client was created")]
fn no_client_created(world: &SweepWorld) -> Result<(), eyre::Report> {
    let created = world
        .fleet
        .clients_created()
        .wrap_err("read created clients")?;
    if !created.is_empty() {
        return Err(eyre::eyre!("expected no clients, got {created:?}"));
    }
    Ok(())
}
