//! Given steps for startup sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use dbaas_aggregator::adapter::{
    adapters::memory::ScriptedAdapter,
    domain::{AdapterAddress, ApiVersionTag, DatabaseType, PhysicalDatabaseId, RegisteredAdapter},
    ports::AdapterRegistry,
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"an adapter at "{address}" that accepts registration"#)]
fn accepting_adapter(world: &mut SweepWorld, address: String) -> Result<(), eyre::Report> {
    let parsed = AdapterAddress::new(address).wrap_err("parse adapter address")?;
    world
        .fleet
        .add_adapter(parsed, ScriptedAdapter::new())
        .wrap_err("script accepting adapter")?;
    Ok(())
}

#[given(r#"an adapter at "{address}" that rejects registration"#)]
fn rejecting_adapter(world: &mut SweepWorld, address: String) -> Result<(), eyre::Report> {
    let parsed = AdapterAddress::new(address).wrap_err("parse adapter address")?;
    world
        .fleet
        .add_adapter(
            parsed,
            ScriptedAdapter::new().failing_registration("adapter is restarting"),
        )
        .wrap_err("script rejecting adapter")?;
    Ok(())
}

#[given(r#"the adapter "{address}" is already registered as "{id}""#)]
fn already_registered(
    world: &mut SweepWorld,
    address: String,
    id: String,
) -> Result<(), eyre::Report> {
    let adapter = RegisteredAdapter::new(
        PhysicalDatabaseId::new(id).wrap_err("parse physical database id")?,
        AdapterAddress::new(address).wrap_err("parse adapter address")?,
        DatabaseType::new("postgresql").wrap_err("parse database type")?,
        ApiVersionTag::v2(),
        &DefaultClock,
    );
    run_async(world.registry.save(&adapter)).wrap_err("seed registry")?;
    Ok(())
}
