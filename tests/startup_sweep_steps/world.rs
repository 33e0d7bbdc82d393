//! Shared world state for startup sweep BDD scenarios.

use std::sync::Arc;

use dbaas_aggregator::adapter::{
    adapters::memory::{InMemoryAdapterFleet, InMemoryAdapterRegistry},
    domain::Credentials,
    services::{StartupRegistrationSweep, SweepReport},
};
use rstest::fixture;
use secrecy::SecretString;

/// Sweep type used by the BDD world.
pub type TestSweep = StartupRegistrationSweep<InMemoryAdapterRegistry, InMemoryAdapterFleet>;

/// Scenario world for startup sweep behaviour tests.
pub struct SweepWorld {
    /// Registry of already known adapters.
    pub registry: Arc<InMemoryAdapterRegistry>,
    /// Scripted adapter fleet acting as client factory.
    pub fleet: Arc<InMemoryAdapterFleet>,
    /// Sweep under test.
    pub sweep: TestSweep,
    /// Report of the last sweep run.
    pub report: Option<SweepReport>,
}

impl SweepWorld {
    /// Creates a world with an empty registry and fleet.
    ///
    /// # Panics
    ///
    /// Panics when the fixed scenario credentials are rejected.
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(InMemoryAdapterRegistry::new());
        let fleet = Arc::new(InMemoryAdapterFleet::new());
        let credentials = Credentials::new("aggregator", SecretString::from("secret".to_owned()))
            .expect("scenario credentials are valid");
        let sweep =
            StartupRegistrationSweep::new(Arc::clone(&registry), Arc::clone(&fleet), credentials);
        Self {
            registry,
            fleet,
            sweep,
            report: None,
        }
    }

    /// Returns the report of the last sweep run.
    pub fn report(&self) -> Result<&SweepReport, eyre::Report> {
        self.report
            .as_ref()
            .ok_or_else(|| eyre::eyre!("the sweep has not run in this scenario"))
    }
}

impl Default for SweepWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SweepWorld {
    SweepWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
