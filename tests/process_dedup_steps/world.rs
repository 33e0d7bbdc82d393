//! Shared world state for process deduplication BDD scenarios.

use std::sync::Arc;

use dbaas_aggregator::process::{
    adapters::memory::{InMemoryProcessBackend, InMemoryTrackingStore},
    domain::{BlueGreenStatusView, ProcessDefinition, ProcessInstance},
    services::ProcessOrchestrationService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestOrchestrationService =
    ProcessOrchestrationService<InMemoryProcessBackend, InMemoryTrackingStore, DefaultClock>;

/// Scenario world for process deduplication behaviour tests.
pub struct ProcessWorld {
    /// Workflow engine double.
    pub backend: Arc<InMemoryProcessBackend>,
    /// Tracking store double.
    pub tracks: Arc<InMemoryTrackingStore>,
    /// Orchestration service under test.
    pub service: TestOrchestrationService,
    /// Definition requested in the scenario.
    pub definition: Option<ProcessDefinition>,
    /// Namespace of the first request.
    pub namespace: String,
    /// Instance returned by the first request.
    pub first: Option<ProcessInstance>,
    /// Instance returned by the latest request.
    pub latest: Option<ProcessInstance>,
    /// Last rendered blue-green status.
    pub status: Option<BlueGreenStatusView>,
}

impl ProcessWorld {
    /// Creates a world with empty in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let backend = Arc::new(InMemoryProcessBackend::new());
        let tracks = Arc::new(InMemoryTrackingStore::new());
        let service = ProcessOrchestrationService::new(
            Arc::clone(&backend),
            Arc::clone(&tracks),
            Arc::new(DefaultClock),
        );
        Self {
            backend,
            tracks,
            service,
            definition: None,
            namespace: String::new(),
            first: None,
            latest: None,
            status: None,
        }
    }

    /// Returns the definition requested in this scenario.
    pub fn definition(&self) -> Result<&ProcessDefinition, eyre::Report> {
        self.definition
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no process was requested in this scenario"))
    }

    /// Returns the instance returned by the first request.
    pub fn first(&self) -> Result<&ProcessInstance, eyre::Report> {
        self.first
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no first instance in scenario world"))
    }

    /// Returns the instance returned by the latest request.
    pub fn latest(&self) -> Result<&ProcessInstance, eyre::Report> {
        self.latest
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no latest instance in scenario world"))
    }
}

impl Default for ProcessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProcessWorld {
    ProcessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
