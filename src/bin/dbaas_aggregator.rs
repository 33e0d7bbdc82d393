//! Starts the aggregator control plane and runs the startup registration
//! sweep.
//!
//! Usage:
//!
//! ```text
//! dbaas_aggregator [config-path]
//! ```
//!
//! Without a path every setting takes its default. `DBAAS_ADAPTER_ADDRESSES`
//! overrides the configured adapter list.
//!
//! The adapter registry is owned by an external collaborator. This binary
//! starts with an empty in-memory registry, so every configured adapter is
//! asked to re-register; a deployment with a persistent registry injects it
//! in `run` in place of `InMemoryAdapterRegistry`.

use dbaas_aggregator::adapter::{
    adapters::{http::HttpAdapterClientFactory, memory::InMemoryAdapterRegistry},
    services::StartupRegistrationSweep,
};
use dbaas_aggregator::config::AggregatorConfig;
use dbaas_aggregator::telemetry::init_logging;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let path = env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(path.as_deref())?;
    init_logging(&config.logging)?;

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(&config))
}

fn load_config(path: Option<&Path>) -> Result<AggregatorConfig, BoxError> {
    let config = path.map_or_else(|| Ok(AggregatorConfig::default()), AggregatorConfig::load)?;
    Ok(config.with_process_env())
}

async fn run(config: &AggregatorConfig) -> Result<(), BoxError> {
    let credentials = config.adapters.credentials()?;
    // Stand-in for the externally owned registry; starts empty.
    let registry = Arc::new(InMemoryAdapterRegistry::new());
    let factory = Arc::new(HttpAdapterClientFactory::new()?);

    let sweep = StartupRegistrationSweep::new(registry, factory, credentials);
    let report = sweep.run(config.adapters.addresses.as_deref()).await;

    if !report.failed.is_empty() {
        tracing::warn!(
            failed = report.failed.len(),
            "continuing with adapters missing from the registry"
        );
    }
    Ok(())
}
