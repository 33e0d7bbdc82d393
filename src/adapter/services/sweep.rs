//! One-shot startup registration sweep over configured adapters.
//!
//! Provides [`StartupRegistrationSweep`], which asks every configured adapter
//! that the aggregator does not yet know to re-register itself. Each address
//! is handled independently: a failing adapter is logged and counted, never
//! propagated.

use crate::adapter::{
    domain::{AdapterAddress, AdapterDomainError, Credentials, split_address_list},
    ports::{AdapterClientError, AdapterClientFactory, AdapterRegistry, AdapterRegistryError},
};
use std::{collections::HashSet, sync::Arc};
use thiserror::Error;

/// Why one address could not be registered during a sweep.
#[derive(Debug, Clone, Error)]
pub enum SweepError {
    /// The configured token is not a valid adapter address.
    #[error(transparent)]
    InvalidAddress(#[from] AdapterDomainError),
    /// The registry lookup failed.
    #[error(transparent)]
    Registry(#[from] AdapterRegistryError),
    /// The client could not be built or the adapter rejected the request.
    #[error(transparent)]
    Client(#[from] AdapterClientError),
}

/// One address the sweep failed to register.
#[derive(Debug, Clone)]
pub struct SweepFailure {
    /// Configured token, as written.
    pub address: String,
    /// Failure cause.
    pub error: SweepError,
}

/// Per-address outcome of a completed sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Addresses that accepted a forced registration.
    pub registered: Vec<AdapterAddress>,
    /// Addresses skipped because the registry already knows them.
    pub skipped: Vec<AdapterAddress>,
    /// Addresses whose registration failed.
    pub failed: Vec<SweepFailure>,
}

impl SweepReport {
    /// Returns how many forced registrations were attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.registered.len() + self.failed.len()
    }
}

enum SweepStep {
    Registered(AdapterAddress),
    Skipped(AdapterAddress),
}

/// Startup sweep forcing re-registration of configured adapters.
#[derive(Clone)]
pub struct StartupRegistrationSweep<R, F>
where
    R: AdapterRegistry,
    F: AdapterClientFactory,
{
    registry: Arc<R>,
    factory: Arc<F>,
    credentials: Credentials,
}

impl<R, F> StartupRegistrationSweep<R, F>
where
    R: AdapterRegistry,
    F: AdapterClientFactory,
{
    /// Creates a sweep presenting `credentials` to every adapter.
    #[must_use]
    pub const fn new(registry: Arc<R>, factory: Arc<F>, credentials: Credentials) -> Self {
        Self {
            registry,
            factory,
            credentials,
        }
    }

    /// Runs the sweep over a comma-separated address list.
    ///
    /// A missing or blank list does nothing. Tokens naming the same adapter
    /// after normalisation are visited once. Failures are recorded in the
    /// returned report and logged; they never abort the sweep.
    pub async fn run(&self, addresses: Option<&str>) -> SweepReport {
        let mut report = SweepReport::default();
        let mut visited = HashSet::new();
        for token in split_address_list(addresses) {
            let outcome = match AdapterAddress::new(token.as_str()) {
                Ok(address) if !visited.insert(address.clone()) => {
                    tracing::debug!(%address, "adapter address repeated, skipping");
                    continue;
                }
                Ok(address) => self.register_one(address).await,
                Err(error) => Err(SweepError::from(error)),
            };
            match outcome {
                Ok(SweepStep::Registered(address)) => {
                    tracing::info!(%address, "forced adapter registration");
                    report.registered.push(address);
                }
                Ok(SweepStep::Skipped(address)) => {
                    tracing::debug!(%address, "adapter already registered, skipping");
                    report.skipped.push(address);
                }
                Err(error) => {
                    tracing::warn!(address = %token, %error, "adapter registration failed during startup sweep");
                    report.failed.push(SweepFailure {
                        address: token,
                        error,
                    });
                }
            }
        }
        tracing::info!(
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "startup registration sweep finished"
        );
        report
    }

    async fn register_one(&self, address: AdapterAddress) -> Result<SweepStep, SweepError> {
        if self.registry.find_by_address(&address).await?.is_some() {
            return Ok(SweepStep::Skipped(address));
        }
        let client = self.factory.new_client(&address, &self.credentials)?;
        client.force_registration().await?;
        Ok(SweepStep::Registered(address))
    }
}
