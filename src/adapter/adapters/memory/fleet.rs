//! Scripted in-memory adapter fleet.
//!
//! Stands in for remote adapters without opening sockets: each address is
//! scripted with the identity, API versions and capabilities it serves, and
//! every client creation, forced registration and handshake is recorded for
//! assertions.

use crate::adapter::{
    adapters::http::paths::{api_version_url, supports_url},
    domain::{
        AdapterAddress, AdapterApiVersion, ApiVersionTag, CapabilityFlags, Credentials,
        DatabaseType, HandshakeOutcome, HandshakeRequest, PhysicalDatabaseId,
    },
    ports::{
        AdapterClient, AdapterClientError, AdapterClientFactory, AdapterClientResult,
        PhysicalDatabaseHandshake,
    },
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Behaviour of one scripted adapter.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAdapter {
    physical_database_id: Option<PhysicalDatabaseId>,
    served_versions: Vec<ApiVersionTag>,
    api_version: Option<AdapterApiVersion>,
    capabilities: Option<CapabilityFlags>,
    registration_failure: Option<String>,
}

impl ScriptedAdapter {
    /// Creates an adapter that serves nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `id` on the registration endpoint of each listed version.
    #[must_use]
    pub fn serving(
        mut self,
        id: PhysicalDatabaseId,
        versions: impl IntoIterator<Item = ApiVersionTag>,
    ) -> Self {
        self.physical_database_id = Some(id);
        self.served_versions = versions.into_iter().collect();
        self
    }

    /// Exposes an API contract descriptor.
    #[must_use]
    pub fn with_api_version(mut self, api_version: AdapterApiVersion) -> Self {
        self.api_version = Some(api_version);
        self
    }

    /// Exposes a capability map.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: CapabilityFlags) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Makes forced registration fail with `reason`.
    #[must_use]
    pub fn failing_registration(mut self, reason: impl Into<String>) -> Self {
        self.registration_failure = Some(reason.into());
        self
    }
}

#[derive(Debug, Default)]
struct FleetState {
    adapters: HashMap<AdapterAddress, ScriptedAdapter>,
    clients_created: Vec<AdapterAddress>,
    forced_registrations: Vec<AdapterAddress>,
    handshakes: Vec<(AdapterAddress, ApiVersionTag)>,
}

/// In-memory fleet acting as client factory and handshake peer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdapterFleet {
    state: Arc<RwLock<FleetState>>,
}

impl InMemoryAdapterFleet {
    /// Creates an empty fleet; every address is unreachable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the adapter at `address`, replacing any earlier script.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn add_adapter(
        &self,
        address: AdapterAddress,
        adapter: ScriptedAdapter,
    ) -> AdapterClientResult<()> {
        let mut state = self.write()?;
        state.adapters.insert(address, adapter);
        Ok(())
    }

    /// Returns the addresses clients were created for, in order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn clients_created(&self) -> AdapterClientResult<Vec<AdapterAddress>> {
        Ok(self.read()?.clients_created.clone())
    }

    /// Returns the addresses that accepted a forced registration, in order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn forced_registrations(&self) -> AdapterClientResult<Vec<AdapterAddress>> {
        Ok(self.read()?.forced_registrations.clone())
    }

    /// Returns every handshake attempt as `(address, version)`, in order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn handshakes(&self) -> AdapterClientResult<Vec<(AdapterAddress, ApiVersionTag)>> {
        Ok(self.read()?.handshakes.clone())
    }

    fn read(&self) -> AdapterClientResult<std::sync::RwLockReadGuard<'_, FleetState>> {
        self.state
            .read()
            .map_err(|err| AdapterClientError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> AdapterClientResult<std::sync::RwLockWriteGuard<'_, FleetState>> {
        self.state
            .write()
            .map_err(|err| AdapterClientError::transport(std::io::Error::other(err.to_string())))
    }

    fn scripted(&self, address: &AdapterAddress) -> AdapterClientResult<ScriptedAdapter> {
        self.read()?.adapters.get(address).cloned().ok_or_else(|| {
            AdapterClientError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("no adapter listening at {address}"),
            ))
        })
    }
}

impl AdapterClientFactory for InMemoryAdapterFleet {
    fn new_client(
        &self,
        address: &AdapterAddress,
        _credentials: &Credentials,
    ) -> AdapterClientResult<Arc<dyn AdapterClient>> {
        self.write()?.clients_created.push(address.clone());
        Ok(Arc::new(InMemoryAdapterClient {
            address: address.clone(),
            fleet: self.clone(),
        }))
    }
}

#[async_trait]
impl PhysicalDatabaseHandshake for InMemoryAdapterFleet {
    async fn handshake(&self, request: &HandshakeRequest) -> HandshakeOutcome {
        if let Ok(mut state) = self.write() {
            state
                .handshakes
                .push((request.address().clone(), request.api_version().clone()));
        }

        let adapter = match self.scripted(request.address()) {
            Ok(adapter) => adapter,
            Err(err) => return HandshakeOutcome::unavailable(err.to_string()),
        };

        let Some(reported) = adapter.physical_database_id else {
            return HandshakeOutcome::unavailable("adapter answered HTTP 503");
        };
        if !adapter.served_versions.contains(request.api_version()) {
            return HandshakeOutcome::unavailable("adapter answered HTTP 404");
        }
        if &reported == request.expected_id() {
            HandshakeOutcome::Confirmed
        } else {
            HandshakeOutcome::Conflict {
                expected: request.expected_id().clone(),
                reported,
            }
        }
    }
}

/// Client handed out by [`InMemoryAdapterFleet`].
#[derive(Debug, Clone)]
pub struct InMemoryAdapterClient {
    address: AdapterAddress,
    fleet: InMemoryAdapterFleet,
}

#[async_trait]
impl AdapterClient for InMemoryAdapterClient {
    fn address(&self) -> &AdapterAddress {
        &self.address
    }

    async fn api_version(&self) -> AdapterClientResult<AdapterApiVersion> {
        self.fleet
            .scripted(&self.address)?
            .api_version
            .ok_or_else(|| AdapterClientError::NotFound {
                url: api_version_url(&self.address),
            })
    }

    async fn supports(
        &self,
        database_type: &DatabaseType,
        api_version: &ApiVersionTag,
    ) -> AdapterClientResult<CapabilityFlags> {
        self.fleet
            .scripted(&self.address)?
            .capabilities
            .ok_or_else(|| AdapterClientError::NotFound {
                url: supports_url(&self.address, database_type, api_version),
            })
    }

    async fn force_registration(&self) -> AdapterClientResult<()> {
        let adapter = self.fleet.scripted(&self.address)?;
        if let Some(reason) = adapter.registration_failure {
            return Err(AdapterClientError::transport(std::io::Error::other(reason)));
        }
        self.fleet
            .write()?
            .forced_registrations
            .push(self.address.clone());
        Ok(())
    }
}
