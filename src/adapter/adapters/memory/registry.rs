//! In-memory adapter registry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::adapter::{
    domain::{AdapterAddress, PhysicalDatabaseId, RegisteredAdapter},
    ports::{AdapterRegistry, AdapterRegistryError, AdapterRegistryResult},
};

/// Thread-safe in-memory adapter registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdapterRegistry {
    state: Arc<RwLock<InMemoryRegistryState>>,
}

#[derive(Debug, Default)]
struct InMemoryRegistryState {
    adapters: HashMap<PhysicalDatabaseId, RegisteredAdapter>,
    address_index: HashMap<AdapterAddress, PhysicalDatabaseId>,
}

impl InMemoryAdapterRegistry {
    /// Creates an empty in-memory registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdapterRegistry for InMemoryAdapterRegistry {
    async fn find_by_address(
        &self,
        address: &AdapterAddress,
    ) -> AdapterRegistryResult<Option<RegisteredAdapter>> {
        let state = self.state.read().map_err(|err| {
            AdapterRegistryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .address_index
            .get(address)
            .and_then(|id| state.adapters.get(id))
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: &PhysicalDatabaseId,
    ) -> AdapterRegistryResult<Option<RegisteredAdapter>> {
        let state = self.state.read().map_err(|err| {
            AdapterRegistryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.adapters.get(id).cloned())
    }

    async fn save(&self, adapter: &RegisteredAdapter) -> AdapterRegistryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AdapterRegistryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let id = adapter.physical_database_id();
        if let Some(owner) = state.address_index.get(adapter.address())
            && owner != id
        {
            return Err(AdapterRegistryError::AddressInUse {
                address: adapter.address().clone(),
                owner: owner.clone(),
            });
        }

        if let Some(previous) = state.adapters.get(id).map(|old| old.address().clone()) {
            state.address_index.remove(&previous);
        }
        state
            .address_index
            .insert(adapter.address().clone(), id.clone());
        state.adapters.insert(id.clone(), adapter.clone());
        Ok(())
    }

    async fn list_all(&self) -> AdapterRegistryResult<Vec<RegisteredAdapter>> {
        let state = self.state.read().map_err(|err| {
            AdapterRegistryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.adapters.values().cloned().collect())
    }
}
