//! Registry port for adapters known to the aggregator.

use crate::adapter::domain::{AdapterAddress, PhysicalDatabaseId, RegisteredAdapter};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for adapter registry operations.
pub type AdapterRegistryResult<T> = Result<T, AdapterRegistryError>;

/// Persistence contract for registered adapters.
#[async_trait]
pub trait AdapterRegistry: Send + Sync {
    /// Finds the adapter registered at exactly `address`.
    async fn find_by_address(
        &self,
        address: &AdapterAddress,
    ) -> AdapterRegistryResult<Option<RegisteredAdapter>>;

    /// Finds the adapter serving `id`.
    async fn find_by_id(
        &self,
        id: &PhysicalDatabaseId,
    ) -> AdapterRegistryResult<Option<RegisteredAdapter>>;

    /// Stores or replaces the entry for the adapter's physical database.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::AddressInUse`] when another physical
    /// database is already registered at the same address.
    async fn save(&self, adapter: &RegisteredAdapter) -> AdapterRegistryResult<()>;

    /// Returns every registered adapter.
    async fn list_all(&self) -> AdapterRegistryResult<Vec<RegisteredAdapter>>;
}

/// Errors returned by adapter registry implementations.
#[derive(Debug, Clone, Error)]
pub enum AdapterRegistryError {
    /// The address already belongs to a different physical database.
    #[error("adapter address {address} is already registered for physical database {owner}")]
    AddressInUse {
        /// Contested address.
        address: AdapterAddress,
        /// Physical database currently registered there.
        owner: PhysicalDatabaseId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AdapterRegistryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
