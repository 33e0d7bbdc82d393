//! Client port for calls from the aggregator into one adapter.

use crate::adapter::domain::{
    AdapterAddress, AdapterApiVersion, ApiVersionTag, CapabilityFlags, Credentials, DatabaseType,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for adapter client operations.
pub type AdapterClientResult<T> = Result<T, AdapterClientError>;

/// Calls the aggregator makes against a single adapter address.
#[async_trait]
pub trait AdapterClient: Send + Sync {
    /// Returns the base address this client is bound to.
    fn address(&self) -> &AdapterAddress;

    /// Fetches the adapter's API contract descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterClientError::NotFound`] when the adapter predates the
    /// descriptor endpoint, or another variant on transport failure.
    async fn api_version(&self) -> AdapterClientResult<AdapterApiVersion>;

    /// Fetches the live capability map for a database type.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterClientError::NotFound`] when the adapter does not
    /// expose the capability endpoint for this version.
    async fn supports(
        &self,
        database_type: &DatabaseType,
        api_version: &ApiVersionTag,
    ) -> AdapterClientResult<CapabilityFlags>;

    /// Asks the adapter to re-register its physical database with the
    /// aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error for any non-2xx response or transport failure.
    async fn force_registration(&self) -> AdapterClientResult<()>;
}

/// Builds adapter clients bound to a base address.
pub trait AdapterClientFactory: Send + Sync {
    /// Creates a client for `address` presenting `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterClientError::Configuration`] when the underlying
    /// transport cannot be built.
    fn new_client(
        &self,
        address: &AdapterAddress,
        credentials: &Credentials,
    ) -> AdapterClientResult<Arc<dyn AdapterClient>>;
}

/// Errors returned by adapter client implementations.
#[derive(Debug, Clone, Error)]
pub enum AdapterClientError {
    /// The adapter answered `404 Not Found`.
    #[error("adapter endpoint not found: {url}")]
    NotFound {
        /// Requested URL.
        url: String,
    },

    /// The adapter answered with an unexpected status code.
    #[error("adapter returned HTTP {status} for {url}")]
    UnexpectedStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The client could not be constructed.
    #[error("adapter client configuration error: {0}")]
    Configuration(String),

    /// The request did not complete.
    #[error("adapter transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body could not be decoded.
    #[error("adapter response decode error: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl AdapterClientError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a response decoding failure.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Returns whether the adapter reported the endpoint as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
