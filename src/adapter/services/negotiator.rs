//! Per-adapter capability and contract negotiation.
//!
//! Provides [`CapabilityNegotiator`], consulted per request to decide which
//! operations a connected adapter version supports. Capability answers are
//! never cached so an upgraded adapter is seen immediately.

use crate::adapter::{
    domain::{
        AdapterApiVersion, ApiVersionTag, Capability, DEFAULT_CONTRACT_PATH, DatabaseType,
    },
    ports::{AdapterClient, AdapterClientError, AdapterClientResult},
};
use std::sync::Arc;

/// Answers capability and contract questions for one adapter.
#[derive(Clone)]
pub struct CapabilityNegotiator {
    client: Arc<dyn AdapterClient>,
    database_type: DatabaseType,
    version_tag: ApiVersionTag,
    api_version: AdapterApiVersion,
    contract_path: String,
}

impl CapabilityNegotiator {
    /// Creates a negotiator around an already known API descriptor.
    ///
    /// The contract path defaults to [`DEFAULT_CONTRACT_PATH`].
    #[must_use]
    pub fn new(
        client: Arc<dyn AdapterClient>,
        database_type: DatabaseType,
        version_tag: ApiVersionTag,
        api_version: AdapterApiVersion,
    ) -> Self {
        Self {
            client,
            database_type,
            version_tag,
            api_version,
            contract_path: DEFAULT_CONTRACT_PATH.to_owned(),
        }
    }

    /// Fetches the adapter's API descriptor once and binds it.
    ///
    /// Adapters that answer `404` on the descriptor endpoint predate it and
    /// are bound to [`AdapterApiVersion::legacy`].
    ///
    /// # Errors
    ///
    /// Returns [`AdapterClientError`] for any failure other than not-found.
    pub async fn connect(
        client: Arc<dyn AdapterClient>,
        database_type: DatabaseType,
        version_tag: ApiVersionTag,
    ) -> AdapterClientResult<Self> {
        let api_version = match client.api_version().await {
            Ok(api_version) => api_version,
            Err(AdapterClientError::NotFound { .. }) => {
                tracing::debug!(
                    address = %client.address(),
                    "adapter has no api-version endpoint, assuming legacy contract"
                );
                AdapterApiVersion::legacy()
            }
            Err(err) => return Err(err),
        };
        Ok(Self::new(client, database_type, version_tag, api_version))
    }

    /// Overrides the spec path consulted by [`Self::contract`].
    #[must_use]
    pub fn with_contract_path(mut self, path: impl Into<String>) -> Self {
        self.contract_path = path.into();
        self
    }

    /// Returns the bound API descriptor.
    #[must_use]
    pub const fn api_version(&self) -> &AdapterApiVersion {
        &self.api_version
    }

    /// Asks the adapter whether it supports `capability`.
    ///
    /// A key missing from the response falls back to
    /// [`Capability::default_when_absent`]. An adapter without the
    /// capability endpoint supports nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterClientError`] for transport failures other than
    /// not-found.
    pub async fn supports(&self, capability: Capability) -> AdapterClientResult<bool> {
        match self
            .client
            .supports(&self.database_type, &self.version_tag)
            .await
        {
            Ok(flags) => Ok(flags.supports(capability)),
            Err(AdapterClientError::NotFound { url }) => {
                tracing::debug!(%url, %capability, "capability endpoint missing, treating as unsupported");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Returns whether the adapter's contract can serve a caller requesting
    /// `requested_major.requested_minor`.
    ///
    /// Without a spec entry for the contract path the answer is `false`.
    #[must_use]
    pub fn contract(&self, requested_major: u32, requested_minor: u32) -> bool {
        self.api_version
            .spec_for(&self.contract_path)
            .is_some_and(|spec| spec.is_compatible(requested_major, requested_minor))
    }
}
