//! Explicit physical database registration with API version probing.

use crate::adapter::{
    domain::{
        AdapterAddress, AdapterDomainError, ApiVersionTag, Credentials, DatabaseType,
        HandshakeError, HandshakeOutcome, HandshakeRequest, PhysicalDatabaseId, RegisteredAdapter,
    },
    ports::{AdapterRegistry, AdapterRegistryError, PhysicalDatabaseHandshake},
};
use mockable::Clock;
use secrecy::SecretString;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a physical database adapter.
#[derive(Debug)]
pub struct RegisterPhysicalDatabaseRequest {
    physical_database_id: String,
    address: String,
    database_type: String,
    username: String,
    password: SecretString,
    api_versions: Vec<String>,
}

impl RegisterPhysicalDatabaseRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        physical_database_id: impl Into<String>,
        address: impl Into<String>,
        database_type: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            physical_database_id: physical_database_id.into(),
            address: address.into(),
            database_type: database_type.into(),
            username: username.into(),
            password,
            api_versions: Vec::new(),
        }
    }

    /// Sets the API versions to probe, most preferred first.
    #[must_use]
    pub fn with_api_versions(mut self, versions: impl IntoIterator<Item = String>) -> Self {
        self.api_versions = versions.into_iter().collect();
        self
    }
}

/// Service-level errors for physical database registration.
#[derive(Debug, Error)]
pub enum PhysicalDatabaseRegistrationError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] AdapterDomainError),
    /// The handshake failed.
    #[error(transparent)]
    Handshake(#[from] HandshakeError),
    /// The registry rejected the entry.
    #[error(transparent)]
    Registry(#[from] AdapterRegistryError),
}

/// Result type for physical database registration.
pub type PhysicalDatabaseRegistrationResult<T> = Result<T, PhysicalDatabaseRegistrationError>;

/// Admin-triggered adapter registration.
///
/// Handshake failures are returned to the caller rather than absorbed.
#[derive(Clone)]
pub struct PhysicalDatabaseRegistrationService<H, R, C>
where
    H: PhysicalDatabaseHandshake,
    R: AdapterRegistry,
    C: Clock + Send + Sync,
{
    handshake: Arc<H>,
    registry: Arc<R>,
    clock: Arc<C>,
    default_api_versions: Vec<ApiVersionTag>,
}

impl<H, R, C> PhysicalDatabaseRegistrationService<H, R, C>
where
    H: PhysicalDatabaseHandshake,
    R: AdapterRegistry,
    C: Clock + Send + Sync,
{
    /// Creates a service probing `v2` then `v1` by default.
    #[must_use]
    pub fn new(handshake: Arc<H>, registry: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            handshake,
            registry,
            clock,
            default_api_versions: vec![ApiVersionTag::v2(), ApiVersionTag::v1()],
        }
    }

    /// Replaces the versions probed when a request names none.
    ///
    /// An empty list keeps the current defaults.
    #[must_use]
    pub fn with_default_api_versions(
        mut self,
        versions: impl IntoIterator<Item = ApiVersionTag>,
    ) -> Self {
        let probed: Vec<ApiVersionTag> = versions.into_iter().collect();
        if !probed.is_empty() {
            self.default_api_versions = probed;
        }
        self
    }

    /// Handshakes with the adapter and records it in the registry.
    ///
    /// Versions are probed in order. An unavailable version moves on to the
    /// next one; an identity conflict stops immediately. Nothing is written
    /// to the registry unless a handshake is confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicalDatabaseRegistrationError::Handshake`] with
    /// [`HandshakeError::RegistrationConflict`] on identity mismatch or
    /// [`HandshakeError::AdapterUnavailable`] when no version answered,
    /// [`PhysicalDatabaseRegistrationError::Domain`] for invalid input, and
    /// [`PhysicalDatabaseRegistrationError::Registry`] when persistence fails.
    pub async fn register(
        &self,
        request: RegisterPhysicalDatabaseRequest,
    ) -> PhysicalDatabaseRegistrationResult<RegisteredAdapter> {
        let RegisterPhysicalDatabaseRequest {
            physical_database_id: raw_id,
            address: raw_address,
            database_type: raw_database_type,
            username,
            password,
            api_versions,
        } = request;

        let expected_id = PhysicalDatabaseId::new(raw_id)?;
        let address = AdapterAddress::new(raw_address)?;
        let database_type = DatabaseType::new(raw_database_type)?;
        let credentials = Credentials::new(username, password)?;
        let versions = if api_versions.is_empty() {
            self.default_api_versions.clone()
        } else {
            api_versions
                .into_iter()
                .map(ApiVersionTag::new)
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut last_reason = String::from("no API version was probed");
        for version in versions {
            let handshake_request = HandshakeRequest::new(
                expected_id.clone(),
                address.clone(),
                database_type.clone(),
                credentials.clone(),
                version.clone(),
            );
            match self.handshake.handshake(&handshake_request).await {
                HandshakeOutcome::Confirmed => {
                    let adapter = RegisteredAdapter::new(
                        expected_id,
                        address,
                        database_type,
                        version,
                        &*self.clock,
                    );
                    self.registry.save(&adapter).await?;
                    tracing::info!(
                        physical_database_id = %adapter.physical_database_id(),
                        address = %adapter.address(),
                        api_version = %adapter.api_version(),
                        "registered physical database adapter"
                    );
                    return Ok(adapter);
                }
                HandshakeOutcome::Unavailable { reason } => {
                    tracing::debug!(%address, api_version = %version, %reason, "handshake unavailable, trying next version");
                    last_reason = reason;
                }
                conflict @ HandshakeOutcome::Conflict { .. } => {
                    tracing::warn!(%address, api_version = %version, ?conflict, "adapter reported a different physical database");
                    conflict.into_result()?;
                }
            }
        }

        Err(HandshakeError::AdapterUnavailable {
            reason: last_reason,
        }
        .into())
    }
}
