//! Registration handshake request and tagged outcome.

use super::{AdapterAddress, ApiVersionTag, Credentials, DatabaseType, PhysicalDatabaseId};
use thiserror::Error;

/// Parameters of one registration handshake with an adapter.
#[derive(Debug, Clone)]
pub struct HandshakeRequest {
    expected_id: PhysicalDatabaseId,
    address: AdapterAddress,
    database_type: DatabaseType,
    credentials: Credentials,
    api_version: ApiVersionTag,
}

impl HandshakeRequest {
    /// Creates a handshake request.
    #[must_use]
    pub const fn new(
        expected_id: PhysicalDatabaseId,
        address: AdapterAddress,
        database_type: DatabaseType,
        credentials: Credentials,
        api_version: ApiVersionTag,
    ) -> Self {
        Self {
            expected_id,
            address,
            database_type,
            credentials,
            api_version,
        }
    }

    /// Returns a copy of this request targeting another API version.
    #[must_use]
    pub fn with_api_version(&self, api_version: ApiVersionTag) -> Self {
        Self {
            api_version,
            ..self.clone()
        }
    }

    /// Returns the physical database the caller expects the adapter to serve.
    #[must_use]
    pub const fn expected_id(&self) -> &PhysicalDatabaseId {
        &self.expected_id
    }

    /// Returns the adapter base address.
    #[must_use]
    pub const fn address(&self) -> &AdapterAddress {
        &self.address
    }

    /// Returns the database type path segment.
    #[must_use]
    pub const fn database_type(&self) -> &DatabaseType {
        &self.database_type
    }

    /// Returns the credentials presented to the adapter.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the API version tag used in the request path.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersionTag {
        &self.api_version
    }
}

/// Result of a single handshake attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// The adapter confirmed it serves the expected physical database.
    Confirmed,
    /// The adapter could not be reached or rejected the request.
    Unavailable {
        /// Human-readable cause.
        reason: String,
    },
    /// The adapter identifies itself as a different physical database.
    Conflict {
        /// Identifier the caller expected.
        expected: PhysicalDatabaseId,
        /// Identifier the adapter reported.
        reported: PhysicalDatabaseId,
    },
}

impl HandshakeOutcome {
    /// Creates an `Unavailable` outcome.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Converts the outcome into a `Result` for `?` propagation.
    ///
    /// # Errors
    ///
    /// Returns [`HandshakeError::AdapterUnavailable`] or
    /// [`HandshakeError::RegistrationConflict`] for the failing outcomes.
    pub fn into_result(self) -> Result<(), HandshakeError> {
        match self {
            Self::Confirmed => Ok(()),
            Self::Unavailable { reason } => Err(HandshakeError::AdapterUnavailable { reason }),
            Self::Conflict { expected, reported } => {
                Err(HandshakeError::RegistrationConflict { expected, reported })
            }
        }
    }
}

/// Handshake failures surfaced to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandshakeError {
    /// Transport failure or a response other than `200 OK`.
    #[error("adapter unavailable: {reason}")]
    AdapterUnavailable {
        /// Human-readable cause.
        reason: String,
    },

    /// The adapter serves a different physical database than expected.
    #[error("registration conflict: expected physical database {expected}, adapter reported {reported}")]
    RegistrationConflict {
        /// Identifier the caller expected.
        expected: PhysicalDatabaseId,
        /// Identifier the adapter reported.
        reported: PhysicalDatabaseId,
    },
}
