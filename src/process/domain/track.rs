//! Tracking records that deduplicate background operations.

use super::{ProcessDomainError, ProcessId, TrackId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical scope of a tracked operation, usually a database namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Validates and wraps a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDomainError::EmptyNamespace`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ProcessDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ProcessDomainError::EmptyNamespace);
        }
        Ok(Self(normalized))
    }

    /// Returns the namespace as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a tracked operation within a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationName(String);

impl OperationName {
    /// Validates and wraps an operation name.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDomainError::EmptyOperationName`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ProcessDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ProcessDomainError::EmptyOperationName);
        }
        Ok(Self(normalized))
    }

    /// Returns the operation name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `(namespace, operation)` pair a track is unique on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackKey {
    namespace: Namespace,
    operation: OperationName,
}

impl TrackKey {
    /// Creates a key from validated parts.
    #[must_use]
    pub const fn new(namespace: Namespace, operation: OperationName) -> Self {
        Self {
            namespace,
            operation,
        }
    }

    /// Returns the namespace.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn operation(&self) -> &OperationName {
        &self.operation
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.operation)
    }
}

/// Durable link from a [`TrackKey`] to the process currently running it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgTrack {
    id: TrackId,
    key: TrackKey,
    process_id: ProcessId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a track from storage.
#[derive(Debug, Clone)]
pub struct PersistedTrackData {
    /// Row identifier.
    pub id: TrackId,
    /// Unique key.
    pub key: TrackKey,
    /// Tracked process.
    pub process_id: ProcessId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl BgTrack {
    /// Creates a new track stamped with the clock's current time.
    #[must_use]
    pub fn new(key: TrackKey, process_id: ProcessId, clock: &impl Clock) -> Self {
        Self {
            id: TrackId::new(),
            key,
            process_id,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a track from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTrackData) -> Self {
        Self {
            id: data.id,
            key: data.key,
            process_id: data.process_id,
            created_at: data.created_at,
        }
    }

    /// Returns the row identifier.
    #[must_use]
    pub const fn id(&self) -> TrackId {
        self.id
    }

    /// Returns the unique key.
    #[must_use]
    pub const fn key(&self) -> &TrackKey {
        &self.key
    }

    /// Returns the tracked process identifier.
    #[must_use]
    pub const fn process_id(&self) -> &ProcessId {
        &self.process_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
