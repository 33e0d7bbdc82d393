//! Identifier and path-segment types for the adapter domain.

use super::AdapterDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a physical database served by an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalDatabaseId(String);

impl PhysicalDatabaseId {
    /// Creates a physical database identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyPhysicalDatabaseId`] when the value
    /// is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, AdapterDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(AdapterDomainError::EmptyPhysicalDatabaseId);
        }
        Ok(Self(normalized))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhysicalDatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Database technology served by an adapter, e.g. `postgresql`.
///
/// Used verbatim as a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseType(String);

impl DatabaseType {
    /// Creates a database type.
    ///
    /// The input is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyDatabaseType`] when the value is
    /// blank or [`AdapterDomainError::InvalidDatabaseType`] when it contains
    /// characters outside `[a-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, AdapterDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(AdapterDomainError::EmptyDatabaseType);
        }
        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !is_valid {
            return Err(AdapterDomainError::InvalidDatabaseType(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the database type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Adapter API version path segment, e.g. `v2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersionTag(String);

impl ApiVersionTag {
    /// Creates a validated version tag.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyApiVersionTag`] when the value is
    /// blank or [`AdapterDomainError::InvalidApiVersionTag`] when it is not
    /// `v` followed by digits.
    pub fn new(value: impl Into<String>) -> Result<Self, AdapterDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(AdapterDomainError::EmptyApiVersionTag);
        }
        let digits = normalized.strip_prefix('v').unwrap_or_default();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AdapterDomainError::InvalidApiVersionTag(raw));
        }
        Ok(Self(normalized))
    }

    /// The first adapter API generation.
    #[must_use]
    pub fn v1() -> Self {
        Self("v1".to_owned())
    }

    /// The current adapter API generation.
    #[must_use]
    pub fn v2() -> Self {
        Self("v2".to_owned())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ApiVersionTag {
    type Error = AdapterDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiVersionTag> for String {
    fn from(value: ApiVersionTag) -> Self {
        value.0
    }
}

impl fmt::Display for ApiVersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
