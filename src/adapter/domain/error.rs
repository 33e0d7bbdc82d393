//! Error types for adapter domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing adapter domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterDomainError {
    /// The adapter address is empty after trimming.
    #[error("adapter address must not be empty")]
    EmptyAddress,

    /// The adapter address does not have an `http://` or `https://` prefix.
    #[error("adapter address '{0}' must start with 'http://' or 'https://'")]
    InvalidAddress(String),

    /// The database type is empty after trimming.
    #[error("database type must not be empty")]
    EmptyDatabaseType,

    /// The database type contains characters that cannot appear in a path
    /// segment.
    #[error(
        "database type '{0}' contains invalid characters (only alphanumeric, '-' and '_' allowed)"
    )]
    InvalidDatabaseType(String),

    /// The API version tag is empty after trimming.
    #[error("API version tag must not be empty")]
    EmptyApiVersionTag,

    /// The API version tag is not of the form `v<digits>`.
    #[error("API version tag '{0}' must look like 'v1', 'v2', ...")]
    InvalidApiVersionTag(String),

    /// The physical database identifier is empty after trimming.
    #[error("physical database identifier must not be empty")]
    EmptyPhysicalDatabaseId,

    /// The adapter username is empty after trimming.
    #[error("adapter username must not be empty")]
    EmptyUsername,
}

/// Error returned while parsing a capability name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown adapter capability: {0}")]
pub struct ParseCapabilityError(pub String);
