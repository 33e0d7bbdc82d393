//! Adapter base address value object and configuration parsing.

use super::AdapterDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated base URL of a remote adapter, e.g. `http://pg-adapter:8080`.
///
/// The value is trimmed and any trailing `/` is removed so that endpoint
/// paths can be appended directly and registry lookups compare exact
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdapterAddress(String);

impl AdapterAddress {
    /// Creates a validated adapter address.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyAddress`] when the value is blank or
    /// [`AdapterDomainError::InvalidAddress`] when it lacks an `http://` or
    /// `https://` scheme.
    pub fn new(value: impl Into<String>) -> Result<Self, AdapterDomainError> {
        let raw = value.into();
        let normalized = raw.trim().trim_end_matches('/');

        if normalized.is_empty() {
            return Err(AdapterDomainError::EmptyAddress);
        }

        let host = normalized
            .strip_prefix("http://")
            .or_else(|| normalized.strip_prefix("https://"));
        if host.is_none_or(str::is_empty) {
            return Err(AdapterDomainError::InvalidAddress(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins an absolute endpoint path onto the base address.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl TryFrom<String> for AdapterAddress {
    type Error = AdapterDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdapterAddress> for String {
    fn from(value: AdapterAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for AdapterAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AdapterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits a comma-separated adapter address list into trimmed tokens.
///
/// Blank tokens are dropped and repeated tokens are kept once, in first-seen
/// order. A missing or all-blank list yields no tokens. Tokens are not
/// validated here; see [`AdapterAddress::new`].
#[must_use]
pub fn split_address_list(raw: Option<&str>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in raw.unwrap_or_default().split(',').map(str::trim) {
        if token.is_empty() || tokens.iter().any(|seen| seen == token) {
            continue;
        }
        tokens.push(token.to_owned());
    }
    tokens
}
