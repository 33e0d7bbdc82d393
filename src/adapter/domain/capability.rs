//! Adapter capability flags and their backward-compatible defaults.

use super::ParseCapabilityError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Capability an adapter may advertise on its `supports` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Adapter accepts database settings updates.
    #[serde(rename = "settings")]
    Settings,
    /// Adapter manages database users.
    #[serde(rename = "users")]
    Users,
    /// Adapter can describe its logical databases.
    #[serde(rename = "describeDatabases")]
    DescribeDatabases,
}

impl Capability {
    /// Returns every known capability.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Settings, Self::Users, Self::DescribeDatabases]
    }

    /// Returns the key used in the adapter response map.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Users => "users",
            Self::DescribeDatabases => "describeDatabases",
        }
    }

    /// Returns the value assumed when the adapter omits this capability.
    ///
    /// Adapters older than the `users` flag always managed users, so a
    /// missing `users` key means supported. Newer capabilities default to
    /// unsupported.
    #[must_use]
    pub const fn default_when_absent(self) -> bool {
        match self {
            Self::Users => true,
            Self::Settings | Self::DescribeDatabases => false,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<&str> for Capability {
    type Error = ParseCapabilityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        Self::all()
            .into_iter()
            .find(|capability| capability.key() == trimmed)
            .ok_or_else(|| ParseCapabilityError(value.to_owned()))
    }
}

/// Live capability map returned by an adapter's `supports` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityFlags(HashMap<String, bool>);

impl CapabilityFlags {
    /// Creates flags from raw key/value pairs.
    #[must_use]
    pub fn new(flags: impl IntoIterator<Item = (String, bool)>) -> Self {
        Self(flags.into_iter().collect())
    }

    /// Returns whether `capability` is supported, applying the
    /// default-when-absent table for missing keys.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.0
            .get(capability.key())
            .copied()
            .unwrap_or_else(|| capability.default_when_absent())
    }
}
