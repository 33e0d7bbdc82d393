//! Adapter API contract descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Path prefix under which adapters expose their versioned API.
pub const DEFAULT_CONTRACT_PATH: &str = "/api";

/// One versioned API surface advertised by an adapter.
///
/// An adapter at major `3` may still serve major `2` callers by listing `2`
/// in `supported_majors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpec {
    #[serde(rename = "specRootUrl")]
    path: String,
    major: u32,
    minor: u32,
    #[serde(default)]
    supported_majors: BTreeSet<u32>,
}

impl ApiSpec {
    /// Creates a spec entry with no additional supported majors.
    #[must_use]
    pub fn new(path: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            path: path.into(),
            major,
            minor,
            supported_majors: BTreeSet::new(),
        }
    }

    /// Sets the majors this spec can still serve.
    #[must_use]
    pub fn with_supported_majors(mut self, majors: impl IntoIterator<Item = u32>) -> Self {
        self.supported_majors = majors.into_iter().collect();
        self
    }

    /// Returns the endpoint path prefix.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the declared major version.
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Returns the declared minor version.
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Returns the additional majors served for backward compatibility.
    #[must_use]
    pub const fn supported_majors(&self) -> &BTreeSet<u32> {
        &self.supported_majors
    }

    /// Returns whether a caller requesting `major.minor` can be served.
    ///
    /// Same major requires the declared minor to be at least the requested
    /// one. A major listed in `supported_majors` is served at any minor.
    #[must_use]
    pub fn is_compatible(&self, requested_major: u32, requested_minor: u32) -> bool {
        (self.major == requested_major && self.minor >= requested_minor)
            || self.supported_majors.contains(&requested_major)
    }
}

/// Immutable descriptor of an adapter's API surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterApiVersion {
    specs: Vec<ApiSpec>,
}

impl AdapterApiVersion {
    /// Creates a descriptor from an ordered list of spec entries.
    #[must_use]
    pub fn new(specs: impl IntoIterator<Item = ApiSpec>) -> Self {
        Self {
            specs: specs.into_iter().collect(),
        }
    }

    /// Descriptor assumed for adapters that predate the `api-version`
    /// endpoint: major `1`, minor `0` under [`DEFAULT_CONTRACT_PATH`].
    #[must_use]
    pub fn legacy() -> Self {
        Self::new([ApiSpec::new(DEFAULT_CONTRACT_PATH, 1, 0).with_supported_majors([1])])
    }

    /// Returns the spec entries in declaration order.
    #[must_use]
    pub fn specs(&self) -> &[ApiSpec] {
        &self.specs
    }

    /// Returns the first spec declared for `path`.
    #[must_use]
    pub fn spec_for(&self, path: &str) -> Option<&ApiSpec> {
        self.specs.iter().find(|spec| spec.path == path)
    }
}
