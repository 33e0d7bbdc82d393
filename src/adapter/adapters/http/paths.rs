//! Adapter endpoint URL builders.

use crate::adapter::domain::{AdapterAddress, ApiVersionTag, DatabaseType};

/// Builds the API contract descriptor URL.
#[must_use]
pub fn api_version_url(address: &AdapterAddress) -> String {
    address.join("api-version")
}

/// Builds the capability map URL for a database type.
#[must_use]
pub fn supports_url(
    address: &AdapterAddress,
    database_type: &DatabaseType,
    api_version: &ApiVersionTag,
) -> String {
    address.join(&format!(
        "api/{api_version}/dbaas/adapter/{database_type}/supports"
    ))
}

/// Builds the physical database registration URL used by the handshake.
#[must_use]
pub fn physical_database_url(
    address: &AdapterAddress,
    database_type: &DatabaseType,
    api_version: &ApiVersionTag,
) -> String {
    address.join(&format!(
        "api/{api_version}/dbaas/adapter/{database_type}/physical_database"
    ))
}

/// Builds the forced re-registration URL.
///
/// Forced registration is only exposed by the `v2` adapter API.
#[must_use]
pub fn force_registration_url(address: &AdapterAddress) -> String {
    address.join("api/v2/dbaas/adapter/physical_database/force_registration")
}
