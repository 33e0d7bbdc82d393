//! Registry entry for an adapter that completed a handshake.

use super::{AdapterAddress, ApiVersionTag, DatabaseType, PhysicalDatabaseId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Adapter known to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAdapter {
    physical_database_id: PhysicalDatabaseId,
    address: AdapterAddress,
    database_type: DatabaseType,
    api_version: ApiVersionTag,
    registered_at: DateTime<Utc>,
}

impl RegisteredAdapter {
    /// Creates a registry entry stamped with the current clock time.
    #[must_use]
    pub fn new(
        physical_database_id: PhysicalDatabaseId,
        address: AdapterAddress,
        database_type: DatabaseType,
        api_version: ApiVersionTag,
        clock: &impl Clock,
    ) -> Self {
        Self {
            physical_database_id,
            address,
            database_type,
            api_version,
            registered_at: clock.utc(),
        }
    }

    /// Returns the physical database identifier.
    #[must_use]
    pub const fn physical_database_id(&self) -> &PhysicalDatabaseId {
        &self.physical_database_id
    }

    /// Returns the adapter base address.
    #[must_use]
    pub const fn address(&self) -> &AdapterAddress {
        &self.address
    }

    /// Returns the database type.
    #[must_use]
    pub const fn database_type(&self) -> &DatabaseType {
        &self.database_type
    }

    /// Returns the API version negotiated during the handshake.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersionTag {
        &self.api_version
    }

    /// Returns when the handshake completed.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}
