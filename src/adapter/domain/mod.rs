//! Domain model for adapter negotiation and registration.
//!
//! Covers adapter addressing, API contract descriptors, capability flags and
//! the registration handshake outcome. All infrastructure concerns are kept
//! outside the domain boundary.

mod address;
mod api_version;
mod capability;
mod credentials;
mod error;
mod handshake;
mod ids;
mod registration;

pub use address::{AdapterAddress, split_address_list};
pub use api_version::{AdapterApiVersion, ApiSpec, DEFAULT_CONTRACT_PATH};
pub use capability::{Capability, CapabilityFlags};
pub use credentials::Credentials;
pub use error::{AdapterDomainError, ParseCapabilityError};
pub use handshake::{HandshakeError, HandshakeOutcome, HandshakeRequest};
pub use ids::{ApiVersionTag, DatabaseType, PhysicalDatabaseId};
pub use registration::RegisteredAdapter;
