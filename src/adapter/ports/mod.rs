//! Port contracts for adapter negotiation and registration.
//!
//! Ports define infrastructure-agnostic interfaces used by the adapter
//! services.

mod client;
mod handshake;
mod registry;

pub use client::{AdapterClient, AdapterClientError, AdapterClientFactory, AdapterClientResult};
pub use handshake::PhysicalDatabaseHandshake;
pub use registry::{AdapterRegistry, AdapterRegistryError, AdapterRegistryResult};
