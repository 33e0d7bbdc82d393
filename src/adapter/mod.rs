//! Physical database adapter negotiation and registration.
//!
//! This module covers the aggregator-to-adapter direction: negotiating the
//! capabilities and API contract of each adapter version, confirming adapter
//! identity through the registration handshake, and sweeping configured
//! adapters at startup. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
