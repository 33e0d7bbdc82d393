//! Adapter implementations for adapter negotiation and registration ports.

pub mod http;
pub mod memory;
