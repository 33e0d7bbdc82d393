//! In-memory adapters for registry and fleet ports.

mod fleet;
mod registry;

pub use fleet::{InMemoryAdapterClient, InMemoryAdapterFleet, ScriptedAdapter};
pub use registry::InMemoryAdapterRegistry;
