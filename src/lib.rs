//! DBaaS aggregator control plane.
//!
//! The aggregator fronts a fleet of database adapters, one per physical
//! database, and orchestrates long-running background operations on them.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, database, memory)
//! - **Services**: Use cases composed from ports
//!
//! # Modules
//!
//! - [`adapter`]: Adapter registration, handshake and capability negotiation
//! - [`process`]: Deduplicated process orchestration
//! - [`config`]: TOML configuration with environment overrides
//! - [`telemetry`]: Logging initialisation

pub mod adapter;
pub mod config;
pub mod process;
pub mod telemetry;
