//! Application services for adapter negotiation and registration.

mod negotiator;
mod registration;
mod sweep;

pub use negotiator::CapabilityNegotiator;
pub use registration::{
    PhysicalDatabaseRegistrationError, PhysicalDatabaseRegistrationResult,
    PhysicalDatabaseRegistrationService, RegisterPhysicalDatabaseRequest,
};
pub use sweep::{StartupRegistrationSweep, SweepError, SweepFailure, SweepReport};
