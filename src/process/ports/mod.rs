//! Port contracts for process orchestration.

pub mod backend;
pub mod tracking;

pub use backend::{ProcessBackend, ProcessBackendError, ProcessBackendResult};
pub use tracking::{TrackingError, TrackingResult, TrackingTransaction, UnitOfWork};
