//! Application services for process orchestration.

pub mod orchestration;

pub use orchestration::{
    DEFAULT_TRACK_RACE_RETRIES, ProcessOrchestrationError, ProcessOrchestrationResult,
    ProcessOrchestrationService,
};
