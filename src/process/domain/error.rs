//! Error types for process domain validation and parsing.

use super::ProcessState;
use thiserror::Error;

/// Errors returned while constructing or transitioning process values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessDomainError {
    /// The namespace is empty after trimming.
    #[error("namespace must not be empty")]
    EmptyNamespace,

    /// The operation name is empty after trimming.
    #[error("operation name must not be empty")]
    EmptyOperationName,

    /// The process identifier is empty after trimming.
    #[error("process identifier must not be empty")]
    EmptyProcessId,

    /// The process definition name is empty after trimming.
    #[error("process definition name must not be empty")]
    EmptyDefinitionName,

    /// The requested lifecycle transition is not allowed.
    #[error("invalid process transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: ProcessState,
        /// Requested state.
        to: ProcessState,
    },
}

/// Error returned while parsing process states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown process state: {0}")]
pub struct ParseProcessStateError(pub String);
