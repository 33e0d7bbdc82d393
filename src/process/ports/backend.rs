//! Port for the workflow engine that runs process instances.

use crate::process::domain::{ProcessDefinition, ProcessDomainError, ProcessId, ProcessInstance};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for process backend operations.
pub type ProcessBackendResult<T> = Result<T, ProcessBackendError>;

/// Workflow engine contract.
#[async_trait]
pub trait ProcessBackend: Send + Sync {
    /// Creates a not-yet-started instance of `definition`.
    async fn create_process(
        &self,
        definition: &ProcessDefinition,
    ) -> ProcessBackendResult<ProcessInstance>;

    /// Starts a created instance.
    async fn start_process(&self, instance: &ProcessInstance) -> ProcessBackendResult<()>;

    /// Fetches the current view of an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessBackendError::NotFound`] when the backend does not
    /// know the identifier.
    async fn get_process_instance(&self, id: &ProcessId) -> ProcessBackendResult<ProcessInstance>;

    /// Requests termination of an instance. Termination is advisory.
    async fn terminate_process(&self, id: &ProcessId) -> ProcessBackendResult<()>;

    /// Moves a failed or terminated instance back to running.
    async fn retry_process(&self, instance: &ProcessInstance) -> ProcessBackendResult<()>;
}

/// Errors returned by process backend implementations.
#[derive(Debug, Clone, Error)]
pub enum ProcessBackendError {
    /// The backend has no instance with this identifier.
    #[error("process instance not found: {0}")]
    NotFound(ProcessId),

    /// The instance is not in a state that allows the request.
    #[error(transparent)]
    Lifecycle(#[from] ProcessDomainError),

    /// Engine or transport failure.
    #[error("process backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProcessBackendError {
    /// Wraps an engine or transport error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Returns whether this error reports an unknown instance.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
