//! In-memory workflow engine for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::process::{
    domain::{ProcessDefinition, ProcessDomainError, ProcessId, ProcessInstance, ProcessState},
    ports::{ProcessBackend, ProcessBackendError, ProcessBackendResult},
};

/// Thread-safe in-memory process backend.
///
/// Besides the [`ProcessBackend`] contract it exposes controls that drive
/// instances through their lifecycle the way a real engine would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProcessBackend {
    state: Arc<RwLock<InMemoryBackendState>>,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    instances: HashMap<ProcessId, ProcessInstance>,
    created: usize,
    terminations: Vec<ProcessId>,
}

impl InMemoryProcessBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many instances were created.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessBackendError::Backend`] when the state lock is
    /// poisoned.
    pub fn created_count(&self) -> ProcessBackendResult<usize> {
        Ok(self.read()?.created)
    }

    /// Returns the identifiers terminated so far, in call order.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessBackendError::Backend`] when the state lock is
    /// poisoned.
    pub fn terminations(&self) -> ProcessBackendResult<Vec<ProcessId>> {
        Ok(self.read()?.terminations.clone())
    }

    /// Forces an instance into `target` through the lifecycle rules.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessBackendError::NotFound`] for unknown identifiers and
    /// [`ProcessBackendError::Lifecycle`] for disallowed transitions.
    pub fn transition(&self, id: &ProcessId, target: ProcessState) -> ProcessBackendResult<()> {
        self.with_instance(id, |instance| instance.transition_to(target))
    }

    /// Completes the active task of a running instance.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessBackendError::NotFound`] for unknown identifiers and
    /// [`ProcessBackendError::Lifecycle`] when the instance is not running.
    pub fn advance(&self, id: &ProcessId) -> ProcessBackendResult<()> {
        self.with_instance(id, ProcessInstance::advance)
    }

    /// Drops an instance, as an engine that purged its history would.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessBackendError::Backend`] when the state lock is
    /// poisoned.
    pub fn forget(&self, id: &ProcessId) -> ProcessBackendResult<()> {
        self.write()?.instances.remove(id);
        Ok(())
    }

    fn with_instance(
        &self,
        id: &ProcessId,
        apply: impl FnOnce(&mut ProcessInstance) -> Result<(), ProcessDomainError>,
    ) -> ProcessBackendResult<()> {
        let mut state = self.write()?;
        let instance = state
            .instances
            .get_mut(id)
            .ok_or_else(|| ProcessBackendError::NotFound(id.clone()))?;
        apply(instance)?;
        Ok(())
    }

    fn read(&self) -> ProcessBackendResult<std::sync::RwLockReadGuard<'_, InMemoryBackendState>> {
        self.state
            .read()
            .map_err(|err| ProcessBackendError::backend(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> ProcessBackendResult<std::sync::RwLockWriteGuard<'_, InMemoryBackendState>> {
        self.state
            .write()
            .map_err(|err| ProcessBackendError::backend(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl ProcessBackend for InMemoryProcessBackend {
    async fn create_process(
        &self,
        definition: &ProcessDefinition,
    ) -> ProcessBackendResult<ProcessInstance> {
        let instance = ProcessInstance::new(ProcessId::random(), definition.clone());
        let mut state = self.write()?;
        state.created += 1;
        state
            .instances
            .insert(instance.id().clone(), instance.clone());
        Ok(instance)
    }

    async fn start_process(&self, instance: &ProcessInstance) -> ProcessBackendResult<()> {
        self.transition(instance.id(), ProcessState::InProgress)
    }

    async fn get_process_instance(&self, id: &ProcessId) -> ProcessBackendResult<ProcessInstance> {
        self.read()?
            .instances
            .get(id)
            .cloned()
            .ok_or_else(|| ProcessBackendError::NotFound(id.clone()))
    }

    async fn terminate_process(&self, id: &ProcessId) -> ProcessBackendResult<()> {
        self.transition(id, ProcessState::Terminated)?;
        self.write()?.terminations.push(id.clone());
        Ok(())
    }

    async fn retry_process(&self, instance: &ProcessInstance) -> ProcessBackendResult<()> {
        let current = self.get_process_instance(instance.id()).await?;
        if !matches!(
            current.state(),
            ProcessState::Failed | ProcessState::Terminated
        ) {
            return Err(ProcessDomainError::InvalidTransition {
                from: current.state(),
                to: ProcessState::InProgress,
            }
            .into());
        }
        self.transition(instance.id(), ProcessState::InProgress)
    }
}
