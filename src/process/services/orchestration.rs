//! Idempotent process orchestration keyed by `(namespace, operation)`.

use crate::process::{
    domain::{
        BgTrack, BlueGreenStatusView, Namespace, OperationName, ProcessDefinition,
        ProcessDomainError, ProcessId, ProcessInstance, ProcessState, TrackKey,
    },
    ports::{ProcessBackend, ProcessBackendError, TrackingError, TrackingTransaction, UnitOfWork},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Default number of lookups re-run after losing a tracking race.
pub const DEFAULT_TRACK_RACE_RETRIES: u32 = 3;

/// Service-level errors for process orchestration.
#[derive(Debug, Error)]
pub enum ProcessOrchestrationError {
    /// Namespace or operation validation failed.
    #[error(transparent)]
    Domain(#[from] ProcessDomainError),
    /// The process backend failed.
    #[error(transparent)]
    Backend(#[from] ProcessBackendError),
    /// The tracking store failed.
    #[error(transparent)]
    Tracking(#[from] TrackingError),
    /// Concurrent creators kept winning the insert for this key.
    #[error("tracking for {key} still contended after {retries} retries")]
    TrackContention {
        /// Contended key.
        key: TrackKey,
        /// Retries spent.
        retries: u32,
    },
}

/// Result type for process orchestration.
pub type ProcessOrchestrationResult<T> = Result<T, ProcessOrchestrationError>;

enum Attempt {
    Joined(ProcessInstance),
    Created(ProcessInstance),
    LostRace(ProcessInstance),
}

/// Runs process instances through a [`ProcessBackend`] and guarantees at most
/// one live instance per `(namespace, operation)`.
#[derive(Clone)]
pub struct ProcessOrchestrationService<B, U, C>
where
    B: ProcessBackend,
    U: UnitOfWork,
    C: Clock + Send + Sync,
{
    backend: Arc<B>,
    unit_of_work: Arc<U>,
    clock: Arc<C>,
    track_race_retries: u32,
}

impl<B, U, C> ProcessOrchestrationService<B, U, C>
where
    B: ProcessBackend,
    U: UnitOfWork,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default race retry bound.
    #[must_use]
    pub const fn new(backend: Arc<B>, unit_of_work: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            backend,
            unit_of_work,
            clock,
            track_race_retries: DEFAULT_TRACK_RACE_RETRIES,
        }
    }

    /// Overrides how many times a lost tracking race is retried.
    #[must_use]
    pub const fn with_track_race_retries(mut self, retries: u32) -> Self {
        self.track_race_retries = retries;
        self
    }

    /// Starts a created instance.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessOrchestrationError::Backend`] when the backend
    /// rejects the request.
    pub async fn start_process(&self, instance: &ProcessInstance) -> ProcessOrchestrationResult<()> {
        self.backend.start_process(instance).await?;
        Ok(())
    }

    /// Fetches an instance by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessOrchestrationError::Backend`] wrapping
    /// [`ProcessBackendError::NotFound`] for unknown identifiers.
    pub async fn get_process(&self, id: &ProcessId) -> ProcessOrchestrationResult<ProcessInstance> {
        Ok(self.backend.get_process_instance(id).await?)
    }

    /// Requests termination of an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessOrchestrationError::Backend`] when the backend
    /// rejects the request.
    pub async fn terminate_process(&self, id: &ProcessId) -> ProcessOrchestrationResult<()> {
        self.backend.terminate_process(id).await?;
        Ok(())
    }

    /// Restarts a failed or terminated instance.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessOrchestrationError::Backend`] when the backend
    /// rejects the request.
    pub async fn retry_process(&self, instance: &ProcessInstance) -> ProcessOrchestrationResult<()> {
        self.backend.retry_process(instance).await?;
        Ok(())
    }

    /// Renders the blue-green status of an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessOrchestrationError::Backend`] when the instance
    /// cannot be fetched.
    pub async fn blue_green_status(
        &self,
        id: &ProcessId,
    ) -> ProcessOrchestrationResult<BlueGreenStatusView> {
        let instance = self.get_process(id).await?;
        Ok(BlueGreenStatusView::from_instance(&instance))
    }

    /// Returns the running instance for `(namespace, operation)`, creating a
    /// new one when none is running.
    ///
    /// A tracked instance that is still in progress is joined. A tracked
    /// instance in any other state, or one the backend no longer knows, has
    /// its track replaced by a freshly created instance. The lookup and the
    /// replacement happen in one new tracking transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessOrchestrationError::Domain`] for blank names,
    /// [`ProcessOrchestrationError::TrackContention`] when concurrent
    /// creators win the insert more often than the retry bound allows, and
    /// backend or tracking errors otherwise.
    pub async fn create_process(
        &self,
        definition: &ProcessDefinition,
        namespace: &str,
        operation: &str,
    ) -> ProcessOrchestrationResult<ProcessInstance> {
        let key = TrackKey::new(Namespace::new(namespace)?, OperationName::new(operation)?);
        let mut races = 0_u32;

        loop {
            match self.attempt_create(definition, &key).await? {
                Attempt::Joined(instance) | Attempt::Created(instance) => return Ok(instance),
                Attempt::LostRace(orphan) => {
                    self.discard_orphan(&key, &orphan).await;
                    if races >= self.track_race_retries {
                        tracing::warn!(
                            namespace = %key.namespace(),
                            operation = %key.operation(),
                            retries = races,
                            "giving up on contended tracking key"
                        );
                        return Err(ProcessOrchestrationError::TrackContention {
                            key,
                            retries: races,
                        });
                    }
                    races += 1;
                    tracing::info!(
                        namespace = %key.namespace(),
                        operation = %key.operation(),
                        attempt = races,
                        "lost tracking race, looking up the winner"
                    );
                }
            }
        }
    }

    async fn attempt_create(
        &self,
        definition: &ProcessDefinition,
        key: &TrackKey,
    ) -> ProcessOrchestrationResult<Attempt> {
        let mut transaction = self.unit_of_work.begin_new().await?;

        match self
            .create_or_join(transaction.as_mut(), definition, key)
            .await
        {
            Ok(Attempt::LostRace(orphan)) => {
                Self::rollback(transaction.as_mut(), key).await;
                Ok(Attempt::LostRace(orphan))
            }
            Ok(attempt) => {
                if let Err(err) = transaction.commit().await {
                    if let Attempt::Created(instance) = &attempt {
                        self.discard_orphan(key, instance).await;
                    }
                    return Err(err.into());
                }
                Ok(attempt)
            }
            Err(err) => {
                Self::rollback(transaction.as_mut(), key).await;
                Err(err)
            }
        }
    }

    async fn create_or_join(
        &self,
        transaction: &mut dyn TrackingTransaction,
        definition: &ProcessDefinition,
        key: &TrackKey,
    ) -> ProcessOrchestrationResult<Attempt> {
        if let Some(track) = transaction.find(key).await? {
            if let Some(instance) = self.running_instance(&track).await? {
                tracing::debug!(
                    namespace = %key.namespace(),
                    operation = %key.operation(),
                    process_id = %instance.id(),
                    "joining running process"
                );
                return Ok(Attempt::Joined(instance));
            }
            transaction.delete(key).await?;
        }

        let instance = self.backend.create_process(definition).await?;
        let track = BgTrack::new(key.clone(), instance.id().clone(), self.clock.as_ref());

        match transaction.insert(&track).await {
            Ok(()) => {
                tracing::info!(
                    namespace = %key.namespace(),
                    operation = %key.operation(),
                    process_id = %instance.id(),
                    "tracking new process"
                );
                Ok(Attempt::Created(instance))
            }
            Err(TrackingError::DuplicateTrack(_)) => Ok(Attempt::LostRace(instance)),
            Err(err) => {
                self.discard_orphan(key, &instance).await;
                Err(err.into())
            }
        }
    }

    async fn running_instance(
        &self,
        track: &BgTrack,
    ) -> ProcessOrchestrationResult<Option<ProcessInstance>> {
        match self.backend.get_process_instance(track.process_id()).await {
            Ok(instance) if instance.state() == ProcessState::InProgress => Ok(Some(instance)),
            Ok(instance) => {
                tracing::info!(
                    namespace = %track.key().namespace(),
                    operation = %track.key().operation(),
                    process_id = %track.process_id(),
                    state = %instance.state(),
                    "replacing track of process that is not running"
                );
                Ok(None)
            }
            Err(ProcessBackendError::NotFound(_)) => {
                tracing::info!(
                    namespace = %track.key().namespace(),
                    operation = %track.key().operation(),
                    process_id = %track.process_id(),
                    "replacing track of process unknown to the backend"
                );
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn discard_orphan(&self, key: &TrackKey, orphan: &ProcessInstance) {
        if let Err(err) = self.backend.terminate_process(orphan.id()).await {
            tracing::warn!(
                namespace = %key.namespace(),
                operation = %key.operation(),
                process_id = %orphan.id(),
                error = %err,
                "failed to terminate untracked process"
            );
        }
    }

    async fn rollback(transaction: &mut dyn TrackingTransaction, key: &TrackKey) {
        if let Err(err) = transaction.rollback().await {
            tracing::warn!(
                namespace = %key.namespace(),
                operation = %key.operation(),
                error = %err,
                "tracking rollback failed"
            );
        }
    }
}
