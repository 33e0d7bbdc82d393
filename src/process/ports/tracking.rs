//! Transactional port for background-operation tracking records.
//!
//! A [`UnitOfWork`] opens a fresh [`TrackingTransaction`] that is independent
//! of any transaction the caller may already hold. Reads inside the
//! transaction lock the row they return, so two callers deciding on the same
//! [`TrackKey`] are serialised by the store.

use crate::process::domain::{BgTrack, TrackKey};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracking store operations.
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Factory for new tracking transactions.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Begins a new transaction.
    async fn begin_new(&self) -> TrackingResult<Box<dyn TrackingTransaction>>;
}

/// One open transaction against the tracking store.
///
/// After [`commit`](Self::commit) or [`rollback`](Self::rollback) every
/// further call fails with [`TrackingError::TransactionClosed`].
#[async_trait]
pub trait TrackingTransaction: Send {
    /// Finds and locks the track for `key`.
    async fn find(&mut self, key: &TrackKey) -> TrackingResult<Option<BgTrack>>;

    /// Deletes the track for `key`, if any.
    async fn delete(&mut self, key: &TrackKey) -> TrackingResult<()>;

    /// Inserts a new track.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::DuplicateTrack`] when a track for the same
    /// key already exists.
    async fn insert(&mut self, track: &BgTrack) -> TrackingResult<()>;

    /// Makes the transaction's writes durable and closes it.
    async fn commit(&mut self) -> TrackingResult<()>;

    /// Discards the transaction's writes and closes it.
    async fn rollback(&mut self) -> TrackingResult<()>;
}

/// Errors returned by tracking store implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackingError {
    /// A track for the key already exists.
    #[error("duplicate track for {0}")]
    DuplicateTrack(TrackKey),

    /// The transaction was already committed or rolled back.
    #[error("tracking transaction is closed")]
    TransactionClosed,

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackingError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
