//! In-memory tracking store with serialised transactions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::process::{
    domain::{BgTrack, TrackKey},
    ports::{TrackingError, TrackingResult, TrackingTransaction, UnitOfWork},
};

/// Thread-safe in-memory tracking store.
///
/// Only one transaction is open at a time: [`UnitOfWork::begin_new`] waits
/// for the previous transaction to commit or roll back. Writes are buffered
/// in the transaction and applied on commit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackingStore {
    tracks: Arc<RwLock<HashMap<TrackKey, BgTrack>>>,
    gate: Arc<Mutex<()>>,
}

impl InMemoryTrackingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed tracks, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Persistence`] when the state lock is
    /// poisoned.
    pub fn committed(&self) -> TrackingResult<Vec<BgTrack>> {
        let tracks = self.tracks.read().map_err(|err| poisoned(err.to_string()))?;
        let mut snapshot: Vec<BgTrack> = tracks.values().cloned().collect();
        snapshot.sort_by(|left, right| left.key().cmp(right.key()));
        Ok(snapshot)
    }

    /// Stores a track outside any transaction, replacing an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Persistence`] when the state lock is
    /// poisoned.
    pub fn seed(&self, track: BgTrack) -> TrackingResult<()> {
        let mut tracks = self.tracks.write().map_err(|err| poisoned(err.to_string()))?;
        tracks.insert(track.key().clone(), track);
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryTrackingStore {
    async fn begin_new(&self) -> TrackingResult<Box<dyn TrackingTransaction>> {
        let guard = Arc::clone(&self.gate).lock_owned().await;
        Ok(Box::new(InMemoryTrackingTransaction {
            tracks: Arc::clone(&self.tracks),
            pending: HashMap::new(),
            guard: Some(guard),
        }))
    }
}

struct InMemoryTrackingTransaction {
    tracks: Arc<RwLock<HashMap<TrackKey, BgTrack>>>,
    // `None` marks a buffered delete.
    pending: HashMap<TrackKey, Option<BgTrack>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl InMemoryTrackingTransaction {
    const fn ensure_open(&self) -> TrackingResult<()> {
        if self.guard.is_none() {
            return Err(TrackingError::TransactionClosed);
        }
        Ok(())
    }

    fn visible(&self, key: &TrackKey) -> TrackingResult<Option<BgTrack>> {
        if let Some(buffered) = self.pending.get(key) {
            return Ok(buffered.clone());
        }
        let tracks = self.tracks.read().map_err(|err| poisoned(err.to_string()))?;
        Ok(tracks.get(key).cloned())
    }
}

#[async_trait]
impl TrackingTransaction for InMemoryTrackingTransaction {
    async fn find(&mut self, key: &TrackKey) -> TrackingResult<Option<BgTrack>> {
        self.ensure_open()?;
        self.visible(key)
    }

    async fn delete(&mut self, key: &TrackKey) -> TrackingResult<()> {
        self.ensure_open()?;
        self.pending.insert(key.clone(), None);
        Ok(())
    }

    async fn insert(&mut self, track: &BgTrack) -> TrackingResult<()> {
        self.ensure_open()?;
        if self.visible(track.key())?.is_some() {
            return Err(TrackingError::DuplicateTrack(track.key().clone()));
        }
        self.pending
            .insert(track.key().clone(), Some(track.clone()));
        Ok(())
    }

    async fn commit(&mut self) -> TrackingResult<()> {
        self.ensure_open()?;
        {
            let mut tracks = self.tracks.write().map_err(|err| poisoned(err.to_string()))?;
            for (key, buffered) in self.pending.drain() {
                match buffered {
                    Some(track) => {
                        tracks.insert(key, track);
                    }
                    None => {
                        tracks.remove(&key);
                    }
                }
            }
        }
        self.guard = None;
        Ok(())
    }

    async fn rollback(&mut self) -> TrackingResult<()> {
        self.ensure_open()?;
        self.pending.clear();
        self.guard = None;
        Ok(())
    }
}

fn poisoned(message: String) -> TrackingError {
    TrackingError::persistence(std::io::Error::other(message))
}
