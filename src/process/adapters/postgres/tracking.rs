//! `PostgreSQL` unit of work for tracking records.
//!
//! Each transaction owns one pooled connection for its whole lifetime and
//! drives `BEGIN`/`COMMIT`/`ROLLBACK` through Diesel's transaction manager.
//! Lookups take a row lock with `SELECT … FOR UPDATE`; concurrent inserts
//! for the same key are rejected by `idx_bg_tracks_namespace_operation`.

use super::{
    models::{BgTrackRow, NewBgTrackRow},
    schema::bg_tracks,
};
use crate::process::{
    domain::{
        BgTrack, Namespace, OperationName, PersistedTrackData, ProcessId, TrackId, TrackKey,
    },
    ports::{TrackingError, TrackingResult, TrackingTransaction, UnitOfWork},
};
use async_trait::async_trait;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the tracking adapter.
pub type TrackingPgPool = Pool<ConnectionManager<PgConnection>>;

type TrackingConnection = PooledConnection<ConnectionManager<PgConnection>>;

const TRACK_KEY_INDEX: &str = "idx_bg_tracks_namespace_operation";

/// `PostgreSQL`-backed [`UnitOfWork`].
#[derive(Debug, Clone)]
pub struct PostgresUnitOfWork {
    pool: TrackingPgPool,
}

impl PostgresUnitOfWork {
    /// Creates a unit of work over a connection pool.
    #[must_use]
    pub const fn new(pool: TrackingPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    async fn begin_new(&self) -> TrackingResult<Box<dyn TrackingTransaction>> {
        let pool = self.pool.clone();
        let connection = tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get().map_err(TrackingError::persistence)?;
            AnsiTransactionManager::begin_transaction(&mut *pooled)
                .map_err(TrackingError::persistence)?;
            Ok::<_, TrackingError>(pooled)
        })
        .await
        .map_err(TrackingError::persistence)??;

        Ok(Box::new(PostgresTrackingTransaction {
            connection: Some(connection),
        }))
    }
}

// A connection dropped with its transaction still open is reported broken
// by the r2d2 manager and discarded instead of being returned to the pool.
struct PostgresTrackingTransaction {
    connection: Option<TrackingConnection>,
}

impl PostgresTrackingTransaction {
    async fn run_blocking<F, T>(&mut self, f: F) -> TrackingResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TrackingResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut connection = self
            .connection
            .take()
            .ok_or(TrackingError::TransactionClosed)?;
        let (returned, result) = tokio::task::spawn_blocking(move || {
            let outcome = f(&mut connection);
            (connection, outcome)
        })
        .await
        .map_err(TrackingError::persistence)?;
        self.connection = Some(returned);
        result
    }

    async fn finish<F>(&mut self, f: F) -> TrackingResult<()>
    where
        F: FnOnce(&mut PgConnection) -> diesel::QueryResult<()> + Send + 'static,
    {
        let result = self
            .run_blocking(move |connection| f(connection).map_err(TrackingError::persistence))
            .await;
        self.connection = None;
        result
    }
}

#[async_trait]
impl TrackingTransaction for PostgresTrackingTransaction {
    async fn find(&mut self, key: &TrackKey) -> TrackingResult<Option<BgTrack>> {
        let namespace = key.namespace().as_str().to_owned();
        let operation = key.operation().as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = bg_tracks::table
                .filter(bg_tracks::namespace.eq(&namespace))
                .filter(bg_tracks::operation.eq(&operation))
                .select(BgTrackRow::as_select())
                .for_update()
                .load::<BgTrackRow>(connection)
                .map_err(TrackingError::persistence)?;
            rows.into_iter().next().map(row_to_track).transpose()
        })
        .await
    }

    async fn delete(&mut self, key: &TrackKey) -> TrackingResult<()> {
        let namespace = key.namespace().as_str().to_owned();
        let operation = key.operation().as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::delete(
                bg_tracks::table
                    .filter(bg_tracks::namespace.eq(&namespace))
                    .filter(bg_tracks::operation.eq(&operation)),
            )
            .execute(connection)
            .map_err(TrackingError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn insert(&mut self, track: &BgTrack) -> TrackingResult<()> {
        let key = track.key().clone();
        let new_row = to_new_row(track);
        self.run_blocking(move |connection| {
            diesel::insert_into(bg_tracks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_track_key_violation(info.as_ref()) =>
                    {
                        TrackingError::DuplicateTrack(key.clone())
                    }
                    _ => TrackingError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn commit(&mut self) -> TrackingResult<()> {
        self.finish(|connection| AnsiTransactionManager::commit_transaction(connection))
            .await
    }

    async fn rollback(&mut self) -> TrackingResult<()> {
        self.finish(|connection| AnsiTransactionManager::rollback_transaction(connection))
            .await
    }
}

fn to_new_row(track: &BgTrack) -> NewBgTrackRow {
    NewBgTrackRow {
        id: track.id().into_inner(),
        namespace: track.key().namespace().as_str().to_owned(),
        operation: track.key().operation().as_str().to_owned(),
        process_id: track.process_id().as_str().to_owned(),
        created_at: track.created_at(),
    }
}

fn row_to_track(row: BgTrackRow) -> TrackingResult<BgTrack> {
    let BgTrackRow {
        id,
        namespace,
        operation,
        process_id,
        created_at,
    } = row;

    let key = TrackKey::new(
        Namespace::new(namespace).map_err(TrackingError::invalid_persisted_data)?,
        OperationName::new(operation).map_err(TrackingError::invalid_persisted_data)?,
    );
    let data = PersistedTrackData {
        id: TrackId::from_uuid(id),
        key,
        process_id: ProcessId::new(process_id).map_err(TrackingError::invalid_persisted_data)?,
        created_at,
    };
    Ok(BgTrack::from_persisted(data))
}

fn is_track_key_violation(info: &dyn diesel::result::DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == TRACK_KEY_INDEX)
}
