//! Diesel row models for tracking persistence.

use super::schema::bg_tracks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for tracking records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bg_tracks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BgTrackRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Namespace of the tracked operation.
    pub namespace: String,
    /// Operation name.
    pub operation: String,
    /// Tracked process identifier.
    pub process_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for tracking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bg_tracks)]
pub struct NewBgTrackRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Namespace of the tracked operation.
    pub namespace: String,
    /// Operation name.
    pub operation: String,
    /// Tracked process identifier.
    pub process_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
