//! `PostgreSQL` adapters for tracking persistence.

mod models;
mod schema;
mod tracking;

pub use tracking::{PostgresUnitOfWork, TrackingPgPool};
