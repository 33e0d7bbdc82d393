//! Step definitions for process deduplication scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
