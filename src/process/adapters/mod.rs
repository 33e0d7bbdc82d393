//! Infrastructure adapters for process orchestration.

pub mod memory;
pub mod postgres;
