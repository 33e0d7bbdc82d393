//! In-memory process backend and tracking store.

mod backend;
mod tracking;

pub use backend::InMemoryProcessBackend;
pub use tracking::InMemoryTrackingStore;
