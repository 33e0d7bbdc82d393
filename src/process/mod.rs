//! Tracked process orchestration.
//!
//! Process instances run on an external workflow engine reached through the
//! [`ports::ProcessBackend`] port. Each logical operation on a namespace is
//! tracked by a [`domain::BgTrack`] row so that concurrent or repeated
//! requests join the running instance instead of starting another one.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
