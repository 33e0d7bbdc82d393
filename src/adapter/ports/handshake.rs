//! Handshake port used to confirm adapter identity.

use crate::adapter::domain::{HandshakeOutcome, HandshakeRequest};
use async_trait::async_trait;

/// Performs the registration handshake with an adapter.
///
/// Implementations make exactly one attempt per call and report every
/// failure through the returned [`HandshakeOutcome`].
#[async_trait]
pub trait PhysicalDatabaseHandshake: Send + Sync {
    /// Runs one handshake.
    async fn handshake(&self, request: &HandshakeRequest) -> HandshakeOutcome;
}
