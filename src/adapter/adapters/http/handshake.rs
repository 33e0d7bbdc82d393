//! `reqwest` implementation of the registration handshake.

use super::paths::physical_database_url;
use crate::adapter::{
    domain::{HandshakeOutcome, HandshakeRequest, PhysicalDatabaseId},
    ports::PhysicalDatabaseHandshake,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;

/// Identity payload returned by the adapter registration endpoint.
#[derive(Debug, Deserialize)]
struct PhysicalDatabaseIdentity {
    id: String,
}

/// Handshake client holding only a transport handle.
///
/// One instance can be reused for any number of handshakes against any
/// address.
#[derive(Debug, Clone, Default)]
pub struct HttpHandshakeClient {
    http: reqwest::Client,
}

impl HttpHandshakeClient {
    /// Creates a handshake client around an existing `reqwest` client.
    #[must_use]
    pub const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PhysicalDatabaseHandshake for HttpHandshakeClient {
    async fn handshake(&self, request: &HandshakeRequest) -> HandshakeOutcome {
        let url = physical_database_url(
            request.address(),
            request.database_type(),
            request.api_version(),
        );
        let credentials = request.credentials();

        let response = match self
            .http
            .post(&url)
            .basic_auth(
                credentials.username(),
                Some(credentials.password().expose_secret()),
            )
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return HandshakeOutcome::unavailable(format!("request to {url} failed: {err}"));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return HandshakeOutcome::unavailable(format!(
                "{url} answered HTTP {}",
                status.as_u16()
            ));
        }

        let identity = match response.json::<PhysicalDatabaseIdentity>().await {
            Ok(identity) => identity,
            Err(err) => {
                return HandshakeOutcome::unavailable(format!(
                    "{url} returned an unreadable identity: {err}"
                ));
            }
        };

        let Ok(reported) = PhysicalDatabaseId::new(identity.id) else {
            return HandshakeOutcome::unavailable(format!(
                "{url} returned an empty physical database id"
            ));
        };

        if &reported == request.expected_id() {
            tracing::debug!(
                address = %request.address(),
                physical_database_id = %reported,
                api_version = %request.api_version(),
                "handshake confirmed"
            );
            HandshakeOutcome::Confirmed
        } else {
            HandshakeOutcome::Conflict {
                expected: request.expected_id().clone(),
                reported,
            }
        }
    }
}
