//! `reqwest` implementation of the adapter client port.

use super::paths::{api_version_url, force_registration_url, supports_url};
use crate::adapter::{
    domain::{
        AdapterAddress, AdapterApiVersion, ApiVersionTag, CapabilityFlags, Credentials,
        DatabaseType,
    },
    ports::{AdapterClient, AdapterClientError, AdapterClientFactory, AdapterClientResult},
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// HTTP client bound to one adapter address.
#[derive(Debug, Clone)]
pub struct HttpAdapterClient {
    address: AdapterAddress,
    credentials: Credentials,
    http: reqwest::Client,
}

impl HttpAdapterClient {
    /// Creates a client sharing an existing `reqwest` connection pool.
    #[must_use]
    pub const fn new(
        address: AdapterAddress,
        credentials: Credentials,
        http: reqwest::Client,
    ) -> Self {
        Self {
            address,
            credentials,
            http,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> AdapterClientResult<Response> {
        let response = request
            .basic_auth(
                self.credentials.username(),
                Some(self.credentials.password().expose_secret()),
            )
            .send()
            .await
            .map_err(AdapterClientError::transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AdapterClientError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(AdapterClientError::UnexpectedStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl AdapterClient for HttpAdapterClient {
    fn address(&self) -> &AdapterAddress {
        &self.address
    }

    async fn api_version(&self) -> AdapterClientResult<AdapterApiVersion> {
        let url = api_version_url(&self.address);
        let response = self.send(self.http.get(&url), &url).await?;
        response
            .json::<AdapterApiVersion>()
            .await
            .map_err(AdapterClientError::decode)
    }

    async fn supports(
        &self,
        database_type: &DatabaseType,
        api_version: &ApiVersionTag,
    ) -> AdapterClientResult<CapabilityFlags> {
        let url = supports_url(&self.address, database_type, api_version);
        let response = self.send(self.http.get(&url), &url).await?;
        response
            .json::<CapabilityFlags>()
            .await
            .map_err(AdapterClientError::decode)
    }

    async fn force_registration(&self) -> AdapterClientResult<()> {
        let url = force_registration_url(&self.address);
        self.send(self.http.post(&url), &url).await?;
        tracing::debug!(address = %self.address, "adapter accepted forced registration");
        Ok(())
    }
}

/// Factory producing [`HttpAdapterClient`]s over one shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpAdapterClientFactory {
    http: reqwest::Client,
}

impl HttpAdapterClientFactory {
    /// Creates a factory with the transport's default settings.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterClientError::Configuration`] when the HTTP client
    /// cannot be initialised.
    pub fn new() -> AdapterClientResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| AdapterClientError::Configuration(err.to_string()))?;
        Ok(Self { http })
    }

    /// Creates a factory around an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl AdapterClientFactory for HttpAdapterClientFactory {
    fn new_client(
        &self,
        address: &AdapterAddress,
        credentials: &Credentials,
    ) -> AdapterClientResult<Arc<dyn AdapterClient>> {
        Ok(Arc::new(HttpAdapterClient::new(
            address.clone(),
            credentials.clone(),
            self.http.clone(),
        )))
    }
}
