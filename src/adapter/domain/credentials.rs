//! Credentials the aggregator presents to adapters.

use super::AdapterDomainError;
use secrecy::{ExposeSecret, SecretString};

/// HTTP basic credentials for adapter calls.
///
/// The password is held as a [`SecretString`] so it is redacted from
/// `Debug` output.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Creates credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyUsername`] when the username is
    /// blank.
    pub fn new(
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, AdapterDomainError> {
        let normalized = username.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(AdapterDomainError::EmptyUsername);
        }
        Ok(Self {
            username: normalized,
            password,
        })
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password secret.
    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: SecretString::from(self.password.expose_secret().to_owned()),
        }
    }
}
