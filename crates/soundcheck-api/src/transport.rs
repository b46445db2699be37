// Shared transport configuration for building reqwest::Client instances.
//
// The rows, storage, and auth clients share timeout and default-header
// settings through this module, avoiding duplicated builder logic.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("soundcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Transport)
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used by the rows and storage clients to inject the publishable
    /// API key on every request.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("soundcheck/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}

/// Default headers carrying the backend API key (`apikey` plus a
/// matching bearer token, the backend's service convention).
pub(crate) fn api_key_headers(api_key: &SecretString) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    let mut key_value =
        HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::Authentication {
            message: format!("invalid API key header value: {e}"),
        })?;
    key_value.set_sensitive(true);
    headers.insert("apikey", key_value);

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
        .map_err(|e| Error::Authentication {
            message: format!("invalid API key header value: {e}"),
        })?;
    bearer.set_sensitive(true);
    headers.insert(reqwest::header::AUTHORIZATION, bearer);

    Ok(headers)
}
