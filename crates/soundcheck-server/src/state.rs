//! Shared application state.

use secrecy::SecretString;
use url::Url;

use soundcheck_api::{AuthClient, RowsClient, StorageClient, TransportConfig};
use soundcheck_config::{ConfigError, Profile, resolve_service_key};

use crate::email::EmailSettings;

/// Shared state handed to every handler.
pub struct AppState {
    pub rows: RowsClient,
    pub storage: StorageClient,
    pub auth: AuthClient,
    /// Notification email settings; `None` disables the notify function.
    pub email: Option<EmailSettings>,
    /// Client used for outbound email dispatch.
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state from a config profile, using the privileged service
    /// key for backend access (this surface acts on behalf of admins).
    pub fn from_profile(profile: &Profile, profile_name: &str) -> Result<Self, StateError> {
        let service_key = resolve_service_key(profile, profile_name)?;
        let transport = TransportConfig::with_timeout(std::time::Duration::from_secs(
            profile.timeout.unwrap_or(30),
        ));

        let email = EmailSettings::from_config(&profile.email);

        Ok(Self {
            rows: RowsClient::new(&profile.backend, &service_key, &transport)?,
            storage: StorageClient::new(&profile.backend, &service_key, &transport)?,
            auth: AuthClient::new(&profile.backend, &service_key, &transport)?,
            email,
            http: reqwest::Client::new(),
        })
    }

    /// Build state from explicit parts (tests, embedded use).
    pub fn from_parts(
        backend: &Url,
        key: &SecretString,
        email: Option<EmailSettings>,
    ) -> Result<Self, StateError> {
        let transport = TransportConfig::default();
        Ok(Self {
            rows: RowsClient::new(backend.as_str(), key, &transport)?,
            storage: StorageClient::new(backend.as_str(), key, &transport)?,
            auth: AuthClient::new(backend.as_str(), key, &transport)?,
            email,
            http: reqwest::Client::new(),
        })
    }
}

/// Errors building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("backend client construction failed: {0}")]
    Api(#[from] soundcheck_api::Error),
}
