//! Flag-aware configuration: resolves the active profile, credentials,
//! and backend clients from config file + environment + CLI overrides.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use soundcheck_api::{AuthClient, RowsClient, StorageClient, TransportConfig};
use soundcheck_config::{Config, Profile, load_config_or_default, resolve_anon_key};
use soundcheck_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The resolved connection pieces every networked command needs.
pub struct Clients {
    pub rows: RowsClient,
    pub storage: StorageClient,
    pub auth: AuthClient,
    /// The persisted session, if one exists and hasn't expired.
    pub session: Option<Session>,
    /// The profile the clients were built from.
    pub profile: Option<Profile>,
    pub profile_name: String,
}

/// Pick the active profile name: flag > config default > "default".
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build backend clients from config + CLI overrides.
///
/// When a persisted admin session exists, its access token rides as the
/// bearer on rows/storage requests so writes act as the signed-in admin;
/// otherwise the publishable key alone is used (reads only, in practice).
pub fn build_clients(global: &GlobalOpts) -> Result<Clients, CliError> {
    let config = load_config_or_default();
    let profile_name = active_profile_name(global, &config);
    let profile = config.profiles.get(&profile_name).cloned();

    let backend = match (&global.backend, &profile) {
        (Some(flag), _) => flag.clone(),
        (None, Some(p)) => p.backend.clone(),
        (None, None) => {
            let available = config.profiles.keys().cloned().collect::<Vec<_>>().join(", ");
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() { "(none)".into() } else { available },
                path: soundcheck_config::config_path().display().to_string(),
            });
        }
    };

    let backend_url: Url = backend.parse().map_err(|_| CliError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL: {backend}"),
    })?;

    let anon_key = resolve_key(global, profile.as_ref(), &profile_name)?;
    let timeout = profile
        .as_ref()
        .and_then(|p| p.timeout)
        .unwrap_or(global.timeout);
    let transport = TransportConfig::with_timeout(Duration::from_secs(timeout));

    let session = soundcheck_config::load_session().ok().filter(|s| !s.is_expired());

    let (rows, storage) = match &session {
        Some(session) => {
            // Publishable key identifies the app; the session token
            // carries the admin's authority.
            let headers = session_headers(&anon_key, &session.access_token)?;
            let http = transport.build_client_with_headers(headers)?;
            (
                RowsClient::with_client(http.clone(), backend_url.clone()),
                StorageClient::with_client(http, backend_url.clone()),
            )
        }
        None => (
            RowsClient::new(backend_url.as_str(), &anon_key, &transport)?,
            StorageClient::new(backend_url.as_str(), &anon_key, &transport)?,
        ),
    };
    let auth = AuthClient::new(backend_url.as_str(), &anon_key, &transport)?;

    Ok(Clients {
        rows,
        storage,
        auth,
        session,
        profile,
        profile_name,
    })
}

fn resolve_key(
    global: &GlobalOpts,
    profile: Option<&Profile>,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    if let Some(flag) = &global.anon_key {
        return Ok(SecretString::from(flag.clone()));
    }
    let Some(profile) = profile else {
        return Err(CliError::NoCredentials {
            profile: profile_name.to_owned(),
        });
    };
    Ok(resolve_anon_key(profile, profile_name)?)
}

fn session_headers(
    anon_key: &SecretString,
    access_token: &SecretString,
) -> Result<HeaderMap, CliError> {
    let mut headers = HeaderMap::new();

    let mut key = HeaderValue::from_str(anon_key.expose_secret()).map_err(invalid_header)?;
    key.set_sensitive(true);
    headers.insert("apikey", key);

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", access_token.expose_secret()))
        .map_err(invalid_header)?;
    bearer.set_sensitive(true);
    headers.insert(reqwest::header::AUTHORIZATION, bearer);

    Ok(headers)
}

fn invalid_header(e: reqwest::header::InvalidHeaderValue) -> CliError {
    CliError::Validation {
        field: "credentials".into(),
        reason: e.to_string(),
    }
}
