//! Shared configuration for the soundcheck CLI and server.
//!
//! TOML profiles, credential resolution (keyring + env + plaintext),
//! and persisted CLI sessions. Both binaries depend on this crate --
//! the CLI adds flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use soundcheck_core::{AuthUser, Session};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no backend API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("no saved session -- run `soundcheck auth login` first")]
    NoSession,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is unreadable: {0}")]
    SessionFile(#[from] serde_json::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by the CLI and server.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g. "https://abcd1234.backend.example.com").
    pub backend: String,

    /// Publishable ("anon") API key (plaintext -- prefer keyring or env var).
    pub anon_key: Option<String>,

    /// Environment variable name containing the publishable API key.
    pub anon_key_env: Option<String>,

    /// Environment variable name containing the privileged service key
    /// (server-side only; never stored in plaintext).
    pub service_key_env: Option<String>,

    /// Canonical base URL of the published site (canonical-link rewrites).
    pub site_url: Option<String>,

    /// Notification email settings for the contact intake.
    #[serde(default)]
    pub email: EmailConfig,

    /// Override request timeout in seconds.
    pub timeout: Option<u64>,
}

/// Transactional-email settings used by the notify function.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Environment variable name containing the email provider API key.
    pub api_key_env: Option<String>,

    /// From address (e.g. `Site Notifications <notify@example.com>`).
    pub from: Option<String>,

    /// Destination inbox for contact notifications.
    pub to: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "makana", "soundcheck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Path of the persisted CLI session, next to the config file.
pub fn session_path() -> PathBuf {
    let mut p = config_path();
    p.set_file_name("session.json");
    p
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("soundcheck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("SOUNDCHECK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the publishable API key from the credential chain.
pub fn resolve_anon_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's anon_key_env → env var lookup
    if let Some(ref env_name) = profile.anon_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("soundcheck", &format!("{profile_name}/anon-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.anon_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve the privileged service key (env var or keyring only; a
/// service key in plaintext config is deliberately unsupported).
pub fn resolve_service_key(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    let env_name = profile
        .service_key_env
        .as_deref()
        .unwrap_or("SOUNDCHECK_SERVICE_KEY");
    if let Ok(val) = std::env::var(env_name) {
        return Ok(SecretString::from(val));
    }

    if let Ok(entry) = keyring::Entry::new("soundcheck", &format!("{profile_name}/service-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Persisted sessions ──────────────────────────────────────────────

/// Disk form of a CLI session. Lives at `session_path()` with owner-only
/// permissions left to the platform umask.
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl SavedSession {
    pub fn from_session(session: &Session) -> Self {
        Self {
            access_token: session.access_token.expose_secret().to_owned(),
            refresh_token: session.refresh_token.expose_secret().to_owned(),
            expires_at: session.expires_at,
            user: session.user.clone(),
        }
    }

    pub fn into_session(self) -> Session {
        Session {
            access_token: SecretString::from(self.access_token),
            refresh_token: SecretString::from(self.refresh_token),
            expires_at: self.expires_at,
            user: self.user,
        }
    }
}

/// Persist a session for subsequent CLI invocations.
pub fn save_session(session: &Session) -> Result<(), ConfigError> {
    save_session_at(&session_path(), session)
}

pub fn save_session_at(path: &PathBuf, session: &Session) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let saved = SavedSession::from_session(session);
    std::fs::write(path, serde_json::to_string_pretty(&saved)?)?;
    Ok(())
}

/// Load the persisted session, if any.
pub fn load_session() -> Result<Session, ConfigError> {
    load_session_at(&session_path())
}

pub fn load_session_at(path: &PathBuf) -> Result<Session, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::NoSession)?;
    let saved: SavedSession = serde_json::from_str(&raw)?;
    Ok(saved.into_session())
}

/// Remove the persisted session (logout).
pub fn clear_session() -> Result<(), ConfigError> {
    let path = session_path();
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
