//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use soundcheck_core::CoreError;

/// Exit codes per the CLI conventions.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the content backend")]
    #[diagnostic(
        code(soundcheck::connection_failed),
        help("Check the backend URL in your profile and your network connection.")
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(soundcheck::auth_failed),
        help("Verify the account email and password, then run: soundcheck auth login")
    )]
    AuthFailed { message: String },

    #[error("No admin session")]
    #[diagnostic(
        code(soundcheck::no_session),
        help("Sign in first: soundcheck auth login --email you@example.com")
    )]
    NoSession,

    #[error("No backend API key configured for profile '{profile}'")]
    #[diagnostic(
        code(soundcheck::no_credentials),
        help(
            "Add anon_key or anon_key_env to the profile in your config file,\n\
             or set the SOUNDCHECK_ANON_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(soundcheck::not_found),
        help("Run: soundcheck {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(soundcheck::validation))]
    Validation { field: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(soundcheck::collection_full))]
    CollectionFull { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Backend error: {message}")]
    #[diagnostic(code(soundcheck::backend))]
    Backend { message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(soundcheck::profile_not_found),
        help("Available profiles: {available}\nConfig file: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(soundcheck::config))]
    Config(String),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(soundcheck::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoSession | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::CollectionFull { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::CollectionFull { .. } => CliError::CollectionFull {
                message: err.to_string(),
            },

            CoreError::NotFound { kind, id } => CliError::NotFound {
                resource_type: kind.into(),
                identifier: id,
                list_command: format!("{kind}s list"),
            },

            CoreError::NoPendingDelete => CliError::Validation {
                field: "delete".into(),
                reason: "nothing is pending confirmation".into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::SessionExpired => CliError::NoSession,

            CoreError::Backend { message, .. } | CoreError::Storage { message } => {
                CliError::Backend { message }
            }

            CoreError::Cache { message } | CoreError::Internal(message) => {
                CliError::Backend { message }
            }
        }
    }
}

impl From<soundcheck_api::Error> for CliError {
    fn from(err: soundcheck_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

impl From<soundcheck_config::ConfigError> for CliError {
    fn from(err: soundcheck_config::ConfigError) -> Self {
        match err {
            soundcheck_config::ConfigError::NoCredentials { profile } => {
                CliError::NoCredentials { profile }
            }
            soundcheck_config::ConfigError::NoSession => CliError::NoSession,
            other => CliError::Config(other.to_string()),
        }
    }
}
