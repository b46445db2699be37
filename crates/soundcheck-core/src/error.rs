// ── Core error types ──
//
// User-facing errors from soundcheck-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<soundcheck_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation errors (reported before any network call) ────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Cannot add another {kind}: limit of {cap} reached")]
    CollectionFull { kind: &'static str, cap: usize },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("No delete is pending confirmation")]
    NoPendingDelete,

    // ── Auth errors ──────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- sign in again")]
    SessionExpired,

    // ── Remote errors (wrapped, not exposed raw) ─────────────────────
    #[error("Backend error: {message}")]
    Backend {
        message: String,
        /// The backend-specific error code (e.g. "23505").
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Fallback cache error: {message}")]
    Cache { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<soundcheck_api::Error> for CoreError {
    fn from(err: soundcheck_api::Error) -> Self {
        match err {
            soundcheck_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            soundcheck_api::Error::SessionExpired => CoreError::SessionExpired,
            soundcheck_api::Error::Transport(e) => CoreError::Backend {
                message: e.to_string(),
                code: None,
                status: e.status().map(|s| s.as_u16()),
            },
            soundcheck_api::Error::InvalidUrl(e) => CoreError::Internal(format!("invalid URL: {e}")),
            soundcheck_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Backend {
                message,
                code,
                status: Some(status),
            },
            soundcheck_api::Error::Storage { message, status: _ } => {
                CoreError::Storage { message }
            }
            soundcheck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
