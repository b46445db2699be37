//! Error envelope shared by every route.
//!
//! All failures surface as `{ "error": "…" }` with an appropriate
//! status code, matching what the site's fetch layer expects.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use soundcheck_core::CoreError;

/// A route failure carrying its HTTP status and public message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<soundcheck_api::Error> for ApiError {
    fn from(err: soundcheck_api::Error) -> Self {
        match &err {
            soundcheck_api::Error::Authentication { .. }
            | soundcheck_api::Error::SessionExpired => Self::unauthorized("Unauthorized"),
            soundcheck_api::Error::Api { status: 404, .. } => Self::not_found(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::Validation { message } => Self::bad_request(message.clone()),
            CoreError::CollectionFull { .. } => Self::bad_request(err.to_string()),
            CoreError::NotFound { .. } => Self::not_found(err.to_string()),
            CoreError::AuthenticationFailed { .. } | CoreError::SessionExpired => {
                Self::unauthorized("Unauthorized")
            }
            _ => Self::internal(err.to_string()),
        }
    }
}
