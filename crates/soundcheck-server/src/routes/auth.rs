//! Auth routes and the bearer middleware.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use soundcheck_api::SignUpOutcome;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Extract the bearer token from an Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<SecretString> {
    let raw = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ")?;
    Some(SecretString::from(token.to_owned()))
}

/// Middleware guarding mutating verbs: introspects the bearer token
/// against the auth provider and stashes the user in extensions.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(req.headers()) else {
        return Err(ApiError::unauthorized("Authorization token required"));
    };

    match state.auth.get_user(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            req.extensions_mut().insert(BearerToken(token));
            Ok(next.run(req).await)
        }
        Err(e) => {
            debug!(error = %e, "bearer token rejected");
            Err(ApiError::unauthorized("Unauthorized"))
        }
    }
}

/// The validated token, re-used by signout.
#[derive(Clone)]
pub struct BearerToken(pub SecretString);

/// `POST /api/v1/auth/signup`
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<Value>, ApiError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Email and password required"));
    }

    let password = SecretString::from(body.password);
    let outcome = state
        .auth
        .sign_up(&body.email, &password, body.name.as_deref())
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok(match outcome {
        SignUpOutcome::Active(session) => Json(json!({
            "success": true,
            "user": session.user,
        })),
        SignUpOutcome::ConfirmationRequired { user } => Json(json!({
            "success": true,
            "user": user,
            "message": "Please check your email to confirm your account before signing in.",
        })),
    })
}

/// `POST /api/v1/auth/signin`
pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<Value>, ApiError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Email and password required"));
    }

    let password = SecretString::from(body.password);
    let session = state
        .auth
        .sign_in_with_password(&body.email, &password)
        .await
        .map_err(|_| ApiError::unauthorized("Invalid login credentials"))?;

    Ok(Json(json!({
        "success": true,
        "access_token": session.access_token.expose_secret(),
        "user": session.user,
    })))
}

/// `GET /api/v1/auth/session` — always 200; the body says whether the
/// presented token (if any) maps to a live session.
pub async fn session(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<Value> {
    let Some(token) = bearer_token(&headers) else {
        return Json(json!({ "authenticated": false }));
    };

    match state.auth.get_user(&token).await {
        Ok(user) => Json(json!({ "authenticated": true, "user": user })),
        Err(_) => Json(json!({ "authenticated": false })),
    }
}

/// `POST /api/v1/auth/signout` (bearer-gated)
pub async fn signout(
    State(state): State<Arc<AppState>>,
    axum::Extension(BearerToken(token)): axum::Extension<BearerToken>,
) -> Result<Json<Value>, ApiError> {
    state.auth.sign_out(&token).await?;
    Ok(Json(json!({ "success": true })))
}
