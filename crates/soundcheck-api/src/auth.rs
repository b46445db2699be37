// Token auth HTTP client
//
// Password-grant sign-in, sign-up, sign-out, and token introspection
// against the backend's auth surface under `{base}/auth/v1/`.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::Error;
use crate::transport::{TransportConfig, api_key_headers};

/// An authenticated admin user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A live session: bearer tokens plus the user they belong to.
///
/// Tokens are secret material; they never appear in logs or serialized
/// output. The CLI persists them through its own plain struct.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Result of a sign-up attempt. The provider may require an email
/// confirmation round-trip before issuing tokens.
#[derive(Debug)]
pub enum SignUpOutcome {
    /// The account is live and a session was issued immediately.
    Active(Session),
    /// The account exists but must be confirmed by email before sign-in.
    ConfirmationRequired { user: AuthUser },
}

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: UserBody,
}

#[derive(Deserialize)]
struct UserBody {
    id: Uuid,
    email: String,
    #[serde(default)]
    user_metadata: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: Option<UserBody>,
    // Confirmation-required responses return the bare user object.
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<serde_json::Value>,
}

/// Auth error bodies vary by endpoint; probe the known message fields.
#[derive(Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl UserBody {
    fn into_user(self) -> AuthUser {
        let name = self
            .user_metadata
            .as_ref()
            .and_then(|m| m.get("name"))
            .and_then(|v| v.as_str())
            .map(str::to_owned);
        AuthUser {
            id: self.id,
            email: self.email,
            name,
        }
    }
}

// ── Client ──────────────────────────────────────────────────────────

/// Async client for the backend's auth surface.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Build from a backend base URL and publishable API key.
    pub fn new(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let headers = api_key_headers(api_key)?;
        let http = transport.build_client_with_headers(headers)?;
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn auth_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/auth/v1/{path}")).expect("invalid auth URL")
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Register a new admin account.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
        name: Option<&str>,
    ) -> Result<SignUpOutcome, Error> {
        let url = self.auth_url("signup");
        debug!(%url, email, "signing up");

        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
            "data": { "name": name.unwrap_or("Admin") },
        });
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        let body = Self::check_auth_status(resp).await?;

        let parsed: SignUpResponse = parse_body(&body)?;
        match (parsed.access_token, parsed.refresh_token, parsed.user) {
            (Some(access_token), Some(refresh_token), Some(user)) => {
                Ok(SignUpOutcome::Active(build_session(
                    access_token,
                    refresh_token,
                    parsed.expires_in.unwrap_or(3600),
                    user,
                )))
            }
            _ => {
                // Bare-user response: the account awaits confirmation.
                let user = match (parsed.id, parsed.email) {
                    (Some(id), Some(email)) => AuthUser {
                        id,
                        email,
                        name: parsed
                            .user_metadata
                            .as_ref()
                            .and_then(|m| m.get("name"))
                            .and_then(|v| v.as_str())
                            .map(str::to_owned),
                    },
                    _ => {
                        return Err(Error::Deserialization {
                            message: "sign-up response missing user".into(),
                            body,
                        });
                    }
                };
                Ok(SignUpOutcome::ConfirmationRequired { user })
            }
        }
    }

    /// Exchange email + password for a session (password grant).
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, Error> {
        let url = self.auth_url("token");
        debug!(%url, email, "signing in");

        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });
        let resp = self
            .http
            .post(url)
            .query(&[("grant_type", "password")])
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        let body = Self::check_auth_status(resp).await?;

        let parsed: TokenResponse = parse_body(&body)?;
        Ok(build_session(
            parsed.access_token,
            parsed.refresh_token,
            parsed.expires_in,
            parsed.user,
        ))
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &SecretString) -> Result<(), Error> {
        let url = self.auth_url("logout");
        debug!(%url, "signing out");

        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_auth_status(resp).await.map(|_| ())
    }

    /// Introspect an access token, returning its user if it is valid.
    ///
    /// Invalid or expired tokens surface as `Error::SessionExpired`.
    pub async fn get_user(&self, access_token: &SecretString) -> Result<AuthUser, Error> {
        let url = self.auth_url("user");
        debug!(%url, "fetching user for token");

        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;
        let body = Self::check_auth_status(resp).await?;

        let parsed: UserBody = parse_body(&body)?;
        Ok(parsed.into_user())
    }

    async fn check_auth_status(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        if status.is_success() {
            return resp.text().await.map_err(Error::Transport);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<AuthErrorBody>(&body)
            .ok()
            .and_then(|e| e.error_description.or(e.msg).or(e.message))
            .unwrap_or_else(|| format!("HTTP {status}"));

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }
        Err(Error::Authentication { message })
    }
}

fn build_session(
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: UserBody,
) -> Session {
    Session {
        access_token: SecretString::from(access_token),
        refresh_token: SecretString::from(refresh_token),
        expires_at: Utc::now() + Duration::seconds(expires_in),
        user: user.into_user(),
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview = &body[..body.len().min(200)];
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}
