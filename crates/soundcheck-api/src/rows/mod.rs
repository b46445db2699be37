// Rows surface HTTP client
//
// Wraps `reqwest::Client` with relation-scoped URL construction and
// structured-error parsing for the backend's REST rows surface. All
// relation modules (photos, mixes, etc.) are implemented as inherent
// methods via separate files to keep this module focused on transport
// mechanics.

pub mod contact;
pub mod mixes;
pub mod models;
pub mod photos;
pub mod testimonials;
pub mod venues;
pub mod video;

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{TransportConfig, api_key_headers};

/// Error body shape returned by the rows surface on non-2xx responses.
#[derive(serde::Deserialize)]
struct RowsErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Async client for the backend's REST rows surface.
///
/// Relations live under `{base}/rest/v1/{relation}`; filters and
/// ordering are expressed as query parameters. Mutating requests ask
/// for the written representation back so callers always see
/// server-assigned fields (ids, timestamps).
pub struct RowsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RowsClient {
    /// Build from a backend base URL and API key.
    ///
    /// The key is injected as the `apikey` default header with a
    /// matching bearer token on every request.
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

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a relation URL: `{base}/rest/v1/{relation}`
    pub(crate) fn relation_url(&self, relation: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/rest/v1/{relation}");
        Url::parse(&full).expect("invalid relation URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request with query filters and parse the row array.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        relation: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let url = self.relation_url(relation);
        debug!("GET {url} query={query:?}");

        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_rows(resp).await
    }

    /// Insert a row, returning the written representation.
    pub(crate) async fn insert<T: DeserializeOwned>(
        &self,
        relation: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.relation_url(relation);
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_single(resp).await
    }

    /// Patch rows matching the query, returning the written representation.
    pub(crate) async fn update<T: DeserializeOwned>(
        &self,
        relation: &str,
        query: &[(&str, &str)],
        body: &(impl Serialize + Sync),
    ) -> Result<Vec<T>, Error> {
        let url = self.relation_url(relation);
        debug!("PATCH {url} query={query:?}");

        let resp = self
            .http
            .patch(url)
            .query(query)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_rows(resp).await
    }

    /// Delete rows matching the query.
    pub(crate) async fn delete(&self, relation: &str, query: &[(&str, &str)]) -> Result<(), Error> {
        let url = self.relation_url(relation);
        debug!("DELETE {url} query={query:?}");

        let resp = self
            .http
            .delete(url)
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.check_status(resp).await.map(|_| ())
    }

    // ── Response parsing ─────────────────────────────────────────────

    /// Parse a row-array response body, mapping error bodies to `Error::Api`.
    async fn parse_rows<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<Vec<T>, Error> {
        let body = self.check_status(resp).await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Parse a response expected to contain exactly one written row.
    ///
    /// The rows surface returns representations as arrays even for
    /// single-row writes; an empty array here means the write was
    /// filtered away and is reported as an API error.
    async fn parse_single<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let mut rows: Vec<T> = self.parse_rows(resp).await?;
        if rows.is_empty() {
            return Err(Error::Api {
                message: "write returned no representation".into(),
                code: None,
                status: 200,
            });
        }
        Ok(rows.swap_remove(0))
    }

    /// Check HTTP status, returning the body text on success or a
    /// structured error otherwise.
    async fn check_status(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let parsed: Option<RowsErrorBody> = serde_json::from_str(&body).ok();
            let (message, code) = match parsed {
                Some(err) => {
                    let mut message = err.message.unwrap_or_else(|| format!("HTTP {status}"));
                    if let Some(hint) = err.hint {
                        message = format!("{message} ({hint})");
                    }
                    (message, err.code)
                }
                None => (format!("HTTP {status}: {}", &body[..body.len().min(200)]), None),
            };
            return Err(Error::Api {
                message,
                code,
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(Error::Transport)
    }
}
