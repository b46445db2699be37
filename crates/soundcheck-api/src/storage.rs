// Object storage HTTP client
//
// Uploads live under `{base}/storage/v1/object/{bucket}/{key}`; public
// reads go through `.../object/public/...`, and the image CDN rewrites
// `/object/` to `/render/image/` for on-the-fly resizing.

use secrecy::SecretString;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{TransportConfig, api_key_headers};

/// Async client for the backend's object storage surface.
pub struct StorageClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Error body shape returned by the storage surface.
#[derive(serde::Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "error")]
    error_kind: Option<String>,
}

impl StorageClient {
    /// Build from a backend base URL and API key.
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

    fn object_url(&self, bucket: &str, key: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/storage/v1/object/{bucket}/{key}");
        Url::parse(&full).expect("invalid object URL")
    }

    fn bucket_url(&self, bucket: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/storage/v1/object/{bucket}");
        Url::parse(&full).expect("invalid bucket URL")
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Upload an object. Duplicate keys are rejected (no upsert) so a
    /// retried upload can never silently overwrite another admin's file.
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), Error> {
        let url = self.object_url(bucket, key);
        debug!(%url, content_type, size = bytes.len(), "uploading object");

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await
    }

    /// Remove objects by key. Best-effort batch delete; the caller
    /// decides whether a failure is fatal.
    pub async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), Error> {
        let url = self.bucket_url(bucket);
        debug!(%url, count = keys.len(), "removing objects");

        let resp = self
            .http
            .delete(url)
            .json(&serde_json::json!({ "prefixes": keys }))
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await
    }

    /// The public URL for an object (no request is made).
    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/storage/v1/object/public/{bucket}/{key}")
    }

    async fn check_status(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<StorageErrorBody>(&body)
            .ok()
            .and_then(|e| e.message.or(e.error_kind))
            .unwrap_or_else(|| format!("HTTP {status}: {}", &body[..body.len().min(200)]));
        Err(Error::Storage {
            message,
            status: status.as_u16(),
        })
    }
}

// ── Public-URL helpers (no client required) ─────────────────────────

/// Rewrite a public object URL to the on-the-fly image render endpoint
/// with the given width and quality, always requesting WebP.
pub fn render_url(public_url: &str, width: u32, quality: u8) -> String {
    let base = public_url.replace("/object/", "/render/image/");
    format!("{base}?width={width}&quality={quality}&format=webp")
}

/// Build a `srcset` attribute value over ascending width breakpoints.
pub fn srcset(public_url: &str, widths: &[u32], quality: u8) -> String {
    let mut sorted: Vec<u32> = widths.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(|w| format!("{} {w}w", render_url(public_url, *w, quality)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extract the trailing object key from a public URL, dropping any
/// query string. Used to locate the stored object behind a photo row
/// when deleting it.
pub fn object_key_from_url(url: &str) -> Option<String> {
    let path = url.split('?').next()?;
    let key = path.rsplit('/').next()?;
    if key.is_empty() {
        None
    } else {
        Some(key.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn render_url_rewrites_object_path() {
        let public = "https://backend.example.com/storage/v1/object/public/photos/a.jpg";
        let rendered = render_url(public, 1024, 75);
        assert_eq!(
            rendered,
            "https://backend.example.com/storage/v1/render/image/public/photos/a.jpg?width=1024&quality=75&format=webp"
        );
    }

    #[test]
    fn srcset_sorts_breakpoints_ascending() {
        let public = "https://backend.example.com/storage/v1/object/public/photos/a.jpg";
        let set = srcset(public, &[1024, 480], 75);
        let first = set.split(", ").next().unwrap();
        assert!(first.ends_with("480w"));
        assert!(set.ends_with("1024w"));
    }

    #[test]
    fn object_key_from_url_strips_query() {
        let url = "https://backend.example.com/storage/v1/object/public/photos/abc-dawn.jpg?token=x";
        assert_eq!(object_key_from_url(url).unwrap(), "abc-dawn.jpg");
    }

    #[test]
    fn object_key_from_url_rejects_bare_host() {
        assert!(object_key_from_url("https://backend.example.com/").is_none());
    }
}
