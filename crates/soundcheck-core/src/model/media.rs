// Media entities: gallery photos, embedded mixes, the featured video.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{ALLOWED_IMAGE_TYPES, MAX_UPLOAD_BYTES};
use crate::error::CoreError;
use crate::model::EntityId;

// ── Photo ───────────────────────────────────────────────────────────

/// A gallery photo. `display_order` defines the render sequence and is
/// kept contiguous (0..n-1) by the reorder engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: EntityId,
    pub url: String,
    pub alt: String,
    pub display_order: i64,
}

/// A pending photo upload: raw bytes plus the metadata the gallery
/// needs. Validated client-side before any network traffic.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub alt: String,
}

impl PhotoUpload {
    /// Validate type, size, and alt text. Runs before upload; a failure
    /// here means no storage or database call is ever attempted.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_image_file(&self.content_type, self.bytes.len())?;
        if self.alt.trim().is_empty() {
            return Err(CoreError::validation("Alt text is required."));
        }
        Ok(())
    }
}

/// Shared image-file checks: content type against the allow-list and
/// size against the upload ceiling.
pub fn validate_image_file(content_type: &str, len: usize) -> Result<(), CoreError> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(CoreError::validation(
            "Invalid file type. Only JPEG, PNG, and WebP are allowed.",
        ));
    }
    if len > MAX_UPLOAD_BYTES {
        return Err(CoreError::validation("File too large. Maximum size is 5MB."));
    }
    Ok(())
}

/// Map an image file extension to its upload content type.
pub fn image_content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

// ── Mix ─────────────────────────────────────────────────────────────

/// Streaming platform a mix is embedded from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Spotify,
    Mixcloud,
}

/// An embedded DJ mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mix {
    pub id: EntityId,
    pub title: String,
    pub embed_url: String,
    pub platform: Platform,
    #[serde(default)]
    pub description: Option<String>,
}

/// Draft for a new mix.
#[derive(Debug, Clone)]
pub struct NewMix {
    pub title: String,
    pub embed_url: String,
    pub platform: Platform,
    pub description: Option<String>,
}

impl NewMix {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("Mix title is required."));
        }
        if self.embed_url.trim().is_empty() {
            return Err(CoreError::validation("Mix embed URL is required."));
        }
        Ok(())
    }
}

// ── Featured video ──────────────────────────────────────────────────

/// The singleton featured video shown in the media section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedVideo {
    pub url: String,
    pub poster_image: String,
    pub title: String,
    pub description: String,
}

impl Default for FeaturedVideo {
    /// The stock highlight reel shown until an admin sets a video.
    fn default() -> Self {
        Self {
            url: "https://www.youtube.com/watch?v=SapL-tOrNF8".into(),
            poster_image: "/assets/highlight-reel-poster.png".into(),
            title: "Highlight Reel".into(),
            description: "See the magic in action".into(),
        }
    }
}
