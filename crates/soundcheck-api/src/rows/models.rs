// Row types for the rows surface.
//
// These mirror the backend's column names exactly (snake_case, nullable
// columns as Option). `soundcheck-core` converts them into UI-shaped
// domain records; nothing outside the adapter should consume these
// directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── photos ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRow {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPhotoRow {
    pub url: String,
    pub alt: String,
    pub display_order: i64,
}

// ── mixes ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct MixRow {
    pub id: i64,
    pub title: String,
    pub embed_url: String,
    pub platform: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMixRow {
    pub title: String,
    pub embed_url: String,
    pub platform: String,
    pub description: Option<String>,
    pub display_order: i64,
}

// ── testimonials ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TestimonialRow {
    pub id: i64,
    pub name: String,
    pub event: String,
    pub text: String,
    pub rating: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTestimonialRow {
    pub name: String,
    pub event: String,
    pub text: String,
    pub rating: i64,
    pub image_url: Option<String>,
    pub display_order: i64,
}

/// Column subset written by testimonial edits (order is untouched).
#[derive(Debug, Clone, Serialize)]
pub struct TestimonialPatch {
    pub name: String,
    pub event: String,
    pub text: String,
    pub rating: i64,
    pub image_url: Option<String>,
}

// ── venues ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct VenueRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewVenueRow {
    pub name: String,
    pub logo_url: Option<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenuePatch {
    pub name: String,
    pub logo_url: Option<String>,
}

// ── featured_videos ─────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedVideoRow {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub poster_image: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFeaturedVideoRow {
    pub url: String,
    pub poster_image: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedVideoPatch {
    pub url: String,
    pub poster_image: Option<String>,
}

// ── contact_submissions ─────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub event_type: String,
    #[serde(default)]
    pub event_date: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContactRow {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: String,
    pub event_date: Option<String>,
    pub message: String,
}
