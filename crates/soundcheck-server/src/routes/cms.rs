//! CMS routes: per-entity CRUD against the content backend.
//!
//! List verbs are public (the site renderer reads without a session);
//! mutating verbs sit behind the bearer middleware. Validation reuses
//! the core rules so this surface rejects exactly what the editor
//! rejects — except the collection caps, which stay client-side only.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;
use uuid::Uuid;

use soundcheck_api::rows::models::{
    FeaturedVideoPatch, NewFeaturedVideoRow, NewPhotoRow,
};
use soundcheck_api::storage::object_key_from_url;
use soundcheck_core::model::{NewMix, NewTestimonial, NewVenue, PhotoUpload, Rating};
use soundcheck_core::{EntityId, convert};

use crate::error::ApiError;
use crate::state::AppState;

const PHOTO_BUCKET: &str = "photos";

fn serial(id: &str) -> Result<i64, ApiError> {
    let parsed: EntityId = id.parse().unwrap_or(EntityId::Serial(i64::MIN));
    parsed
        .as_serial()
        .filter(|n| *n != i64::MIN)
        .ok_or_else(|| ApiError::bad_request(format!("invalid id: {id}")))
}

// ── Featured video ──────────────────────────────────────────────────

/// `GET /api/v1/cms/video`
pub async fn get_video(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let row = state.rows.active_video().await?;
    let video = row.map(|r| {
        json!({
            "url": r.url,
            "posterImage": r.poster_image.unwrap_or_default(),
        })
    });
    Ok(Json(json!({ "video": video })))
}

#[derive(Deserialize)]
pub struct VideoBody {
    pub url: String,
    #[serde(default, rename = "posterImage")]
    pub poster_image: Option<String>,
}

/// `PUT /api/v1/cms/video` — upsert the singleton active row.
pub async fn update_video(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VideoBody>,
) -> Result<Json<Value>, ApiError> {
    if body.url.trim().is_empty() {
        return Err(ApiError::bad_request("Video URL is required"));
    }

    let existing = state.rows.active_video().await?;
    let row = match existing {
        Some(row) => state
            .rows
            .update_video(
                row.id,
                &FeaturedVideoPatch {
                    url: body.url,
                    poster_image: body.poster_image,
                },
            )
            .await?
            .ok_or_else(|| ApiError::not_found("featured video vanished mid-update"))?,
        None => {
            state
                .rows
                .insert_video(&NewFeaturedVideoRow {
                    url: body.url,
                    poster_image: body.poster_image,
                    is_active: true,
                })
                .await?
        }
    };

    Ok(Json(json!({
        "success": true,
        "video": { "url": row.url, "posterImage": row.poster_image.unwrap_or_default() },
    })))
}

// ── Photos ──────────────────────────────────────────────────────────

/// `GET /api/v1/cms/photos`
pub async fn list_photos(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let photos = convert::photos_from_rows(state.rows.list_photos().await?);
    Ok(Json(json!({ "photos": photos })))
}

/// `POST /api/v1/cms/photos` — multipart upload (`file` + `alt`).
pub async fn add_photo(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut alt = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_owned();
                let content_type = field.content_type().unwrap_or("").to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("unreadable file field: {e}")))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("alt") => {
                alt = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("unreadable alt field: {e}")))?;
            }
            _ => {}
        }
    }

    let Some((file_name, content_type, bytes)) = file else {
        return Err(ApiError::bad_request("No file provided"));
    };

    let upload = PhotoUpload {
        file_name,
        bytes,
        content_type,
        alt: if alt.is_empty() { "Gallery photo".into() } else { alt },
    };
    upload.validate()?;

    let key = format!("{}-{}", Uuid::new_v4(), upload.file_name);
    state
        .storage
        .upload(PHOTO_BUCKET, &key, upload.bytes, &upload.content_type)
        .await?;
    let url = state.storage.public_url(PHOTO_BUCKET, &key);

    let max = match state.rows.max_photo_order().await {
        Ok(max) => max,
        Err(e) => {
            remove_orphan(&state, &key).await;
            return Err(e.into());
        }
    };
    let inserted = match state
        .rows
        .insert_photo(&NewPhotoRow {
            url,
            alt: upload.alt,
            display_order: max.unwrap_or(-1) + 1,
        })
        .await
    {
        Ok(row) => row,
        Err(e) => {
            remove_orphan(&state, &key).await;
            return Err(e.into());
        }
    };

    Ok(Json(json!({
        "success": true,
        "photo": convert::photo_from_row(inserted),
    })))
}

async fn remove_orphan(state: &AppState, key: &str) {
    if let Err(e) = state.storage.remove(PHOTO_BUCKET, &[key.to_owned()]).await {
        warn!(key, error = %e, "failed to remove orphaned upload");
    }
}

#[derive(Deserialize)]
pub struct ReorderBody {
    pub photos: Vec<ReorderEntry>,
}

#[derive(Deserialize)]
pub struct ReorderEntry {
    pub id: String,
}

/// `PUT /api/v1/cms/photos` — persist a new gallery order. The body
/// lists photo ids in their new visual order; each receives a fresh
/// contiguous display order.
pub async fn reorder_photos(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReorderBody>,
) -> Result<Json<Value>, ApiError> {
    for (position, entry) in (0_i64..).zip(body.photos.iter()) {
        let id = serial(&entry.id)?;
        state.rows.set_photo_order(id, position).await?;
    }
    Ok(Json(json!({ "success": true })))
}

/// `DELETE /api/v1/cms/photos/:id`
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = serial(&id)?;
    let Some(photo) = state.rows.get_photo(id).await? else {
        return Err(ApiError::not_found("Photo not found"));
    };

    // Storage first, best-effort; the row delete proceeds regardless.
    if let Some(key) = object_key_from_url(&photo.url) {
        if let Err(e) = state.storage.remove(PHOTO_BUCKET, &[key]).await {
            warn!(id, error = %e, "storage delete failed; removing row anyway");
        }
    }

    state.rows.delete_photo(id).await?;
    Ok(Json(json!({ "success": true })))
}

// ── Mixes ───────────────────────────────────────────────────────────

/// `GET /api/v1/cms/mixes`
pub async fn list_mixes(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let mixes = convert::mixes_from_rows(state.rows.list_mixes().await?);
    Ok(Json(json!({ "mixes": mixes })))
}

#[derive(Deserialize)]
pub struct MixBody {
    pub title: String,
    #[serde(rename = "embedUrl")]
    pub embed_url: String,
    pub platform: soundcheck_core::Platform,
    #[serde(default)]
    pub description: Option<String>,
}

/// `POST /api/v1/cms/mixes`
pub async fn add_mix(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MixBody>,
) -> Result<Json<Value>, ApiError> {
    let draft = NewMix {
        title: body.title,
        embed_url: body.embed_url,
        platform: body.platform,
        description: body.description,
    };
    draft.validate()?;

    let inserted = state.rows.insert_mix(&convert::mix_to_new_row(&draft)).await?;
    Ok(Json(json!({ "success": true, "mix": convert::mix_from_row(inserted) })))
}

/// `DELETE /api/v1/cms/mixes/:id`
pub async fn delete_mix(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.rows.delete_mix(serial(&id)?).await?;
    Ok(Json(json!({ "success": true })))
}

// ── Testimonials ────────────────────────────────────────────────────

/// `GET /api/v1/cms/testimonials`
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let testimonials = convert::testimonials_from_rows(state.rows.list_testimonials().await?);
    Ok(Json(json!({ "testimonials": testimonials })))
}

#[derive(Deserialize)]
pub struct TestimonialBody {
    pub name: String,
    pub event: String,
    pub text: String,
    pub rating: u8,
    #[serde(default)]
    pub image: Option<String>,
}

impl TestimonialBody {
    fn into_draft(self) -> Result<NewTestimonial, ApiError> {
        Ok(NewTestimonial {
            name: self.name,
            event: self.event,
            text: self.text,
            rating: Rating::new(self.rating)?,
            image: self.image,
        })
    }
}

/// `POST /api/v1/cms/testimonials`
pub async fn add_testimonial(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TestimonialBody>,
) -> Result<Json<Value>, ApiError> {
    let draft = body.into_draft()?;
    draft.validate()?;

    let inserted = state
        .rows
        .insert_testimonial(&convert::testimonial_to_new_row(&draft))
        .await?;
    Ok(Json(json!({
        "success": true,
        "testimonial": convert::testimonial_from_row(inserted),
    })))
}

/// `PUT /api/v1/cms/testimonials/:id`
pub async fn update_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<TestimonialBody>,
) -> Result<Json<Value>, ApiError> {
    let draft = body.into_draft()?;
    draft.validate()?;

    let updated = state
        .rows
        .update_testimonial(serial(&id)?, &convert::testimonial_to_patch(&draft))
        .await?
        .ok_or_else(|| ApiError::not_found("Testimonial not found"))?;
    Ok(Json(json!({
        "success": true,
        "testimonial": convert::testimonial_from_row(updated),
    })))
}

/// `DELETE /api/v1/cms/testimonials/:id`
pub async fn delete_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.rows.delete_testimonial(serial(&id)?).await?;
    Ok(Json(json!({ "success": true })))
}

// ── Venues ──────────────────────────────────────────────────────────

/// `GET /api/v1/cms/venues`
pub async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let venues = convert::venues_from_rows(state.rows.list_venues().await?);
    Ok(Json(json!({ "venues": venues })))
}

#[derive(Deserialize)]
pub struct VenueBody {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// `POST /api/v1/cms/venues`
pub async fn add_venue(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VenueBody>,
) -> Result<Json<Value>, ApiError> {
    let draft = NewVenue {
        name: body.name,
        logo: body.logo,
    };
    draft.validate()?;

    let inserted = state.rows.insert_venue(&convert::venue_to_new_row(&draft)).await?;
    Ok(Json(json!({ "success": true, "venue": convert::venue_from_row(inserted) })))
}

/// `PUT /api/v1/cms/venues/:id`
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<VenueBody>,
) -> Result<Json<Value>, ApiError> {
    let draft = NewVenue {
        name: body.name,
        logo: body.logo,
    };
    draft.validate()?;

    let updated = state
        .rows
        .update_venue(serial(&id)?, &convert::venue_to_patch(&draft))
        .await?
        .ok_or_else(|| ApiError::not_found("Venue not found"))?;
    Ok(Json(json!({ "success": true, "venue": convert::venue_from_row(updated) })))
}

/// `DELETE /api/v1/cms/venues/:id`
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.rows.delete_venue(serial(&id)?).await?;
    Ok(Json(json!({ "success": true })))
}
