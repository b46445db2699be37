// ── Content editor ──
//
// The stateful admin editor: owns the in-memory snapshot and runs every
// mutation through the same protocol:
//
//   1. validate locally (required fields, file limits, collection caps)
//   2. issue the remote mutation
//   3. on success, re-fetch the affected collection in full and replace
//      that snapshot slice (server-assigned ids and order always win)
//   4. on failure, leave the prior slice untouched — except reorder,
//      which already applied optimistically and instead rolls back by
//      re-fetching the authoritative order
//   5. persist the snapshot to the fallback cache
//
// Deletes are two-step: `request_delete` marks, `confirm_delete`
// executes. A request alone never touches the network.

use tracing::warn;
use uuid::Uuid;

use soundcheck_api::rows::models::{NewFeaturedVideoRow, FeaturedVideoPatch, NewPhotoRow};
use soundcheck_api::{RowsClient, StorageClient, storage};

use crate::convert;
use crate::error::CoreError;
use crate::loader::load_snapshot;
use crate::model::{
    EntityId, FeaturedVideo, Mix, NewMix, NewTestimonial, NewVenue, Photo, PhotoUpload,
    Testimonial, Venue, media,
};
use crate::store::{
    ContentAction, ContentSnapshot, ContentStore, FallbackCache, MAX_PHOTOS, MAX_TESTIMONIALS,
    MAX_VENUES,
};

/// Bucket names on the storage surface.
const PHOTO_BUCKET: &str = "photos";
const TESTIMONIAL_BUCKET: &str = "testimonial-images";

/// Which collection a pending delete targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKind {
    Photo,
    Mix,
    Testimonial,
    Venue,
}

impl DeleteKind {
    fn noun(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Mix => "mix",
            Self::Testimonial => "testimonial",
            Self::Venue => "venue",
        }
    }
}

/// A delete awaiting its confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: DeleteKind,
    pub id: EntityId,
}

/// The admin content editor.
pub struct ContentEditor {
    rows: RowsClient,
    storage: StorageClient,
    store: ContentStore,
    cache: Option<FallbackCache>,
    pending_delete: Option<PendingDelete>,
}

impl ContentEditor {
    pub fn new(rows: RowsClient, storage: StorageClient) -> Self {
        Self {
            rows,
            storage,
            store: ContentStore::default(),
            cache: None,
            pending_delete: None,
        }
    }

    /// Attach a fallback cache, persisted after every successful mutation.
    pub fn with_cache(mut self, cache: FallbackCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The snapshot store, for readers and subscribers.
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn snapshot(&self) -> ContentSnapshot {
        self.store.snapshot()
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    // ── Initial load ─────────────────────────────────────────────────

    /// Populate the snapshot from the backend. If the backend yields
    /// nothing at all, fall back to the cached snapshot from the last
    /// successful session.
    pub async fn load(&self) {
        let fallback_video = self.store.snapshot().video;
        let loaded = load_snapshot(&self.rows, &fallback_video).await;

        let came_back_empty = loaded == ContentSnapshot::default();
        if came_back_empty {
            if let Some(cached) = self.cache.as_ref().and_then(FallbackCache::load) {
                warn!("backend returned no content; serving cached snapshot");
                self.store.replace(cached);
                return;
            }
        }
        self.store.replace(loaded);
    }

    // ── Featured video ───────────────────────────────────────────────

    /// Upsert the featured video: update the active row if one exists,
    /// insert otherwise.
    pub async fn set_video(
        &self,
        url: String,
        poster_image: Option<String>,
    ) -> Result<FeaturedVideo, CoreError> {
        if url.trim().is_empty() {
            return Err(CoreError::validation("Video URL is required."));
        }

        let existing = self.rows.active_video().await?;
        let row = match existing {
            Some(row) => self
                .rows
                .update_video(
                    row.id,
                    &FeaturedVideoPatch {
                        url,
                        poster_image,
                    },
                )
                .await?
                .ok_or(CoreError::NotFound {
                    kind: "featured video",
                    id: row.id.to_string(),
                })?,
            None => {
                self.rows
                    .insert_video(&NewFeaturedVideoRow {
                        url,
                        poster_image,
                        is_active: true,
                    })
                    .await?
            }
        };

        let current = self.store.snapshot().video;
        let video = convert::video_from_row(row, &current);
        self.store.apply(ContentAction::ReplaceVideo(video.clone()));
        self.persist_cache();
        Ok(video)
    }

    // ── Photos ───────────────────────────────────────────────────────

    /// Upload a gallery photo: validate, store the object, insert the
    /// row with the next display order, then re-fetch the gallery.
    ///
    /// If the row insert fails after the object landed, the orphaned
    /// object is removed (best-effort; a failed cleanup is logged, not
    /// surfaced).
    pub async fn upload_photo(&self, upload: PhotoUpload) -> Result<Photo, CoreError> {
        upload.validate()?;

        let snapshot = self.store.snapshot();
        if snapshot.photos.len() >= MAX_PHOTOS {
            return Err(CoreError::CollectionFull {
                kind: "photo",
                cap: MAX_PHOTOS,
            });
        }

        let key = format!("{}-{}", Uuid::new_v4(), upload.file_name);
        self.storage
            .upload(PHOTO_BUCKET, &key, upload.bytes, &upload.content_type)
            .await?;
        let url = self.storage.public_url(PHOTO_BUCKET, &key);

        let inserted = self.insert_photo_row(&key, url, upload.alt).await?;

        self.refresh_photos().await?;
        self.persist_cache();
        Ok(convert::photo_from_row(inserted))
    }

    /// The database half of a photo upload, with the compensating
    /// object removal on failure.
    async fn insert_photo_row(
        &self,
        key: &str,
        url: String,
        alt: String,
    ) -> Result<soundcheck_api::rows::models::PhotoRow, CoreError> {
        let result = async {
            let max = self.rows.max_photo_order().await?;
            let display_order = max.unwrap_or(-1) + 1;
            self.rows
                .insert_photo(&NewPhotoRow {
                    url,
                    alt,
                    display_order,
                })
                .await
        }
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(db_err) => {
                // Compensating action: drop the orphaned object. Not
                // transactional — a failure here is logged and the
                // original error is what the caller sees.
                if let Err(cleanup_err) =
                    self.storage.remove(PHOTO_BUCKET, &[key.to_owned()]).await
                {
                    warn!(key, error = %cleanup_err, "failed to remove orphaned upload");
                }
                Err(db_err.into())
            }
        }
    }

    /// Move the photo at `from` to position `to` (single-element move).
    ///
    /// Applied optimistically, then persisted by writing a fresh
    /// contiguous `display_order` (0..n-1) for every photo in the new
    /// order. Any write failure discards the optimistic state and
    /// re-fetches the authoritative order — last writer wins, no merge.
    pub async fn reorder_photos(&self, from: usize, to: usize) -> Result<(), CoreError> {
        let len = self.store.snapshot().photos.len();
        if from >= len || to >= len {
            return Err(CoreError::validation(format!(
                "Photo position out of range (gallery holds {len})."
            )));
        }
        if from == to {
            return Ok(());
        }

        self.store.apply(ContentAction::MovePhoto { from, to });

        let reordered = self.store.snapshot().photos;
        for (position, photo) in (0_i64..).zip(reordered.iter()) {
            let id = serial_id(&photo.id)?;
            if let Err(e) = self.rows.set_photo_order(id, position).await {
                warn!(photo = %photo.id, error = %e, "reorder write failed; restoring server order");
                if let Err(refetch) = self.refresh_photos().await {
                    warn!(error = %refetch, "rollback re-fetch failed; snapshot may be stale");
                }
                return Err(e.into());
            }
        }

        self.persist_cache();
        Ok(())
    }

    // ── Mixes ────────────────────────────────────────────────────────

    pub async fn add_mix(&self, draft: NewMix) -> Result<Mix, CoreError> {
        draft.validate()?;
        let inserted = self.rows.insert_mix(&convert::mix_to_new_row(&draft)).await?;
        self.refresh_mixes().await?;
        self.persist_cache();
        Ok(convert::mix_from_row(inserted))
    }

    // ── Testimonials ─────────────────────────────────────────────────

    pub async fn add_testimonial(&self, draft: NewTestimonial) -> Result<Testimonial, CoreError> {
        draft.validate()?;
        if self.store.snapshot().testimonials.len() >= MAX_TESTIMONIALS {
            return Err(CoreError::CollectionFull {
                kind: "testimonial",
                cap: MAX_TESTIMONIALS,
            });
        }

        let inserted = self
            .rows
            .insert_testimonial(&convert::testimonial_to_new_row(&draft))
            .await?;
        self.refresh_testimonials().await?;
        self.persist_cache();
        Ok(convert::testimonial_from_row(inserted))
    }

    pub async fn update_testimonial(
        &self,
        id: &EntityId,
        draft: NewTestimonial,
    ) -> Result<Testimonial, CoreError> {
        draft.validate()?;
        let serial = serial_id(id)?;
        let updated = self
            .rows
            .update_testimonial(serial, &convert::testimonial_to_patch(&draft))
            .await?
            .ok_or(CoreError::NotFound {
                kind: "testimonial",
                id: id.to_string(),
            })?;
        self.refresh_testimonials().await?;
        self.persist_cache();
        Ok(convert::testimonial_from_row(updated))
    }

    /// Upload a testimonial portrait, returning its public URL for the
    /// draft. No row is written; the URL travels with the testimonial
    /// when it is added or updated.
    pub async fn upload_testimonial_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, CoreError> {
        media::validate_image_file(content_type, bytes.len())?;

        let key = format!("{}-{}", Uuid::new_v4(), file_name);
        self.storage
            .upload(TESTIMONIAL_BUCKET, &key, bytes, content_type)
            .await?;
        Ok(self.storage.public_url(TESTIMONIAL_BUCKET, &key))
    }

    // ── Venues ───────────────────────────────────────────────────────

    pub async fn add_venue(&self, draft: NewVenue) -> Result<Venue, CoreError> {
        draft.validate()?;
        if self.store.snapshot().venues.len() >= MAX_VENUES {
            return Err(CoreError::CollectionFull {
                kind: "venue",
                cap: MAX_VENUES,
            });
        }

        let inserted = self.rows.insert_venue(&convert::venue_to_new_row(&draft)).await?;
        self.refresh_venues().await?;
        self.persist_cache();
        Ok(convert::venue_from_row(inserted))
    }

    pub async fn update_venue(&self, id: &EntityId, draft: NewVenue) -> Result<Venue, CoreError> {
        draft.validate()?;
        let serial = serial_id(id)?;
        let updated = self
            .rows
            .update_venue(serial, &convert::venue_to_patch(&draft))
            .await?
            .ok_or(CoreError::NotFound {
                kind: "venue",
                id: id.to_string(),
            })?;
        self.refresh_venues().await?;
        self.persist_cache();
        Ok(convert::venue_from_row(updated))
    }

    // ── Two-step delete ──────────────────────────────────────────────

    /// Mark an entity for deletion. Nothing is issued to the backend
    /// until `confirm_delete` runs.
    pub fn request_delete(&mut self, kind: DeleteKind, id: EntityId) -> Result<(), CoreError> {
        let snapshot = self.store.snapshot();
        let exists = match kind {
            DeleteKind::Photo => snapshot.photos.iter().any(|p| p.id == id),
            DeleteKind::Mix => snapshot.mixes.iter().any(|m| m.id == id),
            DeleteKind::Testimonial => snapshot.testimonials.iter().any(|t| t.id == id),
            DeleteKind::Venue => snapshot.venues.iter().any(|v| v.id == id),
        };
        if !exists {
            return Err(CoreError::NotFound {
                kind: kind.noun(),
                id: id.to_string(),
            });
        }
        self.pending_delete = Some(PendingDelete { kind, id });
        Ok(())
    }

    /// Abandon the pending delete, if any.
    pub fn cancel_delete(&mut self) -> Option<PendingDelete> {
        self.pending_delete.take()
    }

    /// Execute the pending delete.
    pub async fn confirm_delete(&mut self) -> Result<(), CoreError> {
        let pending = self.pending_delete.take().ok_or(CoreError::NoPendingDelete)?;
        let serial = serial_id(&pending.id)?;

        match pending.kind {
            DeleteKind::Photo => {
                // Remove the stored object first (best-effort); the row
                // delete proceeds even if storage refuses.
                let url = self
                    .store
                    .snapshot()
                    .photos
                    .iter()
                    .find(|p| p.id == pending.id)
                    .map(|p| p.url.clone());
                if let Some(key) = url.as_deref().and_then(storage::object_key_from_url) {
                    if let Err(e) = self.storage.remove(PHOTO_BUCKET, &[key]).await {
                        warn!(photo = %pending.id, error = %e, "storage delete failed; removing row anyway");
                    }
                }
                self.rows.delete_photo(serial).await?;
                self.refresh_photos().await?;
            }
            DeleteKind::Mix => {
                self.rows.delete_mix(serial).await?;
                self.refresh_mixes().await?;
            }
            DeleteKind::Testimonial => {
                self.rows.delete_testimonial(serial).await?;
                self.refresh_testimonials().await?;
            }
            DeleteKind::Venue => {
                self.rows.delete_venue(serial).await?;
                self.refresh_venues().await?;
            }
        }

        self.persist_cache();
        Ok(())
    }

    // ── Slice refresh (re-fetch and replace wholesale) ───────────────

    async fn refresh_photos(&self) -> Result<(), CoreError> {
        let rows = self.rows.list_photos().await?;
        self.store
            .apply(ContentAction::ReplacePhotos(convert::photos_from_rows(rows)));
        Ok(())
    }

    async fn refresh_mixes(&self) -> Result<(), CoreError> {
        let rows = self.rows.list_mixes().await?;
        self.store
            .apply(ContentAction::ReplaceMixes(convert::mixes_from_rows(rows)));
        Ok(())
    }

    async fn refresh_testimonials(&self) -> Result<(), CoreError> {
        let rows = self.rows.list_testimonials().await?;
        self.store.apply(ContentAction::ReplaceTestimonials(
            convert::testimonials_from_rows(rows),
        ));
        Ok(())
    }

    async fn refresh_venues(&self) -> Result<(), CoreError> {
        let rows = self.rows.list_venues().await?;
        self.store
            .apply(ContentAction::ReplaceVenues(convert::venues_from_rows(rows)));
        Ok(())
    }

    fn persist_cache(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(&self.store.snapshot()) {
                warn!(error = %e, "fallback cache write failed");
            }
        }
    }
}

fn serial_id(id: &EntityId) -> Result<i64, CoreError> {
    id.as_serial()
        .ok_or_else(|| CoreError::Internal(format!("unexpected id form: {id}")))
}
