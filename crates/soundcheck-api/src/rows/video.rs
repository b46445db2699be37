// Rows surface featured-video endpoints
//
// The featured video is a singleton: at most one row has
// `is_active = true`. Upsert semantics (update-if-exists-else-insert)
// are composed in soundcheck-core from these primitives.

use tracing::debug;

use crate::error::Error;
use crate::rows::RowsClient;
use crate::rows::models::{FeaturedVideoPatch, FeaturedVideoRow, NewFeaturedVideoRow};

const RELATION: &str = "featured_videos";

impl RowsClient {
    /// The currently active featured video, if one exists.
    pub async fn active_video(&self) -> Result<Option<FeaturedVideoRow>, Error> {
        let mut rows: Vec<FeaturedVideoRow> = self
            .select(
                RELATION,
                &[("select", "*"), ("is_active", "eq.true"), ("limit", "1")],
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// Insert a featured-video row.
    pub async fn insert_video(&self, row: &NewFeaturedVideoRow) -> Result<FeaturedVideoRow, Error> {
        debug!(url = %row.url, "inserting featured video row");
        self.insert(RELATION, row).await
    }

    /// Update an existing featured-video row.
    pub async fn update_video(
        &self,
        id: i64,
        patch: &FeaturedVideoPatch,
    ) -> Result<Option<FeaturedVideoRow>, Error> {
        let id_filter = format!("eq.{id}");
        debug!(id, "updating featured video row");
        let mut rows: Vec<FeaturedVideoRow> =
            self.update(RELATION, &[("id", &id_filter)], patch).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }
}
