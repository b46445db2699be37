// ── Snapshot loader ──
//
// Fetches all five content collections in one fan-out and merges them
// into a snapshot. Each branch fails independently: a collection that
// cannot be fetched becomes its empty/default value and the others
// still land. The load as a whole never fails.

use tracing::warn;

use soundcheck_api::RowsClient;

use crate::convert;
use crate::model::FeaturedVideo;
use crate::store::ContentSnapshot;

/// Load the full content snapshot from the backend.
///
/// One failing collection never blocks the others; failures are logged
/// and default to empty (or, for the video, to `fallback_video`).
pub async fn load_snapshot(rows: &RowsClient, fallback_video: &FeaturedVideo) -> ContentSnapshot {
    let (video, photos, mixes, testimonials, venues) = tokio::join!(
        rows.active_video(),
        rows.list_photos(),
        rows.list_mixes(),
        rows.list_testimonials(),
        rows.list_venues(),
    );

    let video = match video {
        Ok(Some(row)) => convert::video_from_row(row, fallback_video),
        Ok(None) => fallback_video.clone(),
        Err(e) => {
            warn!(error = %e, "featured video fetch failed; keeping fallback");
            fallback_video.clone()
        }
    };

    let photos = photos.map(convert::photos_from_rows).unwrap_or_else(|e| {
        warn!(error = %e, "photos fetch failed; rendering empty gallery");
        Vec::new()
    });

    let mixes = mixes.map(convert::mixes_from_rows).unwrap_or_else(|e| {
        warn!(error = %e, "mixes fetch failed; rendering empty list");
        Vec::new()
    });

    let testimonials = testimonials
        .map(convert::testimonials_from_rows)
        .unwrap_or_else(|e| {
            warn!(error = %e, "testimonials fetch failed; rendering empty list");
            Vec::new()
        });

    let venues = venues.map(convert::venues_from_rows).unwrap_or_else(|e| {
        warn!(error = %e, "venues fetch failed; rendering empty list");
        Vec::new()
    });

    ContentSnapshot {
        video,
        photos,
        mixes,
        testimonials,
        venues,
    }
}
