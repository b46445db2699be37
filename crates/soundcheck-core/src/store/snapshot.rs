// The content snapshot and its mutation transitions.
//
// Every mutation of the in-memory snapshot is an explicit action
// applied by a pure transition function, so each one is independently
// testable and there is exactly one place state changes.

use serde::{Deserialize, Serialize};

use crate::model::{FeaturedVideo, Mix, Photo, Testimonial, Venue};

/// Most photos the gallery will hold. Enforced by the editor before any
/// network call; the backend does not mirror this limit.
pub const MAX_PHOTOS: usize = 12;
/// Most published testimonials.
pub const MAX_TESTIMONIALS: usize = 10;
/// Most venue logos.
pub const MAX_VENUES: usize = 10;

/// The in-memory aggregate of all content collections at a point in
/// time. The remote store owns the durable truth; this (and the
/// fallback cache) are disposable caches of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub video: FeaturedVideo,
    pub photos: Vec<Photo>,
    pub mixes: Vec<Mix>,
    pub testimonials: Vec<Testimonial>,
    pub venues: Vec<Venue>,
}

impl Default for ContentSnapshot {
    fn default() -> Self {
        Self {
            video: FeaturedVideo::default(),
            photos: Vec::new(),
            mixes: Vec::new(),
            testimonials: Vec::new(),
            venues: Vec::new(),
        }
    }
}

/// An explicit snapshot transition.
///
/// Collections are always replaced wholesale (the post-mutation
/// re-fetch result), never patched row-by-row — the one exception is
/// `MovePhoto`, the optimistic half of the reorder protocol.
#[derive(Debug, Clone)]
pub enum ContentAction {
    ReplaceVideo(FeaturedVideo),
    ReplacePhotos(Vec<Photo>),
    ReplaceMixes(Vec<Mix>),
    ReplaceTestimonials(Vec<Testimonial>),
    ReplaceVenues(Vec<Venue>),
    /// Single-element move: remove the photo at `from` and reinsert it
    /// at `to`. Out-of-range indices leave the snapshot untouched.
    MovePhoto { from: usize, to: usize },
}

impl ContentSnapshot {
    /// Apply a transition, producing the next snapshot state in place.
    pub fn apply(&mut self, action: ContentAction) {
        match action {
            ContentAction::ReplaceVideo(video) => self.video = video,
            ContentAction::ReplacePhotos(photos) => self.photos = photos,
            ContentAction::ReplaceMixes(mixes) => self.mixes = mixes,
            ContentAction::ReplaceTestimonials(testimonials) => self.testimonials = testimonials,
            ContentAction::ReplaceVenues(venues) => self.venues = venues,
            ContentAction::MovePhoto { from, to } => {
                if from < self.photos.len() && to < self.photos.len() {
                    let photo = self.photos.remove(from);
                    self.photos.insert(to, photo);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::EntityId;
    use std::collections::HashSet;

    fn photo(id: i64) -> Photo {
        Photo {
            id: EntityId::from(id),
            url: format!("https://cdn.example/{id}.jpg"),
            alt: format!("photo {id}"),
            display_order: id,
        }
    }

    fn gallery(n: i64) -> ContentSnapshot {
        ContentSnapshot {
            photos: (0..n).map(photo).collect(),
            ..ContentSnapshot::default()
        }
    }

    #[test]
    fn move_photo_forward() {
        let mut snap = gallery(5);
        snap.apply(ContentAction::MovePhoto { from: 1, to: 3 });
        let ids: Vec<String> = snap.photos.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["0", "2", "3", "1", "4"]);
    }

    #[test]
    fn move_photo_backward() {
        let mut snap = gallery(5);
        snap.apply(ContentAction::MovePhoto { from: 4, to: 0 });
        let ids: Vec<String> = snap.photos.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["4", "0", "1", "2", "3"]);
    }

    #[test]
    fn move_photo_preserves_every_id() {
        // The reorder invariant: no photo duplicated or dropped, for any
        // in-range (from, to) pair.
        for from in 0..6 {
            for to in 0..6 {
                let mut snap = gallery(6);
                snap.apply(ContentAction::MovePhoto { from, to });
                assert_eq!(snap.photos.len(), 6);
                let unique: HashSet<String> =
                    snap.photos.iter().map(|p| p.id.to_string()).collect();
                assert_eq!(unique.len(), 6, "move {from}->{to} lost or duplicated an id");
            }
        }
    }

    #[test]
    fn move_photo_out_of_range_is_a_no_op() {
        let mut snap = gallery(3);
        let before = snap.clone();
        snap.apply(ContentAction::MovePhoto { from: 3, to: 0 });
        snap.apply(ContentAction::MovePhoto { from: 0, to: 99 });
        assert_eq!(snap, before);
    }

    #[test]
    fn replace_slice_leaves_other_slices_alone() {
        let mut snap = gallery(2);
        let mixes = vec![Mix {
            id: EntityId::from(1),
            title: "T".into(),
            embed_url: "https://open.spotify.com/x".into(),
            platform: crate::model::Platform::Spotify,
            description: None,
        }];
        snap.apply(ContentAction::ReplaceMixes(mixes.clone()));
        assert_eq!(snap.mixes, mixes);
        assert_eq!(snap.photos.len(), 2);
    }
}
