// ── Content snapshot store ──
//
// Single-owner state container for the in-memory content snapshot.
// Mutations are explicit `ContentAction` transitions; subscribers
// observe through a `watch` channel.

mod cache;
mod content_store;
mod snapshot;

pub use cache::FallbackCache;
pub use content_store::ContentStore;
pub use snapshot::{ContentAction, ContentSnapshot, MAX_PHOTOS, MAX_TESTIMONIALS, MAX_VENUES};
