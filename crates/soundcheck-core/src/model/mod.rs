// Domain model: UI-shaped records for every content entity.
//
// These are what the editor, the renderer, and the CLI consume. Row
// types from the backend convert into these through `crate::convert`.

pub mod contact;
pub mod entity_id;
pub mod media;
pub mod social;

pub use contact::{ContactDraft, ContactSubmission, EventType};
pub use entity_id::EntityId;
pub use media::{FeaturedVideo, Mix, NewMix, Photo, PhotoUpload, Platform, image_content_type};
pub use social::{NewTestimonial, NewVenue, Rating, Testimonial, Venue};

/// Largest accepted image upload, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Image content types accepted for upload.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];
