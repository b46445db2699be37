//! Business logic for the soundcheck content toolkit.
//!
//! Owns the domain model, the API-to-domain adapters, the content
//! snapshot store with explicit mutation transitions, the fan-out
//! snapshot loader, the content editor (CRUD + reorder engine), the
//! session/auth state machine, and the local fallback cache. The
//! binaries (`soundcheck`, `soundcheck-server`) compose these pieces;
//! nothing here talks to a terminal or an HTTP listener.

pub mod convert;
pub mod editor;
pub mod error;
pub mod intake;
pub mod loader;
pub mod model;
pub mod session;
pub mod store;

pub use editor::{ContentEditor, DeleteKind, PendingDelete};
pub use error::CoreError;
pub use intake::{list_contacts, submit_contact};
pub use loader::load_snapshot;
pub use model::{
    ContactDraft, ContactSubmission, EntityId, EventType, FeaturedVideo, Mix, NewMix,
    NewTestimonial, NewVenue, Photo, PhotoUpload, Platform, Rating, Testimonial, Venue,
    image_content_type,
};
pub use session::{Route, SessionEvent, SessionGate, SessionState, View};
pub use store::{ContentAction, ContentSnapshot, ContentStore, FallbackCache};

// Re-exported so consumers don't need a direct soundcheck-api dependency
// for the common types that cross the boundary.
pub use soundcheck_api::{AuthUser, Session, SignUpOutcome};
