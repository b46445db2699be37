// ── API-to-domain type conversions ──
//
// Bridges raw `soundcheck_api` row types into canonical
// `soundcheck_core::model` domain records and back. Each function
// normalizes field names (`image_url` -> `image`, `logo_url` -> `logo`),
// stringifies ids behind `EntityId`, and fills sensible defaults for
// missing optional data.

use soundcheck_api::rows::models::{
    ContactRow, FeaturedVideoRow, MixRow, NewContactRow, NewMixRow, NewTestimonialRow, NewVenueRow,
    PhotoRow, TestimonialPatch, TestimonialRow, VenuePatch, VenueRow,
};

use crate::model::{
    ContactDraft, ContactSubmission, EntityId, FeaturedVideo, Mix, NewMix, NewTestimonial,
    NewVenue, Photo, Platform, Rating, Testimonial, Venue,
};

/// Fallback alt text for photos stored without one.
const DEFAULT_ALT: &str = "Gallery photo";

// ── Photos ──────────────────────────────────────────────────────────

pub fn photo_from_row(row: PhotoRow) -> Photo {
    Photo {
        id: EntityId::from(row.id),
        url: row.url,
        alt: row.alt.unwrap_or_else(|| DEFAULT_ALT.to_owned()),
        display_order: row.display_order,
    }
}

pub fn photos_from_rows(rows: Vec<PhotoRow>) -> Vec<Photo> {
    rows.into_iter().map(photo_from_row).collect()
}

// ── Mixes ───────────────────────────────────────────────────────────

pub fn mix_from_row(row: MixRow) -> Mix {
    Mix {
        id: EntityId::from(row.id),
        title: row.title,
        embed_url: row.embed_url,
        platform: row.platform.parse().unwrap_or(Platform::Spotify),
        description: row.description,
    }
}

pub fn mixes_from_rows(rows: Vec<MixRow>) -> Vec<Mix> {
    rows.into_iter().map(mix_from_row).collect()
}

pub fn mix_to_new_row(draft: &NewMix) -> NewMixRow {
    NewMixRow {
        title: draft.title.clone(),
        embed_url: draft.embed_url.clone(),
        platform: draft.platform.to_string(),
        description: draft.description.clone(),
        display_order: 0,
    }
}

// ── Testimonials ────────────────────────────────────────────────────

pub fn testimonial_from_row(row: TestimonialRow) -> Testimonial {
    Testimonial {
        id: EntityId::from(row.id),
        name: row.name,
        event: row.event,
        text: row.text,
        rating: Rating::clamped(row.rating),
        image: row.image_url,
    }
}

pub fn testimonials_from_rows(rows: Vec<TestimonialRow>) -> Vec<Testimonial> {
    rows.into_iter().map(testimonial_from_row).collect()
}

pub fn testimonial_to_new_row(draft: &NewTestimonial) -> NewTestimonialRow {
    NewTestimonialRow {
        name: draft.name.clone(),
        event: draft.event.clone(),
        text: draft.text.clone(),
        rating: i64::from(draft.rating.stars()),
        image_url: draft.image.clone(),
        display_order: 0,
    }
}

pub fn testimonial_to_patch(draft: &NewTestimonial) -> TestimonialPatch {
    TestimonialPatch {
        name: draft.name.clone(),
        event: draft.event.clone(),
        text: draft.text.clone(),
        rating: i64::from(draft.rating.stars()),
        image_url: draft.image.clone(),
    }
}

// ── Venues ──────────────────────────────────────────────────────────

pub fn venue_from_row(row: VenueRow) -> Venue {
    Venue {
        id: EntityId::from(row.id),
        name: row.name,
        logo: row.logo_url,
    }
}

pub fn venues_from_rows(rows: Vec<VenueRow>) -> Vec<Venue> {
    rows.into_iter().map(venue_from_row).collect()
}

pub fn venue_to_new_row(draft: &NewVenue) -> NewVenueRow {
    NewVenueRow {
        name: draft.name.clone(),
        logo_url: draft.logo.clone(),
        display_order: 0,
    }
}

pub fn venue_to_patch(draft: &NewVenue) -> VenuePatch {
    VenuePatch {
        name: draft.name.clone(),
        logo_url: draft.logo.clone(),
    }
}

// ── Featured video ──────────────────────────────────────────────────

/// Merge a stored video row over a fallback (usually the stock default
/// or the previously loaded value): stored fields win, missing optional
/// fields keep the fallback's values.
pub fn video_from_row(row: FeaturedVideoRow, fallback: &FeaturedVideo) -> FeaturedVideo {
    FeaturedVideo {
        url: row.url,
        poster_image: row.poster_image.unwrap_or_else(|| fallback.poster_image.clone()),
        title: row.title.unwrap_or_else(|| fallback.title.clone()),
        description: row
            .description
            .unwrap_or_else(|| fallback.description.clone()),
    }
}

// ── Contact ─────────────────────────────────────────────────────────

pub fn contact_from_row(row: ContactRow) -> ContactSubmission {
    ContactSubmission {
        id: EntityId::from(row.id),
        name: row.name,
        email: row.email,
        phone: row.phone,
        event_type: row.event_type.parse().unwrap_or_default(),
        event_date: row.event_date,
        message: row.message,
        created_at: row.created_at,
    }
}

pub fn contacts_from_rows(rows: Vec<ContactRow>) -> Vec<ContactSubmission> {
    rows.into_iter().map(contact_from_row).collect()
}

pub fn contact_to_new_row(draft: &ContactDraft) -> NewContactRow {
    NewContactRow {
        name: draft.name.clone(),
        email: draft.email.clone(),
        phone: draft.phone.clone().filter(|p| !p.trim().is_empty()),
        event_type: draft.event_type.to_string(),
        event_date: draft
            .event_date
            .clone()
            .filter(|d| !d.trim().is_empty()),
        message: draft.message.clone(),
    }
}
