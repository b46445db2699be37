// Social-proof entities: testimonials and venue logos.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::EntityId;

// ── Rating ──────────────────────────────────────────────────────────

/// Star rating attached to a testimonial. The site only publishes
/// ratings in the 3..=5 band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(CoreError::validation(format!(
                "Rating must be between {} and {} stars.",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }

    /// Force a raw stored value into the valid band. Used when adapting
    /// rows that predate the band check.
    pub fn clamped(raw: i64) -> Self {
        let clamped = raw.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(clamped).unwrap_or(Self::MAX))
    }
}

// ── Testimonial ─────────────────────────────────────────────────────

/// A published client testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: EntityId,
    pub name: String,
    pub event: String,
    pub text: String,
    pub rating: Rating,
    #[serde(default)]
    pub image: Option<String>,
}

/// Draft for a new or edited testimonial.
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub name: String,
    pub event: String,
    pub text: String,
    pub rating: Rating,
    pub image: Option<String>,
}

impl NewTestimonial {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("Testimonial name is required."));
        }
        if self.event.trim().is_empty() {
            return Err(CoreError::validation("Testimonial event is required."));
        }
        if self.text.trim().is_empty() {
            return Err(CoreError::validation("Testimonial text is required."));
        }
        Ok(())
    }
}

// ── Venue ───────────────────────────────────────────────────────────

/// A venue the DJ has played, shown as a logo strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Draft for a new or edited venue.
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub logo: Option<String>,
}

impl NewVenue {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("Venue name is required."));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_band() {
        assert!(Rating::new(3).is_ok());
        assert!(Rating::new(5).is_ok());
    }

    #[test]
    fn rating_rejects_out_of_band() {
        assert!(Rating::new(2).is_err());
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn testimonial_draft_requires_fields() {
        let draft = NewTestimonial {
            name: "Leilani".into(),
            event: "Wedding".into(),
            text: "Dance floor never emptied.".into(),
            rating: Rating::new(5).unwrap(),
            image: None,
        };
        assert!(draft.validate().is_ok());

        let blank = NewTestimonial {
            text: String::new(),
            ..draft
        };
        assert!(blank.validate().is_err());
    }
}
