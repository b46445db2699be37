// Contact-form entities.
//
// Submissions are write-once: created by public visitors, listed by
// admins, never edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::EntityId;

/// Event category a visitor selects on the booking form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventType {
    Wedding,
    Corporate,
    Birthday,
    Club,
    Private,
    #[default]
    Other,
}

/// A stored contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub event_type: EventType,
    #[serde(default)]
    pub event_date: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A visitor's submission before it is stored.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: EventType,
    pub event_date: Option<String>,
    pub message: String,
}

impl ContactDraft {
    /// Validate the required fields. Runs before the store insert.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("Name is required."));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(CoreError::validation("Email is required."));
        }
        if !email.contains('@') {
            return Err(CoreError::validation("Email address looks invalid."));
        }
        if self.message.trim().is_empty() {
            return Err(CoreError::validation("Message is required."));
        }
        Ok(())
    }
}
