//! Contact intake: public submission, admin inbox, and the
//! notification email function.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use soundcheck_core::model::{ContactDraft, EventType};
use soundcheck_core::{intake, submit_contact};

use crate::email::{ContactRecord, send_contact_email};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ContactBody {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, rename = "eventType")]
    pub event_type: Option<EventType>,
    #[serde(default, rename = "eventDate")]
    pub event_date: Option<String>,
    pub message: String,
}

/// `POST /api/v1/contact` — public, unauthenticated insert.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ContactBody>,
) -> Result<Json<Value>, ApiError> {
    let draft = ContactDraft {
        name: body.name,
        email: body.email,
        phone: body.phone,
        event_type: body.event_type.unwrap_or_default(),
        event_date: body.event_date,
        message: body.message,
    };

    let stored = submit_contact(&state.rows, &draft).await?;
    Ok(Json(json!({ "success": true, "id": stored.id.to_string() })))
}

/// `GET /api/v1/contact` (bearer-gated) — the admin inbox, newest first.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let contacts = intake::list_contacts(&state.rows).await?;
    Ok(Json(json!({ "contacts": contacts })))
}

/// Webhook payload from the store's insert trigger. Either key carries
/// the record, depending on the trigger's configuration.
#[derive(Deserialize)]
pub struct NotifyBody {
    #[serde(default)]
    pub record: Option<ContactRecord>,
    #[serde(default, rename = "contactData")]
    pub contact_data: Option<ContactRecord>,
}

/// `POST /api/v1/notify/contact` — render and dispatch the
/// notification email for a stored submission. Failure here never
/// rolls the submission back; the store row is the durable record.
pub async fn notify(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NotifyBody>,
) -> Result<Json<Value>, ApiError> {
    let Some(record) = body.record.or(body.contact_data) else {
        return Err(ApiError::bad_request("Missing record in payload"));
    };

    let Some(settings) = &state.email else {
        return Err(ApiError::internal("email provider not configured"));
    };

    match send_contact_email(&state.http, settings, &record).await {
        Ok(outcome) => {
            info!(message_id = ?outcome.message_id, "contact notification sent");
            Ok(Json(json!({ "success": true, "messageId": outcome.message_id })))
        }
        Err(error) => Ok(Json(json!({ "success": false, "error": error }))),
    }
}
