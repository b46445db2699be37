//! Route handlers, grouped by surface.

pub mod auth;
pub mod cms;
pub mod contact;
pub mod webhook;

use axum::Json;
use serde_json::{Value, json};

/// `GET /api/v1/health` — liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
