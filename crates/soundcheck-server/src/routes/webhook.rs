//! Deploy webhook: `POST /api/health/deploy`.
//!
//! Fired on successful production deploys so log tooling can suppress
//! alerts during the deploy window and correlate regressions to
//! releases. Logs one structured event; mutates nothing.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use crate::no_store;

/// Handle a deploy event. The payload is validated by hand so missing
/// fields produce the documented 400 envelope rather than a generic
/// extractor rejection.
pub async fn deploy(Json(payload): Json<Value>) -> Response {
    let site_id = payload.get("site_id").and_then(Value::as_str);
    let deploy_id = payload.get("deploy_id").and_then(Value::as_str);
    let environment = payload.get("environment").and_then(Value::as_str);

    let (Some(site_id), Some(deploy_id), Some(environment)) = (site_id, deploy_id, environment)
    else {
        let body = json!({
            "status": "error",
            "received": false,
            "error": "Missing required fields: site_id, deploy_id, environment",
        });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    let timestamp = payload
        .get("timestamp")
        .and_then(Value::as_str)
        .map_or_else(|| Utc::now().to_rfc3339(), str::to_owned);
    let metadata = payload.get("metadata").cloned().unwrap_or_else(|| json!({}));

    info!(
        event = "deploy",
        site_id,
        deploy_id,
        environment,
        %timestamp,
        %metadata,
        "deploy webhook received"
    );

    let body = json!({
        "status": "ok",
        "received": true,
        "deploy_id": deploy_id,
    });
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, no_store())],
        Json(body),
    )
        .into_response()
}
