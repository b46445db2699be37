//! HTTP CMS surface for the content backend.
//!
//! REST-ish routes per entity and verb under the fixed `/api/v1`
//! prefix, bearer-token auth on mutating verbs, `{success | error}`
//! JSON envelopes, a `/health` liveness route, the deploy webhook, and
//! the contact-notification email function. The `soundcheck serve`
//! command embeds [`build_router`]; `soundcheck-server` runs it
//! standalone.

pub mod email;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

use crate::routes::{auth, cms, contact, webhook};
use crate::state::AppState;

/// Fixed route prefix for the CMS surface.
pub const API_PREFIX: &str = "/api/v1";

/// Assemble the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(600));

    // Mutating CMS verbs sit behind the bearer middleware; list verbs
    // are public so the site renderer can read without a session.
    let protected = Router::new()
        .route("/auth/signout", post(auth::signout))
        .route("/cms/video", put(cms::update_video))
        .route("/cms/photos", post(cms::add_photo).put(cms::reorder_photos))
        .route("/cms/photos/:id", axum::routing::delete(cms::delete_photo))
        .route("/cms/mixes", post(cms::add_mix))
        .route("/cms/mixes/:id", axum::routing::delete(cms::delete_mix))
        .route("/cms/testimonials", post(cms::add_testimonial))
        .route(
            "/cms/testimonials/:id",
            put(cms::update_testimonial).delete(cms::delete_testimonial),
        )
        .route("/cms/venues", post(cms::add_venue))
        .route(
            "/cms/venues/:id",
            put(cms::update_venue).delete(cms::delete_venue),
        )
        .route("/contact", get(contact::list))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_auth,
        ));

    let public = Router::new()
        .route("/health", get(routes::health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
        .route("/auth/session", get(auth::session))
        .route("/cms/video", get(cms::get_video))
        .route("/cms/photos", get(cms::list_photos))
        .route("/cms/mixes", get(cms::list_mixes))
        .route("/cms/testimonials", get(cms::list_testimonials))
        .route("/cms/venues", get(cms::list_venues))
        .route("/contact", post(contact::submit))
        .route("/notify/contact", post(contact::notify));

    Router::new()
        .nest(API_PREFIX, public.merge(protected))
        // The deploy webhook predates the CMS prefix and keeps its path.
        .route("/api/health/deploy", post(webhook::deploy))
        .layer(cors)
        .with_state(state)
}

/// `Cache-Control` value for webhook responses.
pub(crate) fn no_store() -> HeaderValue {
    HeaderValue::from_static("no-cache, no-store, must-revalidate")
}
