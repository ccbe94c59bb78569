//! Route definitions for the admin-gated surface.
//!
//! Every handler here takes `RequireAdmin` as its first extractor, so the
//! gate in `middleware::admin_gate` runs before any admin content is
//! produced.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{banners, events, participants};
use crate::state::AppState;

/// Maximum accepted banner upload size (10 MiB).
const MAX_BANNER_BYTES: usize = 10 * 1024 * 1024;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /events                             list all events
/// POST /events                             create event
/// PUT  /events/{id}                        full update (incl. form schema)
/// GET  /events/{id}/participants           reconciled participant table
/// GET  /events/{id}/participants/export    CSV download
/// POST /banners                            banner upload (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_all).post(events::create))
        .route("/events/{id}", put(events::update))
        .route("/events/{id}/participants", get(participants::list))
        .route(
            "/events/{id}/participants/export",
            get(participants::export_csv),
        )
        .route(
            "/banners",
            post(banners::upload).layer(DefaultBodyLimit::max(MAX_BANNER_BYTES)),
        )
}
