//! Route definitions for the `/registrations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::registrations;
use crate::state::AppState;

/// Routes mounted at `/registrations`. Both require authentication.
///
/// ```text
/// POST /             -> submit registration
/// GET  /{event_id}   -> own registration status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registrations::submit))
        .route("/{event_id}", get(registrations::status))
}
