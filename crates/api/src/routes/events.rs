//! Route definitions for the public `/events` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET /        -> active events, soonest first
/// GET /{id}    -> event detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_public))
        .route("/{id}", get(events::get_by_id))
}
