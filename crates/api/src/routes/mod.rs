pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod registrations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                            create account (public)
/// /auth/login                               login (public)
/// /auth/refresh                             refresh (public)
/// /auth/logout                              logout (requires auth)
/// /auth/me                                  current user (requires auth)
/// /auth/admin-status                        admin capability flags (fail-safe)
///
/// /events                                   public listing (active only)
/// /events/{id}                              event detail
///
/// /registrations                            submit registration (requires auth)
/// /registrations/{event_id}                 own registration status (requires auth)
///
/// /admin/events                             list all, create (admin gate)
/// /admin/events/{id}                        full update (admin gate)
/// /admin/events/{id}/participants           reconciled table (admin gate)
/// /admin/events/{id}/participants/export    CSV download (admin gate)
/// /admin/banners                            banner upload (admin gate, multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/events", events::router())
        .nest("/registrations", registrations::router())
        .nest("/admin", admin::router())
}
