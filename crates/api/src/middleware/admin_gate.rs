//! The enforcing admin gate.
//!
//! Every admin route takes [`RequireAdmin`] as its first extractor, so
//! the check below runs on each request. The gate, in order:
//!
//! 1. No or invalid bearer token -> 401, and the role table is never
//!    queried. The client sends the user to the admin login page.
//! 2. Valid token -> look up the `admin_users` assignment for the id.
//! 3. No assignment -> revoke every session the user holds, then 403.
//!    A non-admin who probes an admin path must not walk away with a
//!    live authenticated session; the client redirects home.
//! 4. Assignment present (either role) -> grant.
//!
//! Failure semantics are fail-closed: a database error during role
//! resolution is logged and rejected as 401, never treated as admin and
//! never surfaced as a 500. The client sends the user back to the admin
//! login page, and sessions are left intact on this path since nothing
//! proved the user is not an admin.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portal_core::error::CoreError;
use portal_core::types::DbId;
use portal_db::repositories::{AdminUserRepo, SessionRepo};

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// An authenticated user with a verified admin role assignment.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin.role is "admin" or "super_admin" here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AdminIdentity);

/// Identity exposed to handlers behind the gate.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub user_id: DbId,
    pub email: String,
    /// The assigned role string (`admin` or `super_admin`).
    pub role: String,
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let assignment = match AdminUserRepo::find_by_user_id(&state.pool, user.user_id).await {
            Ok(assignment) => assignment,
            Err(e) => {
                // Fail closed on lookup errors; back to the login page.
                tracing::error!(user_id = user.user_id, error = %e, "Admin role lookup failed");
                return Err(AppError::Core(CoreError::Unauthorized(
                    "Admin verification failed".into(),
                )));
            }
        };

        let Some(assignment) = assignment else {
            // Forced sign-out: a non-admin must not retain an
            // authenticated session after hitting an admin-gated path.
            let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!(user_id = user.user_id, error = %e, "Session revocation failed");
                    0
                });
            tracing::warn!(
                user_id = user.user_id,
                revoked_sessions = revoked,
                "Non-admin rejected at admin gate, sessions revoked"
            );
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        };

        Ok(RequireAdmin(AdminIdentity {
            user_id: user.user_id,
            email: user.email,
            role: assignment.role,
        }))
    }
}
