//! Admin role assignment model.

use portal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `admin_users` table.
///
/// Pure lookup data: presence of a row (and its role string) gates the
/// admin surface. Nothing in this codebase mutates these rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminUser {
    pub id: DbId,
    pub user_id: DbId,
    /// `admin` or `super_admin` (see `portal_core::roles`).
    pub role: String,
    pub created_at: Timestamp,
}
