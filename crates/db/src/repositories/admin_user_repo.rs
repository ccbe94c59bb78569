//! Repository for the `admin_users` role-assignment table.

use portal_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin_user::AdminUser;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, role, created_at";

/// Read-only lookup of admin role assignments.
pub struct AdminUserRepo;

impl AdminUserRepo {
    /// Find the role assignment for a user, if one exists.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE user_id = $1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
