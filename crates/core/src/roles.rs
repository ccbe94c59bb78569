//! Admin role names and the role-to-capability mapping.
//!
//! Role assignment rows live in the `admin_users` table; this module only
//! interprets the role string. Anything it does not recognize (including a
//! missing assignment) maps to "not an admin" -- authorization never fails
//! open.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Capability flags derived from an admin role assignment.
///
/// Used by the read-only admin-status endpoint that drives navigation
/// rendering; the enforcing gate checks row presence directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AdminStatus {
    pub is_admin: bool,
    pub is_super_admin: bool,
}

impl AdminStatus {
    /// Map a role string (or absent assignment) to capability flags.
    ///
    /// `admin` and `super_admin` both grant `is_admin`; only `super_admin`
    /// grants `is_super_admin`. Unknown role strings grant nothing.
    pub fn from_role(role: Option<&str>) -> Self {
        let is_admin = matches!(role, Some(ROLE_ADMIN) | Some(ROLE_SUPER_ADMIN));
        let is_super_admin = role == Some(ROLE_SUPER_ADMIN);
        Self {
            is_admin,
            is_super_admin,
        }
    }

    /// The fail-safe value: no capabilities at all.
    pub fn none() -> Self {
        Self {
            is_admin: false,
            is_super_admin: false,
        }
    }
}
