//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO where the entity is mutable

pub mod admin_user;
pub mod event;
pub mod participant;
pub mod session;
pub mod user;
