//! Domain logic for the event registration portal.
//!
//! Pure types and functions with no I/O:
//!
//! - [`error`] -- the domain error taxonomy shared by all crates.
//! - [`types`] -- database id and timestamp aliases.
//! - [`roles`] -- admin role constants and the role-to-flags mapping.
//! - [`forms`] -- dynamic registration form schema and response validation.
//! - [`reconcile`] -- dual-key response lookup, display/export formatting,
//!   and CSV rendering for participant lists.

pub mod error;
pub mod forms;
pub mod reconcile;
pub mod roles;
pub mod types;
