//! Request extractors for authentication and admin authorization.
//!
//! - [`auth`] -- bearer-token identity extraction.
//! - [`admin_gate`] -- the enforcing admin gate wrapped around every
//!   admin route.

pub mod admin_gate;
pub mod auth;
