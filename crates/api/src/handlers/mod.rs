//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod banners;
pub mod events;
pub mod participants;
pub mod registrations;
