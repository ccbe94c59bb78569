//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod event_repo;
pub mod participant_repo;
pub mod session_repo;
pub mod user_repo;

pub use admin_user_repo::AdminUserRepo;
pub use event_repo::EventRepo;
pub use participant_repo::ParticipantRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
