//! Event entity model and DTOs.

use chrono::Utc;
use portal_core::forms::FormField;
use portal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    /// Registration window; either bound may be open-ended.
    pub registration_start: Option<Timestamp>,
    pub registration_end: Option<Timestamp>,
    /// Whether the event is visible on the public listing.
    pub is_active: bool,
    pub registration_open: bool,
    pub banner_url: Option<String>,
    /// Ordered form field definitions (see `portal_core::forms`).
    pub form_fields: Json<Vec<FormField>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    /// Whether a registration submission is currently accepted: the event
    /// must be active, registration flagged open, and the clock inside the
    /// window when one is configured.
    pub fn accepts_registrations(&self) -> bool {
        if !self.is_active || !self.registration_open {
            return false;
        }
        let now = Utc::now();
        if self.registration_start.is_some_and(|start| now < start) {
            return false;
        }
        if self.registration_end.is_some_and(|end| now > end) {
            return false;
        }
        true
    }
}

/// DTO for creating a new event. Form fields always start empty; the
/// form-builder flow adds them through the update path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub registration_start: Option<Timestamp>,
    pub registration_end: Option<Timestamp>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub registration_open: bool,
    #[validate(custom(function = validate_banner_url))]
    pub banner_url: Option<String>,
}

/// DTO for the full-payload event update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub registration_start: Option<Timestamp>,
    pub registration_end: Option<Timestamp>,
    pub is_active: bool,
    pub registration_open: bool,
    #[validate(custom(function = validate_banner_url))]
    pub banner_url: Option<String>,
    /// Full replacement of the field schema. Ids of surviving fields must
    /// be preserved by the caller; new fields get ids assigned server-side.
    pub form_fields: Vec<FormField>,
}

fn default_true() -> bool {
    true
}

/// Accept an absolute http(s) URL or one of the service's own upload
/// paths. The banner upload endpoint returns `/uploads/...` URLs, so a
/// host-relative path must round-trip through the event create/update
/// payloads.
fn validate_banner_url(url: &str) -> Result<(), ValidationError> {
    let ok = url.starts_with("http://") || url.starts_with("https://")
        || url.starts_with("/uploads/");
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("banner_url"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn open_event() -> Event {
        Event {
            id: 1,
            title: "HackNight".into(),
            description: None,
            event_date: None,
            registration_start: None,
            registration_end: None,
            is_active: true,
            registration_open: true,
            banner_url: None,
            form_fields: Json(vec![]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn open_event_accepts_registrations() {
        assert!(open_event().accepts_registrations());
    }

    #[test]
    fn inactive_or_closed_event_rejects() {
        let mut event = open_event();
        event.is_active = false;
        assert!(!event.accepts_registrations());

        let mut event = open_event();
        event.registration_open = false;
        assert!(!event.accepts_registrations());
    }

    #[test]
    fn window_bounds_are_enforced() {
        let mut event = open_event();
        event.registration_start = Some(Utc::now() + Duration::hours(1));
        assert!(!event.accepts_registrations(), "window not yet open");

        let mut event = open_event();
        event.registration_end = Some(Utc::now() - Duration::hours(1));
        assert!(!event.accepts_registrations(), "window already closed");

        let mut event = open_event();
        event.registration_start = Some(Utc::now() - Duration::hours(1));
        event.registration_end = Some(Utc::now() + Duration::hours(1));
        assert!(event.accepts_registrations());
    }

    fn create_with_banner(banner_url: &str) -> CreateEvent {
        CreateEvent {
            title: "HackNight".into(),
            description: None,
            event_date: None,
            registration_start: None,
            registration_end: None,
            is_active: true,
            registration_open: true,
            banner_url: Some(banner_url.into()),
        }
    }

    #[test]
    fn banner_url_accepts_own_upload_path() {
        let input = create_with_banner("/uploads/event-banners/1725000000000-ab12cd.png");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn banner_url_accepts_absolute_url() {
        let input = create_with_banner("https://cdn.example.com/banner.png");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn banner_url_rejects_other_strings() {
        assert!(create_with_banner("not a url").validate().is_err());
        assert!(create_with_banner("ftp://host/banner.png").validate().is_err());
        assert!(create_with_banner("/etc/passwd").validate().is_err());
    }
}
