//! Repository for the `events` table.

use portal_core::forms::FormField;
use portal_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, event_date, registration_start, \
                       registration_end, is_active, registration_open, banner_url, \
                       form_fields, created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event with an empty field schema, returning the row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, event_date, registration_start,
                                 registration_end, is_active, registration_open, banner_url,
                                 form_fields)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, '[]'::jsonb)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(input.registration_start)
            .bind(input.registration_end)
            .bind(input.is_active)
            .bind(input.registration_open)
            .bind(&input.banner_url)
            .fetch_one(pool)
            .await
    }

    /// Find an event by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events visible on the public site: active, soonest first with
    /// undated events last.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE is_active = true
             ORDER BY event_date ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// List every event for the admin console, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY created_at DESC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Full-payload update, including the field schema. The caller is
    /// responsible for id assignment on new form fields.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
        form_fields: &[FormField],
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = $2,
                description = $3,
                event_date = $4,
                registration_start = $5,
                registration_end = $6,
                is_active = $7,
                registration_open = $8,
                banner_url = $9,
                form_fields = $10,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(input.registration_start)
            .bind(input.registration_end)
            .bind(input.is_active)
            .bind(input.registration_open)
            .bind(&input.banner_url)
            .bind(Json(form_fields))
            .fetch_optional(pool)
            .await
    }
}
