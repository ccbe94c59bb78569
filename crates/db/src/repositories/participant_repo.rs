//! Repository for the `participants` table.

use portal_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::participant::{CreateParticipant, Participant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, user_id, responses, created_at";

/// Provides write-once/read operations for registration records.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a registration record.
    ///
    /// A second registration for the same (event, user) pair violates
    /// `uq_participants_event_user`; the caller maps that database error
    /// to a 409 conflict rather than retrying.
    pub async fn create(
        pool: &PgPool,
        input: &CreateParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO participants (event_id, user_id, responses)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(input.event_id)
            .bind(input.user_id)
            .bind(Json(&input.responses))
            .fetch_one(pool)
            .await
    }

    /// All registrations for an event in submission order.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participants
             WHERE event_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// A single user's registration for an event, if any.
    pub async fn find_by_event_and_user(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participants
             WHERE event_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
