//! Participant (registration record) model and DTOs.

use portal_core::forms::ResponseMap;
use portal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A registration row from the `participants` table.
///
/// Rows are written once and never mutated; the
/// `uq_participants_event_user` constraint guarantees at most one per
/// (event, user) pair. Keys in `responses` may follow either the field-id
/// or the legacy field-label convention; read through
/// `portal_core::reconcile::resolve_value`, never by a fixed key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub responses: Json<ResponseMap>,
    pub created_at: Timestamp,
}

/// DTO for recording a registration.
#[derive(Debug, Clone)]
pub struct CreateParticipant {
    pub event_id: DbId,
    pub user_id: DbId,
    pub responses: ResponseMap,
}
