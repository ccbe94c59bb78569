//! Admin participant views: the reconciled table and the CSV export.
//!
//! Both endpoints fetch event metadata and the participant list
//! concurrently, then read every response value through
//! `portal_core::reconcile::resolve_value` so records keyed by either
//! convention (field id or legacy field label) render identically.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use portal_core::error::CoreError;
use portal_core::reconcile::{self, Column, ExportRecord};
use portal_core::types::{DbId, Timestamp};
use portal_db::models::event::Event;
use portal_db::models::participant::Participant;
use portal_db::repositories::{EventRepo, ParticipantRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::admin_gate::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// The reconciled participant table for the admin console.
#[derive(Debug, Serialize)]
pub struct ParticipantTable {
    pub event: Event,
    pub total: usize,
    /// Fixed leading columns then one per form field, in schema order.
    pub columns: Vec<Column>,
    /// One row per participant, cells aligned with `columns` and already
    /// formatted for display.
    pub rows: Vec<TableRow>,
    /// Raw records for consumers that need the unformatted data.
    pub participants: Vec<Participant>,
}

#[derive(Debug, Serialize)]
pub struct TableRow {
    pub participant_id: DbId,
    pub registered_at: Timestamp,
    pub cells: Vec<String>,
}

/// GET /api/v1/admin/events/{id}/participants
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ParticipantTable>>> {
    let (event, participants) = fetch_event_and_participants(&state, event_id).await?;
    let fields = &event.form_fields.0;

    let columns = reconcile::build_columns(fields);
    let rows = participants
        .iter()
        .enumerate()
        .map(|(index, p)| {
            flag_orphaned_keys(&event, p);

            let mut cells = Vec::with_capacity(columns.len());
            cells.push((index + 1).to_string());
            cells.push(reconcile::format_registration_timestamp(p.created_at));
            for field in fields {
                let value = reconcile::resolve_value(&p.responses.0, field);
                cells.push(reconcile::format_for_display(value));
            }
            TableRow {
                participant_id: p.id,
                registered_at: p.created_at,
                cells,
            }
        })
        .collect();

    Ok(Json(DataResponse {
        data: ParticipantTable {
            total: participants.len(),
            columns,
            rows,
            participants,
            event,
        },
    }))
}

/// GET /api/v1/admin/events/{id}/participants/export
///
/// Download the participant list as CSV. Deterministic for an unchanged
/// participant set, so repeated exports are byte-identical.
pub async fn export_csv(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (event, participants) = fetch_event_and_participants(&state, event_id).await?;

    for p in &participants {
        flag_orphaned_keys(&event, p);
    }

    let records: Vec<ExportRecord<'_>> = participants
        .iter()
        .map(|p| ExportRecord {
            created_at: p.created_at,
            responses: &p.responses.0,
        })
        .collect();

    let csv = reconcile::render_csv(&event.form_fields.0, &records);
    let file_name = reconcile::export_file_name(&event.title);

    tracing::info!(
        event_id,
        rows = records.len(),
        user_id = admin.user_id,
        "Participant CSV exported",
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    ))
}

/// Fetch event metadata and the participant list concurrently; neither
/// read depends on the other.
async fn fetch_event_and_participants(
    state: &AppState,
    event_id: DbId,
) -> AppResult<(Event, Vec<Participant>)> {
    let (event, participants) = tokio::try_join!(
        EventRepo::find_by_id(&state.pool, event_id),
        ParticipantRepo::list_for_event(&state.pool, event_id),
    )?;

    let event = event.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Event",
        id: event_id,
    }))?;

    Ok((event, participants))
}

/// Log response keys that match neither a current label nor a field id.
///
/// These are answers stranded by a label rename after label-keyed records
/// were written. The gap is surfaced rather than silently resolved; a
/// data migration is the actual fix.
fn flag_orphaned_keys(event: &Event, participant: &Participant) {
    let orphaned = reconcile::unmatched_keys(&event.form_fields.0, &participant.responses.0);
    if !orphaned.is_empty() {
        tracing::warn!(
            event_id = event.id,
            participant_id = participant.id,
            keys = ?orphaned,
            "Responses contain keys unreachable under the current field schema",
        );
    }
}
