//! Handlers for registration submission and status.
//!
//! The browser-side form renderer collects a `responses` map keyed by
//! field id and posts it here; this is the only write path for
//! `participants` rows. Responses are validated against the event's
//! schema and stored as submitted.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use portal_core::error::CoreError;
use portal_core::forms::{self, ResponseMap};
use portal_core::types::DbId;
use portal_db::models::participant::{CreateParticipant, Participant};
use portal_db::repositories::{EventRepo, ParticipantRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /registrations`.
#[derive(Debug, Deserialize)]
pub struct SubmitRegistration {
    pub event_id: DbId,
    pub responses: ResponseMap,
}

/// POST /api/v1/registrations
///
/// Register the authenticated user for an event. A second attempt for the
/// same (event, user) pair trips `uq_participants_event_user` and comes
/// back as 409; no new record is written and the caller shows an
/// "already registered" message.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SubmitRegistration>,
) -> AppResult<(StatusCode, Json<DataResponse<Participant>>)> {
    let event = EventRepo::find_by_id(&state.pool, input.event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: input.event_id,
        }))?;

    if !event.accepts_registrations() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Registration for this event is closed".into(),
        )));
    }

    forms::validate_responses(&event.form_fields.0, &input.responses)?;

    let participant = ParticipantRepo::create(
        &state.pool,
        &CreateParticipant {
            event_id: input.event_id,
            user_id: user.user_id,
            responses: input.responses,
        },
    )
    .await?;

    tracing::info!(
        event_id = input.event_id,
        user_id = user.user_id,
        participant_id = participant.id,
        "Registration recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: participant })))
}

/// GET /api/v1/registrations/{event_id}
///
/// The authenticated user's registration for an event, or null. Drives
/// the "already registered" state on the public event page.
pub async fn status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<Participant>>>> {
    let participant =
        ParticipantRepo::find_by_event_and_user(&state.pool, event_id, user.user_id).await?;
    Ok(Json(DataResponse { data: participant }))
}
