//! Handlers for the `/events` resource (public browse) and the
//! admin-gated event management endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use portal_core::error::CoreError;
use portal_core::forms;
use portal_core::types::DbId;
use portal_db::models::event::{CreateEvent, Event, UpdateEvent};
use portal_db::repositories::EventRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::admin_gate::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events
///
/// Public listing: active events, soonest first.
pub async fn list_public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = EventRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(DataResponse { data: event }))
}

/// GET /api/v1/admin/events
///
/// Every event, newest first, for the admin console.
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = EventRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/admin/events
///
/// Create an event. The field schema starts empty; the form-builder flow
/// populates it through the update endpoint.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<Event>>)> {
    input.validate()?;

    let event = EventRepo::create(&state.pool, &input).await?;

    tracing::info!(
        event_id = event.id,
        title = %event.title,
        user_id = admin.user_id,
        "Event created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/v1/admin/events/{id}
///
/// Full-payload update, including the form field schema. Fields arriving
/// without an id are new and get one assigned here; existing ids pass
/// through untouched so stored responses stay resolvable.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<DataResponse<Event>>> {
    input.validate()?;

    let mut fields = input.form_fields.clone();
    forms::assign_field_ids(&mut fields);

    let event = EventRepo::update(&state.pool, id, &input, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    tracing::info!(event_id = id, user_id = admin.user_id, "Event updated");

    Ok(Json(DataResponse { data: event }))
}
