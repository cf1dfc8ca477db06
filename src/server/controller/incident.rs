use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        incident::{
            AssignIncidentDto, CreateIncidentDto, IncidentDto, IncidentStatus,
            IncidentStatusDto, ResolveIncidentDto, UpdateIncidentDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::incident::IncidentService,
        util::access::{has_role, require_role, INCIDENT_MANAGERS},
    },
};

pub static INCIDENT_TAG: &str = "incident";

#[derive(Deserialize, IntoParams)]
pub struct IncidentQuery {
    /// Only return incidents in this status
    pub status: Option<IncidentStatus>,
}

/// List incidents, most recent first
///
/// Incident managers see every incident, other users only the incidents they reported.
#[utoipa::path(
    get,
    path = "/api/incidents",
    tag = INCIDENT_TAG,
    params(IncidentQuery),
    responses(
        (status = 200, description = "Success when listing incidents", body = Vec<IncidentDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_incidents(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<IncidentQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let reported_by = (!has_role(&user, INCIDENT_MANAGERS)).then_some(user.id);
    let incidents = IncidentService::new(&state.db, &state.feed)
        .get_incidents(query.status, reported_by)
        .await?;

    Ok((StatusCode::OK, axum::Json(incidents)))
}

/// Retrieve one incident
#[utoipa::path(
    get,
    path = "/api/incidents/{id}",
    tag = INCIDENT_TAG,
    params(("id" = i32, Path, description = "Incident ID")),
    responses(
        (status = 200, description = "Success when retrieving the incident", body = IncidentDto),
        (status = 403, description = "User neither reported nor manages the incident", body = ErrorDto),
        (status = 404, description = "User or incident not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_incident(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let incident = IncidentService::new(&state.db, &state.feed)
        .get_incident(id)
        .await?;

    let is_reporter = incident.reported_by == Some(user.id);
    if !is_reporter && !has_role(&user, INCIDENT_MANAGERS) {
        return Err(AuthError::Forbidden {
            action: "view this incident",
        }
        .into());
    }

    Ok((StatusCode::OK, axum::Json(incident)))
}

/// Report an incident
///
/// Any signed-in user may report an incident, the report is recorded as theirs.
#[utoipa::path(
    post,
    path = "/api/incidents",
    tag = INCIDENT_TAG,
    request_body = CreateIncidentDto,
    responses(
        (status = 201, description = "Incident reported", body = IncidentDto),
        (status = 400, description = "A required field is blank", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_incident(
    State(state): State<AppState>,
    session: Session,
    axum::Json(incident): axum::Json<CreateIncidentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let incident = IncidentService::new(&state.db, &state.feed)
        .create_incident(incident, Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, axum::Json(incident)))
}

/// Update an incident
#[utoipa::path(
    patch,
    path = "/api/incidents/{id}",
    tag = INCIDENT_TAG,
    params(("id" = i32, Path, description = "Incident ID")),
    request_body = UpdateIncidentDto,
    responses(
        (status = 200, description = "Incident updated", body = IncidentDto),
        (status = 400, description = "A provided field is blank", body = ErrorDto),
        (status = 403, description = "User may not manage incidents", body = ErrorDto),
        (status = 404, description = "User or incident not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_incident(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(patch): axum::Json<UpdateIncidentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, INCIDENT_MANAGERS, "manage incidents")?;

    let incident = IncidentService::new(&state.db, &state.feed)
        .update_incident(id, patch)
        .await?;

    Ok((StatusCode::OK, axum::Json(incident)))
}

/// Close an incident
///
/// Incidents are never removed, deleting one moves it to the closed status.
#[utoipa::path(
    delete,
    path = "/api/incidents/{id}",
    tag = INCIDENT_TAG,
    params(("id" = i32, Path, description = "Incident ID")),
    responses(
        (status = 200, description = "Incident closed", body = IncidentDto),
        (status = 403, description = "User may not manage incidents", body = ErrorDto),
        (status = 404, description = "User or incident not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn close_incident(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, INCIDENT_MANAGERS, "manage incidents")?;

    let incident = IncidentService::new(&state.db, &state.feed)
        .close_incident(id)
        .await?;

    Ok((StatusCode::OK, axum::Json(incident)))
}

/// Move an incident to another status
#[utoipa::path(
    post,
    path = "/api/incidents/{id}/status",
    tag = INCIDENT_TAG,
    params(("id" = i32, Path, description = "Incident ID")),
    request_body = IncidentStatusDto,
    responses(
        (status = 200, description = "Incident status changed", body = IncidentDto),
        (status = 403, description = "User may not manage incidents", body = ErrorDto),
        (status = 404, description = "User or incident not found", body = ErrorDto),
        (status = 409, description = "The transition is not allowed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_incident_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(change): axum::Json<IncidentStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, INCIDENT_MANAGERS, "manage incidents")?;

    let incident = IncidentService::new(&state.db, &state.feed)
        .set_status(id, change.status)
        .await?;

    Ok((StatusCode::OK, axum::Json(incident)))
}

/// Assign an officer to an incident
///
/// A pending incident moves to investigating.
#[utoipa::path(
    post,
    path = "/api/incidents/{id}/assign",
    tag = INCIDENT_TAG,
    params(("id" = i32, Path, description = "Incident ID")),
    request_body = AssignIncidentDto,
    responses(
        (status = 200, description = "Incident assigned", body = IncidentDto),
        (status = 403, description = "User may not manage incidents", body = ErrorDto),
        (status = 404, description = "User, assignee or incident not found", body = ErrorDto),
        (status = 409, description = "The incident is closed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_incident(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(assignment): axum::Json<AssignIncidentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, INCIDENT_MANAGERS, "manage incidents")?;

    let incident = IncidentService::new(&state.db, &state.feed)
        .assign(id, assignment.assignee_id)
        .await?;

    Ok((StatusCode::OK, axum::Json(incident)))
}

/// Resolve an incident with resolution notes
#[utoipa::path(
    post,
    path = "/api/incidents/{id}/resolve",
    tag = INCIDENT_TAG,
    params(("id" = i32, Path, description = "Incident ID")),
    request_body = ResolveIncidentDto,
    responses(
        (status = 200, description = "Incident resolved", body = IncidentDto),
        (status = 400, description = "Resolution notes are blank", body = ErrorDto),
        (status = 403, description = "User may not manage incidents", body = ErrorDto),
        (status = 404, description = "User or incident not found", body = ErrorDto),
        (status = 409, description = "The incident is closed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resolve_incident(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(resolution): axum::Json<ResolveIncidentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, INCIDENT_MANAGERS, "manage incidents")?;

    let incident = IncidentService::new(&state.db, &state.feed)
        .resolve(id, resolution)
        .await?;

    Ok((StatusCode::OK, axum::Json(incident)))
}
