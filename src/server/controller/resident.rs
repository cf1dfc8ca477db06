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
        resident::{CreateResidentDto, ResidentDto, UpdateResidentDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::resident::ResidentService,
        util::access::{require_role, require_staff, RESIDENT_WRITERS},
    },
};

pub static RESIDENT_TAG: &str = "resident";

#[derive(Deserialize, IntoParams)]
pub struct ResidentQuery {
    /// Case-insensitive substring matched against the name, address and contact fields
    pub search: Option<String>,
}

/// List residents
#[utoipa::path(
    get,
    path = "/api/residents",
    tag = RESIDENT_TAG,
    params(ResidentQuery),
    responses(
        (status = 200, description = "Success when listing residents", body = Vec<ResidentDto>),
        (status = 403, description = "User is not staff", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_residents(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ResidentQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(&user, "view residents")?;

    let residents = ResidentService::new(&state.db, &state.feed)
        .get_residents(query.search.as_deref())
        .await?;

    Ok((StatusCode::OK, axum::Json(residents)))
}

/// Retrieve one resident
#[utoipa::path(
    get,
    path = "/api/residents/{id}",
    tag = RESIDENT_TAG,
    params(("id" = i32, Path, description = "Resident ID")),
    responses(
        (status = 200, description = "Success when retrieving the resident", body = ResidentDto),
        (status = 403, description = "User is not staff", body = ErrorDto),
        (status = 404, description = "User or resident not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_resident(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(&user, "view residents")?;

    let resident = ResidentService::new(&state.db, &state.feed)
        .get_resident(id)
        .await?;

    Ok((StatusCode::OK, axum::Json(resident)))
}

/// Register a resident
#[utoipa::path(
    post,
    path = "/api/residents",
    tag = RESIDENT_TAG,
    request_body = CreateResidentDto,
    responses(
        (status = 201, description = "Resident registered", body = ResidentDto),
        (status = 400, description = "A required field is blank", body = ErrorDto),
        (status = 403, description = "User may not edit residents", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_resident(
    State(state): State<AppState>,
    session: Session,
    axum::Json(resident): axum::Json<CreateResidentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, RESIDENT_WRITERS, "edit residents")?;

    let resident = ResidentService::new(&state.db, &state.feed)
        .create_resident(resident)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(resident)))
}

/// Update a resident
#[utoipa::path(
    patch,
    path = "/api/residents/{id}",
    tag = RESIDENT_TAG,
    params(("id" = i32, Path, description = "Resident ID")),
    request_body = UpdateResidentDto,
    responses(
        (status = 200, description = "Resident updated", body = ResidentDto),
        (status = 400, description = "A provided field is blank", body = ErrorDto),
        (status = 403, description = "User may not edit residents", body = ErrorDto),
        (status = 404, description = "User or resident not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_resident(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(patch): axum::Json<UpdateResidentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, RESIDENT_WRITERS, "edit residents")?;

    let resident = ResidentService::new(&state.db, &state.feed)
        .update_resident(id, patch)
        .await?;

    Ok((StatusCode::OK, axum::Json(resident)))
}

/// Delete a resident
#[utoipa::path(
    delete,
    path = "/api/residents/{id}",
    tag = RESIDENT_TAG,
    params(("id" = i32, Path, description = "Resident ID")),
    responses(
        (status = 204, description = "Resident deleted"),
        (status = 403, description = "User may not edit residents", body = ErrorDto),
        (status = 404, description = "User or resident not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_resident(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, RESIDENT_WRITERS, "edit residents")?;

    ResidentService::new(&state.db, &state.feed)
        .delete_resident(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
