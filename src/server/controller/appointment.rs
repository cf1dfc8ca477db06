use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        appointment::{
            AppointmentDto, AppointmentStatus, AvailableSlotsDto, ConfirmAppointmentDto,
            CreateAppointmentDto, UpdateAppointmentDto,
        },
        user::UserDto,
    },
    server::{
        controller::util::get_user::get_user_from_session,
        data::appointment::AppointmentFilter,
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::appointment::AppointmentService,
        util::access::{can_access_owned, has_role, require_role, APPOINTMENT_MANAGERS},
    },
};

pub static APPOINTMENT_TAG: &str = "appointment";

#[derive(Deserialize, IntoParams)]
pub struct AppointmentQuery {
    /// Only return appointments on this date
    pub date: Option<NaiveDate>,
    /// Only return appointments in this status
    pub status: Option<AppointmentStatus>,
}

#[derive(Deserialize, IntoParams)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

/// List appointments in schedule order
///
/// Appointment managers see every appointment, other users only their own.
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = APPOINTMENT_TAG,
    params(AppointmentQuery),
    responses(
        (status = 200, description = "Success when listing appointments", body = Vec<AppointmentDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointments(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AppointmentQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let filter = AppointmentFilter {
        date: query.date,
        status: query.status,
        user_id: (!has_role(&user, APPOINTMENT_MANAGERS)).then_some(user.id),
    };
    let appointments = AppointmentService::new(&state.db, &state.feed)
        .get_appointments(filter)
        .await?;

    Ok((StatusCode::OK, axum::Json(appointments)))
}

/// List the free slots of a date
#[utoipa::path(
    get,
    path = "/api/appointments/slots",
    tag = APPOINTMENT_TAG,
    params(SlotQuery),
    responses(
        (status = 200, description = "Success when listing free slots", body = AvailableSlotsDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_available_slots(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SlotQuery>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let slots = AppointmentService::new(&state.db, &state.feed)
        .get_available_slots(query.date)
        .await?;

    Ok((StatusCode::OK, axum::Json(slots)))
}

/// Retrieve one appointment
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Success when retrieving the appointment", body = AppointmentDto),
        (status = 403, description = "Appointment belongs to another user", body = ErrorDto),
        (status = 404, description = "User or appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let appointment = owned_appointment(&state, &user, id, "view this appointment").await?;

    Ok((StatusCode::OK, axum::Json(appointment)))
}

/// Book an appointment
///
/// Appointment managers may book for another user, everyone else books for themselves.
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = APPOINTMENT_TAG,
    request_body = CreateAppointmentDto,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentDto),
        (status = 400, description = "A required field is blank", body = ErrorDto),
        (status = 403, description = "User may not book for another user", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "The slot is unknown or already booked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    session: Session,
    axum::Json(appointment): axum::Json<CreateAppointmentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let owner_id = appointment.user_id.unwrap_or(user.id);
    if owner_id != user.id {
        require_role(&user, APPOINTMENT_MANAGERS, "book appointments for other users")?;
    }

    let appointment = AppointmentService::new(&state.db, &state.feed)
        .create_appointment(appointment, owner_id)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(appointment)))
}

/// Update an appointment
///
/// Moving the appointment to another date or time requires the target slot to be free.
#[utoipa::path(
    patch,
    path = "/api/appointments/{id}",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentDto,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentDto),
        (status = 400, description = "A provided field is blank", body = ErrorDto),
        (status = 403, description = "User may not manage appointments", body = ErrorDto),
        (status = 404, description = "User or appointment not found", body = ErrorDto),
        (status = 409, description = "The slot is unknown or already booked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(patch): axum::Json<UpdateAppointmentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, APPOINTMENT_MANAGERS, "manage appointments")?;

    let appointment = AppointmentService::new(&state.db, &state.feed)
        .update_appointment(id, patch)
        .await?;

    Ok((StatusCode::OK, axum::Json(appointment)))
}

/// Cancel an appointment
///
/// Appointments are never removed, deleting one cancels it and releases its slot.
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = AppointmentDto),
        (status = 403, description = "Appointment belongs to another user", body = ErrorDto),
        (status = 404, description = "User or appointment not found", body = ErrorDto),
        (status = 409, description = "The appointment already finished", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    cancel(state, session, id).await
}

/// Cancel an appointment
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/cancel",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = AppointmentDto),
        (status = 403, description = "Appointment belongs to another user", body = ErrorDto),
        (status = 404, description = "User or appointment not found", body = ErrorDto),
        (status = 409, description = "The appointment already finished", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    cancel(state, session, id).await
}

/// Confirm a pending appointment, optionally assigning staff
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/confirm",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = ConfirmAppointmentDto,
    responses(
        (status = 200, description = "Appointment confirmed", body = AppointmentDto),
        (status = 403, description = "User may not manage appointments", body = ErrorDto),
        (status = 404, description = "User, staff or appointment not found", body = ErrorDto),
        (status = 409, description = "The transition is not allowed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(confirmation): axum::Json<ConfirmAppointmentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, APPOINTMENT_MANAGERS, "manage appointments")?;

    let appointment = AppointmentService::new(&state.db, &state.feed)
        .confirm(id, confirmation)
        .await?;

    Ok((StatusCode::OK, axum::Json(appointment)))
}

/// Mark a confirmed appointment as completed
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/complete",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment completed", body = AppointmentDto),
        (status = 403, description = "User may not manage appointments", body = ErrorDto),
        (status = 404, description = "User or appointment not found", body = ErrorDto),
        (status = 409, description = "The transition is not allowed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, APPOINTMENT_MANAGERS, "manage appointments")?;

    let appointment = AppointmentService::new(&state.db, &state.feed)
        .complete(id)
        .await?;

    Ok((StatusCode::OK, axum::Json(appointment)))
}

/// Mark a confirmed appointment as missed
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/no-show",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment marked as missed", body = AppointmentDto),
        (status = 403, description = "User may not manage appointments", body = ErrorDto),
        (status = 404, description = "User or appointment not found", body = ErrorDto),
        (status = 409, description = "The transition is not allowed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_appointment_no_show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_role(&user, APPOINTMENT_MANAGERS, "manage appointments")?;

    let appointment = AppointmentService::new(&state.db, &state.feed)
        .mark_no_show(id)
        .await?;

    Ok((StatusCode::OK, axum::Json(appointment)))
}

async fn cancel(
    state: AppState,
    session: Session,
    id: i32,
) -> Result<(StatusCode, axum::Json<AppointmentDto>), Error> {
    let user = get_user_from_session(&state, &session).await?;
    owned_appointment(&state, &user, id, "cancel this appointment").await?;

    let appointment = AppointmentService::new(&state.db, &state.feed)
        .cancel(id)
        .await?;

    Ok((StatusCode::OK, axum::Json(appointment)))
}

/// Fetches an appointment the user owns or manages.
async fn owned_appointment(
    state: &AppState,
    user: &UserDto,
    id: i32,
    action: &'static str,
) -> Result<AppointmentDto, Error> {
    let appointment = AppointmentService::new(&state.db, &state.feed)
        .get_appointment(id)
        .await?;

    if !can_access_owned(user, appointment.user_id, APPOINTMENT_MANAGERS) {
        return Err(AuthError::Forbidden { action }.into());
    }

    Ok(appointment)
}
