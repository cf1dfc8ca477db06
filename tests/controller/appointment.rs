use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use barangay::{
    model::appointment::{
        AppointmentDto, AppointmentStatus, AppointmentType, AvailableSlotsDto,
        CreateAppointmentDto,
    },
    server::controller::appointment::{
        complete_appointment, create_appointment, delete_appointment, get_appointments,
        get_available_slots, AppointmentQuery, SlotQuery,
    },
};
use barangay_test_utils::prelude::*;
use chrono::NaiveDate;

use crate::util::{app_state, body_json, sign_in};

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Appointment)
        .with_table(entity::prelude::Notification)
        .with_statement(migration::APPOINTMENT_SLOT_INDEX_SQL)
        .build()
        .await
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 3).unwrap()
}

fn booking(user_id: Option<i32>, time: &str) -> CreateAppointmentDto {
    CreateAppointmentDto {
        user_id,
        appointment_type: AppointmentType::Vaccination,
        service: "Flu vaccine".to_string(),
        appointment_date: date(),
        appointment_time: time.to_string(),
        notes: None,
    }
}

/// Expect a booked time to disappear from the available slots
#[tokio::test]
async fn booked_slot_is_not_available() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "resident").await?;
    let state = app_state(&test);

    let result = create_appointment(
        State(state.clone()),
        test.session.clone(),
        Json(booking(None, "10:00")),
    )
    .await;
    assert_eq!(result.unwrap().into_response().status(), StatusCode::CREATED);

    let result = get_available_slots(
        State(state),
        test.session.clone(),
        Query(SlotQuery { date: date() }),
    )
    .await;
    let slots: AvailableSlotsDto = body_json(result.unwrap().into_response()).await;

    assert!(!slots.slots.contains(&"10:00".to_string()));

    Ok(())
}

/// Expect 409 when booking a slot that is taken
#[tokio::test]
async fn taken_slot_conflicts() -> Result<(), TestError> {
    let test = setup().await?;
    let user = sign_in(&test, "resident").await?;
    test.appointment()
        .insert_appointment(user.id, date(), "10:00", "pending")
        .await?;

    let result = create_appointment(
        State(app_state(&test)),
        test.session.clone(),
        Json(booking(None, "10:00")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expect residents to be refused booking for another user
#[tokio::test]
async fn resident_cannot_book_for_others() -> Result<(), TestError> {
    let test = setup().await?;
    let other = test.user().insert_user("resident").await?;
    sign_in(&test, "resident").await?;

    let result = create_appointment(
        State(app_state(&test)),
        test.session.clone(),
        Json(booking(Some(other.id), "11:00")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect residents to only list their own appointments
#[tokio::test]
async fn listing_is_scoped_to_owner() -> Result<(), TestError> {
    let test = setup().await?;
    let other = test.user().insert_user("resident").await?;
    test.appointment()
        .insert_appointment(other.id, date(), "08:00", "pending")
        .await?;
    let user = sign_in(&test, "resident").await?;
    test.appointment()
        .insert_appointment(user.id, date(), "09:00", "pending")
        .await?;

    let result = get_appointments(
        State(app_state(&test)),
        test.session.clone(),
        Query(AppointmentQuery {
            date: Some(date()),
            status: None,
        }),
    )
    .await;
    let appointments: Vec<AppointmentDto> = body_json(result.unwrap().into_response()).await;

    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].user_id, user.id);

    Ok(())
}

/// Expect the owner to cancel their own appointment through delete
#[tokio::test]
async fn owner_cancels_through_delete() -> Result<(), TestError> {
    let test = setup().await?;
    let user = sign_in(&test, "resident").await?;
    let appointment = test
        .appointment()
        .insert_appointment(user.id, date(), "09:00", "confirmed")
        .await?;

    let result =
        delete_appointment(State(app_state(&test)), test.session.clone(), Path(appointment.id))
            .await;
    let cancelled: AppointmentDto = body_json(result.unwrap().into_response()).await;

    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    Ok(())
}

/// Expect 403 when cancelling another user's appointment
#[tokio::test]
async fn cannot_cancel_other_users_appointment() -> Result<(), TestError> {
    let test = setup().await?;
    let other = test.user().insert_user("resident").await?;
    let appointment = test
        .appointment()
        .insert_appointment(other.id, date(), "09:00", "pending")
        .await?;
    sign_in(&test, "resident").await?;

    let result =
        delete_appointment(State(app_state(&test)), test.session.clone(), Path(appointment.id))
            .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 409 when completing a pending appointment
#[tokio::test]
async fn pending_appointment_cannot_complete() -> Result<(), TestError> {
    let test = setup().await?;
    let user = test.user().insert_user("resident").await?;
    let appointment = test
        .appointment()
        .insert_appointment(user.id, date(), "09:00", "pending")
        .await?;
    sign_in(&test, "health_worker").await?;

    let result =
        complete_appointment(State(app_state(&test)), test.session.clone(), Path(appointment.id))
            .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}
