use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{api::{CountDto, ErrorDto}, notification::NotificationDto},
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::notification::NotificationService,
    },
};

pub static NOTIFICATION_TAG: &str = "notification";

/// List the signed-in user's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Success when listing notifications", body = Vec<NotificationDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let notifications = NotificationService::new(&state.db, &state.feed)
        .get_notifications(user.id)
        .await?;

    Ok((StatusCode::OK, axum::Json(notifications)))
}

/// Count the signed-in user's unread notifications
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Success when counting unread notifications", body = CountDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_unread_count(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let count = NotificationService::new(&state.db, &state.feed)
        .unread_count(user.id)
        .await?;

    Ok((StatusCode::OK, axum::Json(count)))
}

/// Mark one notification as read
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationDto),
        (status = 403, description = "Notification belongs to another user", body = ErrorDto),
        (status = 404, description = "User or notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let notification = NotificationService::new(&state.db, &state.feed)
        .mark_read(user.id, id)
        .await?;

    Ok((StatusCode::OK, axum::Json(notification)))
}

/// Mark all of the signed-in user's notifications as read
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number of notifications marked read", body = CountDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let count = NotificationService::new(&state.db, &state.feed)
        .mark_all_read(user.id)
        .await?;

    Ok((StatusCode::OK, axum::Json(count)))
}
