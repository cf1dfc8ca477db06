use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use barangay::{
    model::{api::CountDto, notification::NotificationDto},
    server::controller::notification::{
        get_notifications, get_unread_count, mark_all_notifications_read,
        mark_notification_read,
    },
};
use barangay_test_utils::prelude::*;

use crate::util::{app_state, body_json, sign_in};

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Notification)
        .build()
        .await
}

/// Expect only the signed-in user's notifications to be listed
#[tokio::test]
async fn lists_own_notifications() -> Result<(), TestError> {
    let test = setup().await?;
    let other = test.user().insert_user("resident").await?;
    test.notification().insert_notification(other.id, false).await?;
    let user = sign_in(&test, "resident").await?;
    test.notification().insert_notification(user.id, false).await?;

    let result = get_notifications(State(app_state(&test)), test.session.clone()).await;
    let notifications: Vec<NotificationDto> = body_json(result.unwrap().into_response()).await;

    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id, user.id);

    Ok(())
}

/// Expect mark all read to zero the unread count
#[tokio::test]
async fn mark_all_read_clears_unread_count() -> Result<(), TestError> {
    let test = setup().await?;
    let user = sign_in(&test, "resident").await?;
    test.notification().insert_notification(user.id, false).await?;
    test.notification().insert_notification(user.id, false).await?;
    let state = app_state(&test);

    let result = get_unread_count(State(state.clone()), test.session.clone()).await;
    let unread: CountDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(unread.count, 2);

    let result = mark_all_notifications_read(State(state.clone()), test.session.clone()).await;
    let changed: CountDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(changed.count, 2);

    let result = get_unread_count(State(state), test.session.clone()).await;
    let unread: CountDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(unread.count, 0);

    Ok(())
}

/// Expect 403 when marking another user's notification
#[tokio::test]
async fn cannot_mark_other_users_notification() -> Result<(), TestError> {
    let test = setup().await?;
    let other = test.user().insert_user("resident").await?;
    let notification = test.notification().insert_notification(other.id, false).await?;
    sign_in(&test, "resident").await?;

    let result = mark_notification_read(
        State(app_state(&test)),
        test.session.clone(),
        Path(notification.id),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
