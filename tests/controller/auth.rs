use axum::{extract::State, http::StatusCode, response::IntoResponse};
use barangay::{
    model::user::{UserDto, UserRole},
    server::{
        controller::auth::{get_user, logout},
        model::session::user::SessionUserId,
    },
};
use barangay_test_utils::prelude::*;

use crate::util::{app_state, body_json, sign_in};

/// Expect 200 with role and landing path for the signed-in user
#[tokio::test]
async fn returns_signed_in_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = sign_in(&test, "tanod").await?;

    let result = get_user(State(app_state(&test)), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let dto: UserDto = body_json(resp).await;
    assert_eq!(dto.id, user.id);
    assert_eq!(dto.role, UserRole::Tanod);
    assert_eq!(dto.landing_path, "/security-portal");

    Ok(())
}

/// Expect 404 when no user is in session
#[tokio::test]
async fn returns_not_found_without_session_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let result = get_user(State(app_state(&test)), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 404 and a cleared session when the session user no longer exists
#[tokio::test]
async fn clears_session_of_missing_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    SessionUserId::insert(&test.session, 42).await.unwrap();

    let result = get_user(State(app_state(&test)), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect 500 when the user table does not exist
#[tokio::test]
async fn error_when_required_tables_dont_exist() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let result = get_user(State(app_state(&test)), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}

/// Expect a redirect home and a cleared session after logout
#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let result = logout(test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect logout without session data to still redirect
#[tokio::test]
async fn logout_without_session_redirects() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = logout(test.session).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    Ok(())
}
