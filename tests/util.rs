//! Shared helpers for controller integration tests.

use axum::{body::to_bytes, response::Response};
use barangay::server::model::{app::AppState, session::user::SessionUserId};
use barangay_test_utils::{model::UserModel, prelude::*};
use serde::de::DeserializeOwned;

/// Inserts a user with `role` and places it in the test session.
pub async fn sign_in(test: &TestContext, role: &str) -> Result<UserModel, TestError> {
    let user = test.user().insert_user(role).await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    Ok(user)
}

pub fn app_state(test: &TestContext) -> AppState {
    test.to_app_state::<AppState>()
}

/// Reads a JSON response body.
pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
