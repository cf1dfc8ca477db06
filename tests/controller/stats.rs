use axum::{extract::State, http::StatusCode, response::IntoResponse};
use barangay::{model::stats::DashboardStatsDto, server::controller::stats::get_dashboard_stats};
use barangay_test_utils::prelude::*;

use crate::util::{app_state, body_json, sign_in};

/// Expect staff to receive the dashboard counts
#[tokio::test]
async fn staff_receive_stats() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    sign_in(&test, "admin").await?;
    test.resident().insert_resident("Maria", "Santos").await?;
    test.incident().insert_incident("pending", "high").await?;

    let result = get_dashboard_stats(State(app_state(&test)), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let stats: DashboardStatsDto = body_json(resp).await;
    assert_eq!(stats.total_residents, 1);
    assert_eq!(stats.pending_incidents, 1);
    assert_eq!(stats.high_priority_incidents, 1);

    Ok(())
}

/// Expect residents to be refused the dashboard counts
#[tokio::test]
async fn residents_are_refused() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    sign_in(&test, "resident").await?;

    let result = get_dashboard_stats(State(app_state(&test)), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
