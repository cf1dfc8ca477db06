use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use barangay::{
    model::incident::{
        AssignIncidentDto, IncidentDto, IncidentStatus, IncidentStatusDto, ResolveIncidentDto,
    },
    server::controller::incident::{
        assign_incident, create_incident, get_incident, get_incidents, resolve_incident,
        set_incident_status, IncidentQuery,
    },
};
use barangay_test_utils::prelude::*;
use serde_json::json;

use crate::util::{app_state, body_json, sign_in};

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::SecurityIncident)
        .build()
        .await
}

/// Expect any signed-in user to report an incident recorded as theirs
#[tokio::test]
async fn resident_reports_incident() -> Result<(), TestError> {
    let test = setup().await?;
    let user = sign_in(&test, "resident").await?;

    let incident = serde_json::from_value(json!({
        "title": "Stolen bicycle",
        "description": "Bicycle taken from the front gate overnight",
        "incident_type": "theft",
        "location": "Purok 2"
    }))
    .unwrap();

    let result = create_incident(State(app_state(&test)), test.session.clone(), Json(incident)).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let incident: IncidentDto = body_json(resp).await;
    assert_eq!(incident.reported_by, Some(user.id));
    assert_eq!(incident.status, IncidentStatus::Pending);

    Ok(())
}

/// Expect residents to list only their own reports while tanods list every report
#[tokio::test]
async fn listing_is_scoped_to_reporter() -> Result<(), TestError> {
    let test = setup().await?;
    let other = test.user().insert_user("resident").await?;
    test.incident()
        .insert_incident_reported_by("pending", "low", Some(other.id))
        .await?;
    let user = sign_in(&test, "resident").await?;
    test.incident()
        .insert_incident_reported_by("pending", "low", Some(user.id))
        .await?;

    let result = get_incidents(
        State(app_state(&test)),
        test.session.clone(),
        Query(IncidentQuery { status: None }),
    )
    .await;
    let incidents: Vec<IncidentDto> = body_json(result.unwrap().into_response()).await;
    assert_eq!(incidents.len(), 1);
    assert_eq!(incidents[0].reported_by, Some(user.id));

    sign_in(&test, "tanod").await?;
    let result = get_incidents(
        State(app_state(&test)),
        test.session.clone(),
        Query(IncidentQuery { status: None }),
    )
    .await;
    let incidents: Vec<IncidentDto> = body_json(result.unwrap().into_response()).await;
    assert_eq!(incidents.len(), 2);

    Ok(())
}

/// Expect 403 when a resident opens another user's report
#[tokio::test]
async fn resident_cannot_view_other_report() -> Result<(), TestError> {
    let test = setup().await?;
    let other = test.user().insert_user("resident").await?;
    let incident = test
        .incident()
        .insert_incident_reported_by("pending", "low", Some(other.id))
        .await?;
    sign_in(&test, "resident").await?;

    let result = get_incident(State(app_state(&test)), test.session.clone(), Path(incident.id)).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 409 when reopening a closed incident
#[tokio::test]
async fn illegal_transition_conflicts() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "tanod").await?;
    let incident = test.incident().insert_incident("closed", "low").await?;

    let result = set_incident_status(
        State(app_state(&test)),
        test.session.clone(),
        Path(incident.id),
        Json(IncidentStatusDto {
            status: IncidentStatus::Investigating,
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expect assignment then resolution to populate assignee and resolved_at
#[tokio::test]
async fn assign_then_resolve() -> Result<(), TestError> {
    let test = setup().await?;
    let tanod = sign_in(&test, "tanod").await?;
    let incident = test.incident().insert_incident("pending", "urgent").await?;
    let state = app_state(&test);

    let result = assign_incident(
        State(state.clone()),
        test.session.clone(),
        Path(incident.id),
        Json(AssignIncidentDto {
            assignee_id: tanod.id,
        }),
    )
    .await;
    let assigned: IncidentDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(assigned.status, IncidentStatus::Investigating);
    assert_eq!(assigned.assigned_to, Some(tanod.id));

    let result = resolve_incident(
        State(state),
        test.session.clone(),
        Path(incident.id),
        Json(ResolveIncidentDto {
            resolution_notes: "Suspect returned the item".to_string(),
        }),
    )
    .await;
    let resolved: IncidentDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(resolved.status, IncidentStatus::Resolved);
    assert!(resolved.resolved_at.is_some());

    Ok(())
}

/// Expect health workers to be refused incident management
#[tokio::test]
async fn health_worker_cannot_manage_incidents() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "health_worker").await?;
    let incident = test.incident().insert_incident("pending", "low").await?;

    let result = set_incident_status(
        State(app_state(&test)),
        test.session.clone(),
        Path(incident.id),
        Json(IncidentStatusDto {
            status: IncidentStatus::Closed,
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
