use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use barangay::{
    model::resident::{CreateResidentDto, ResidentDto},
    server::controller::resident::{
        create_resident, delete_resident, get_residents, ResidentQuery,
    },
};
use barangay_test_utils::prelude::*;
use serde_json::json;

use crate::util::{app_state, body_json, sign_in};

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::Resident)
        .build()
        .await
}

fn new_resident() -> CreateResidentDto {
    serde_json::from_value(json!({
        "first_name": "Maria",
        "last_name": "Santos",
        "address": "Purok 3, Barangay San Isidro",
        "gender": "female",
        "civil_status": "married"
    }))
    .unwrap()
}

/// Expect the search query to keep only matching residents
#[tokio::test]
async fn search_returns_matching_residents() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "health_worker").await?;
    test.resident().insert_resident("Maria", "Santos").await?;
    test.resident().insert_resident("Juan", "Dela Cruz").await?;

    let result = get_residents(
        State(app_state(&test)),
        test.session.clone(),
        Query(ResidentQuery {
            search: Some("Santos".to_string()),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let residents: Vec<ResidentDto> = body_json(resp).await;
    assert_eq!(residents.len(), 1);
    assert_eq!(residents[0].first_name, "Maria");

    Ok(())
}

/// Expect residents to be refused the registry
#[tokio::test]
async fn residents_cannot_list_registry() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "resident").await?;

    let result = get_residents(
        State(app_state(&test)),
        test.session.clone(),
        Query(ResidentQuery { search: None }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 201 with the registered resident for an admin
#[tokio::test]
async fn admin_registers_resident() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "admin").await?;

    let result = create_resident(
        State(app_state(&test)),
        test.session.clone(),
        Json(new_resident()),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resident: ResidentDto = body_json(resp).await;
    assert_eq!(resident.last_name, "Santos");

    Ok(())
}

/// Expect 400 when a required field is blank
#[tokio::test]
async fn blank_name_is_rejected() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "admin").await?;

    let mut resident = new_resident();
    resident.first_name = "  ".to_string();

    let result = create_resident(State(app_state(&test)), test.session.clone(), Json(resident)).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect tanods to be refused resident edits
#[tokio::test]
async fn tanod_cannot_register_resident() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "tanod").await?;

    let result = create_resident(
        State(app_state(&test)),
        test.session.clone(),
        Json(new_resident()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 204 on delete and 404 when deleting again
#[tokio::test]
async fn deletes_resident() -> Result<(), TestError> {
    let test = setup().await?;
    sign_in(&test, "superadmin").await?;
    let resident = test.resident().insert_resident("Maria", "Santos").await?;
    let state = app_state(&test);

    let result = delete_resident(State(state.clone()), test.session.clone(), Path(resident.id)).await;
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let result = delete_resident(State(state), test.session.clone(), Path(resident.id)).await;
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
