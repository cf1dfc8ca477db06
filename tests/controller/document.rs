use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use barangay::{
    model::document::{
        CreateDocumentRequestDto, DocumentRequestDto, DocumentStatus, DocumentStatusDto,
        DocumentType,
    },
    server::controller::document::{create_document_request, set_document_status},
};
use barangay_test_utils::prelude::*;

use crate::util::{app_state, body_json, sign_in};

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::DocumentRequest)
        .with_table(entity::prelude::Notification)
        .build()
        .await
}

fn change(status: DocumentStatus) -> Json<DocumentStatusDto> {
    Json(DocumentStatusDto {
        status,
        remarks: None,
    })
}

/// Expect 201 with a pending request owned by the caller
#[tokio::test]
async fn resident_requests_document() -> Result<(), TestError> {
    let test = setup().await?;
    let user = sign_in(&test, "resident").await?;

    let result = create_document_request(
        State(app_state(&test)),
        test.session.clone(),
        Json(CreateDocumentRequestDto {
            document_type: DocumentType::CertificateOfResidency,
            purpose: "School enrollment".to_string(),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let request: DocumentRequestDto = body_json(resp).await;
    assert_eq!(request.user_id, user.id);
    assert_eq!(request.status, DocumentStatus::Pending);

    Ok(())
}

/// Expect the requester to withdraw their own request
#[tokio::test]
async fn requester_withdraws_request() -> Result<(), TestError> {
    let test = setup().await?;
    let user = sign_in(&test, "resident").await?;
    let request = test
        .document()
        .insert_document_request(user.id, "pending")
        .await?;

    let result = set_document_status(
        State(app_state(&test)),
        test.session.clone(),
        Path(request.id),
        change(DocumentStatus::Rejected),
    )
    .await;

    let request: DocumentRequestDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(request.status, DocumentStatus::Rejected);

    Ok(())
}

/// Expect the requester to be refused processing their own request
#[tokio::test]
async fn requester_cannot_process_request() -> Result<(), TestError> {
    let test = setup().await?;
    let user = sign_in(&test, "resident").await?;
    let request = test
        .document()
        .insert_document_request(user.id, "pending")
        .await?;

    let result = set_document_status(
        State(app_state(&test)),
        test.session.clone(),
        Path(request.id),
        change(DocumentStatus::Processing),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 409 when an admin releases a request that is not ready
#[tokio::test]
async fn release_before_ready_conflicts() -> Result<(), TestError> {
    let test = setup().await?;
    let user = test.user().insert_user("resident").await?;
    let request = test
        .document()
        .insert_document_request(user.id, "processing")
        .await?;
    sign_in(&test, "admin").await?;

    let result = set_document_status(
        State(app_state(&test)),
        test.session.clone(),
        Path(request.id),
        change(DocumentStatus::Released),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}
