use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        document::{
            CreateDocumentRequestDto, DocumentRequestDto, DocumentStatus, DocumentStatusDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::document::DocumentService,
        util::access::{has_role, DOCUMENT_MANAGERS},
    },
};

pub static DOCUMENT_TAG: &str = "document";

#[derive(Deserialize, IntoParams)]
pub struct DocumentQuery {
    /// Only return requests in this status
    pub status: Option<DocumentStatus>,
}

/// List document requests, newest first
///
/// Document managers see every request, other users only their own.
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = DOCUMENT_TAG,
    params(DocumentQuery),
    responses(
        (status = 200, description = "Success when listing document requests", body = Vec<DocumentRequestDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_document_requests(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DocumentQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let user_id = (!has_role(&user, DOCUMENT_MANAGERS)).then_some(user.id);
    let requests = DocumentService::new(&state.db, &state.feed)
        .get_requests(query.status, user_id)
        .await?;

    Ok((StatusCode::OK, axum::Json(requests)))
}

/// Request a document
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = DOCUMENT_TAG,
    request_body = CreateDocumentRequestDto,
    responses(
        (status = 201, description = "Document requested", body = DocumentRequestDto),
        (status = 400, description = "The purpose is blank", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_document_request(
    State(state): State<AppState>,
    session: Session,
    axum::Json(request): axum::Json<CreateDocumentRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let request = DocumentService::new(&state.db, &state.feed)
        .create_request(request, user.id)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(request)))
}

/// Move a document request to another status
///
/// Document managers may apply any allowed transition. The requester may only withdraw their
/// own request by rejecting it.
#[utoipa::path(
    post,
    path = "/api/documents/{id}/status",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document request ID")),
    request_body = DocumentStatusDto,
    responses(
        (status = 200, description = "Document request status changed", body = DocumentRequestDto),
        (status = 403, description = "User may not process this request", body = ErrorDto),
        (status = 404, description = "User or document request not found", body = ErrorDto),
        (status = 409, description = "The transition is not allowed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_document_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(change): axum::Json<DocumentStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let document_service = DocumentService::new(&state.db, &state.feed);

    if !has_role(&user, DOCUMENT_MANAGERS) {
        let request = document_service.get_request(id).await?;

        if request.user_id != user.id || change.status != DocumentStatus::Rejected {
            return Err(AuthError::Forbidden {
                action: "process document requests",
            }
            .into());
        }
    }

    let request = document_service.set_status(id, change).await?;

    Ok((StatusCode::OK, axum::Json(request)))
}
