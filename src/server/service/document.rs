use std::collections::HashMap;

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        document::{
            CreateDocumentRequestDto, DocumentRequestDto, DocumentStatus, DocumentStatusDto,
        },
        realtime::{ChangeEvent, ChangeTable},
    },
    server::{
        data::document::DocumentRepository,
        error::{workflow::WorkflowError, Error},
        model::db::DocumentRequestModel,
        realtime::ChangeFeed,
        service::{
            check_transition, notification::notify, retry::RetryContext, user::display_names,
        },
    },
};

/// Service for document requests such as barangay clearances.
pub struct DocumentService<'a> {
    db: &'a DatabaseConnection,
    feed: &'a ChangeFeed,
}

impl<'a> DocumentService<'a> {
    /// Creates a new instance of [`DocumentService`]
    pub fn new(db: &'a DatabaseConnection, feed: &'a ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Lists document requests, newest first.
    ///
    /// # Arguments
    /// - `status` - Only return requests in this status
    /// - `user_id` - Only return requests made by this user
    pub async fn get_requests(
        &self,
        status: Option<DocumentStatus>,
        user_id: Option<i32>,
    ) -> Result<Vec<DocumentRequestDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("get document requests", || {
            let db = db.clone();

            Box::pin(async move {
                let requests = DocumentRepository::new(&db).get_all(status, user_id).await?;
                let names =
                    display_names(&db, requests.iter().map(|request| request.user_id)).await?;

                requests
                    .into_iter()
                    .map(|request| document_dto(request, &names))
                    .collect()
            })
        })
        .await
    }

    pub async fn get_request(&self, request_id: i32) -> Result<DocumentRequestDto, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get document request ID {}", request_id), || {
            let db = db.clone();

            Box::pin(async move {
                let request = DocumentRepository::new(&db)
                    .get_by_id(request_id)
                    .await?
                    .ok_or_else(|| not_found(request_id))?;
                let names = display_names(&db, [request.user_id]).await?;

                document_dto(request, &names)
            })
        })
        .await
    }

    /// Files a pending document request for `user_id`.
    pub async fn create_request(
        &self,
        request: CreateDocumentRequestDto,
        user_id: i32,
    ) -> Result<DocumentRequestDto, Error> {
        request.validate()?;

        let model = DocumentRepository::new(self.db)
            .create(request, user_id)
            .await?;
        let request = self.to_dto(model).await?;

        self.feed.publish(ChangeEvent::insert(
            ChangeTable::Documents,
            request.id,
            &request,
        )?);
        tracing::info!(
            request_id = request.id,
            document_type = %request.document_type,
            "Document requested"
        );

        Ok(request)
    }

    /// Moves a document request to another status and notifies the requester.
    ///
    /// Setting the current status again succeeds without writing. A failure to insert the
    /// notification is logged and does not undo the status change.
    pub async fn set_status(
        &self,
        request_id: i32,
        change: DocumentStatusDto,
    ) -> Result<DocumentRequestDto, Error> {
        let document_repo = DocumentRepository::new(self.db);
        let current = document_repo
            .get_by_id(request_id)
            .await?
            .ok_or_else(|| not_found(request_id))?;

        let from: DocumentStatus = current.status.parse()?;
        if !check_transition("document request", from, change.status)? {
            return self.to_dto(current).await;
        }

        let model = document_repo
            .set_status(request_id, change.status, change.remarks)
            .await?
            .ok_or_else(|| not_found(request_id))?;
        let request = self.to_dto(model).await?;

        self.feed.publish(ChangeEvent::update(
            ChangeTable::Documents,
            request.id,
            &request,
        )?);
        tracing::info!(
            request_id = request.id,
            status = %request.status,
            "Document request status changed"
        );

        let (title, message) = status_notification(&request);
        if let Err(err) = notify(self.db, self.feed, request.user_id, title, message).await {
            tracing::warn!(
                request_id = request.id,
                "Failed to notify user of document status change: {}",
                err
            );
        }

        Ok(request)
    }

    async fn to_dto(&self, request: DocumentRequestModel) -> Result<DocumentRequestDto, Error> {
        let names = display_names(self.db, [request.user_id]).await?;

        document_dto(request, &names)
    }
}

fn status_notification(request: &DocumentRequestDto) -> (String, String) {
    let document = request.document_type.title();
    let outcome = match request.status {
        DocumentStatus::Pending => "is pending",
        DocumentStatus::Processing => "is being processed",
        DocumentStatus::Ready => "is ready for pickup at the barangay hall",
        DocumentStatus::Released => "was released",
        DocumentStatus::Rejected => "was rejected",
    };

    let mut message = format!("Your {} request {}", document, outcome);
    if let Some(remarks) = &request.remarks {
        message.push_str(&format!(": {}", remarks));
    }

    (format!("{} {}", document, request.status), message)
}

fn not_found(request_id: i32) -> Error {
    WorkflowError::NotFound {
        entity: "document request",
        id: request_id,
    }
    .into()
}

fn document_dto(
    request: DocumentRequestModel,
    names: &HashMap<i32, String>,
) -> Result<DocumentRequestDto, Error> {
    Ok(DocumentRequestDto {
        id: request.id,
        user_id: request.user_id,
        requester_name: names.get(&request.user_id).cloned(),
        document_type: request.document_type.parse()?,
        purpose: request.purpose,
        status: request.status.parse()?,
        remarks: request.remarks,
        created_at: request.created_at,
        updated_at: request.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use barangay_test_utils::prelude::*;

    use crate::server::realtime::ChangeFeed;

    async fn setup() -> Result<(TestContext, ChangeFeed), TestError> {
        let test = TestBuilder::new()
            .with_user_tables()
            .with_table(entity::prelude::DocumentRequest)
            .with_table(entity::prelude::Notification)
            .build()
            .await?;

        Ok((test, ChangeFeed::new(16)))
    }

    mod create_request {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::document::{CreateDocumentRequestDto, DocumentStatus, DocumentType},
            server::{error::Error, service::document::DocumentService},
        };

        use super::setup;

        /// Expect a pending request carrying the requester's name
        #[tokio::test]
        async fn creates_pending_request() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let user = test.user().insert_user("resident").await?;

            let document_service = DocumentService::new(&test.db, &feed);
            let request = document_service
                .create_request(
                    CreateDocumentRequestDto {
                        document_type: DocumentType::BarangayClearance,
                        purpose: "Employment".to_string(),
                    },
                    user.id,
                )
                .await
                .unwrap();

            assert_eq!(request.status, DocumentStatus::Pending);
            assert_eq!(request.requester_name.as_deref(), Some("Test Resident"));

            Ok(())
        }

        /// Expect a blank purpose to be rejected
        #[tokio::test]
        async fn rejects_blank_purpose() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let user = test.user().insert_user("resident").await?;

            let document_service = DocumentService::new(&test.db, &feed);
            let result = document_service
                .create_request(
                    CreateDocumentRequestDto {
                        document_type: DocumentType::CertificateOfIndigency,
                        purpose: " ".to_string(),
                    },
                    user.id,
                )
                .await;

            assert!(matches!(result, Err(Error::ValidationError(_))));

            Ok(())
        }
    }

    mod set_status {
        use barangay_test_utils::prelude::*;
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        use crate::{
            model::document::{DocumentStatus, DocumentStatusDto},
            server::{
                error::{workflow::WorkflowError, Error},
                service::document::DocumentService,
            },
        };

        use super::setup;

        /// Expect the status change to be saved and the requester notified
        #[tokio::test]
        async fn notifies_requester() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let user = test.user().insert_user("resident").await?;
            let request = test
                .document()
                .insert_document_request(user.id, "processing")
                .await?;

            let document_service = DocumentService::new(&test.db, &feed);
            let ready = document_service
                .set_status(
                    request.id,
                    DocumentStatusDto {
                        status: DocumentStatus::Ready,
                        remarks: Some("Bring a valid ID".to_string()),
                    },
                )
                .await
                .unwrap();

            assert_eq!(ready.status, DocumentStatus::Ready);
            assert_eq!(ready.remarks.as_deref(), Some("Bring a valid ID"));

            let notifications = entity::prelude::Notification::find()
                .filter(entity::notification::Column::UserId.eq(user.id))
                .all(&test.db)
                .await?;
            assert_eq!(notifications.len(), 1);
            assert!(notifications[0].message.ends_with("Bring a valid ID"));

            Ok(())
        }

        /// Expect releasing an unprocessed request to fail
        #[tokio::test]
        async fn rejects_skipping_processing() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let user = test.user().insert_user("resident").await?;
            let request = test
                .document()
                .insert_document_request(user.id, "pending")
                .await?;

            let document_service = DocumentService::new(&test.db, &feed);
            let result = document_service
                .set_status(
                    request.id,
                    DocumentStatusDto {
                        status: DocumentStatus::Released,
                        remarks: None,
                    },
                )
                .await;

            assert!(matches!(
                result,
                Err(Error::WorkflowError(WorkflowError::InvalidTransition { .. }))
            ));

            Ok(())
        }
    }
}
