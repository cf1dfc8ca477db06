use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::document::{CreateDocumentRequestDto, DocumentStatus},
    server::model::db::DocumentRequestModel,
};

pub struct DocumentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    /// Creates a new instance of [`DocumentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new pending document request for `user_id`
    pub async fn create(
        &self,
        request: CreateDocumentRequestDto,
        user_id: i32,
    ) -> Result<DocumentRequestModel, DbErr> {
        let now = Utc::now().naive_utc();

        let request = entity::document_request::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            document_type: ActiveValue::Set(request.document_type.to_string()),
            purpose: ActiveValue::Set(request.purpose),
            status: ActiveValue::Set(DocumentStatus::Pending.to_string()),
            remarks: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        request.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        request_id: i32,
    ) -> Result<Option<DocumentRequestModel>, DbErr> {
        entity::prelude::DocumentRequest::find_by_id(request_id)
            .one(self.db)
            .await
    }

    /// Gets document requests, newest first, optionally filtered by status and requester
    pub async fn get_all(
        &self,
        status: Option<DocumentStatus>,
        user_id: Option<i32>,
    ) -> Result<Vec<DocumentRequestModel>, DbErr> {
        let mut query = entity::prelude::DocumentRequest::find();

        if let Some(status) = status {
            query = query.filter(entity::document_request::Column::Status.eq(status.as_str()));
        }
        if let Some(user_id) = user_id {
            query = query.filter(entity::document_request::Column::UserId.eq(user_id));
        }

        query
            .order_by_desc(entity::document_request::Column::CreatedAt)
            .order_by_desc(entity::document_request::Column::Id)
            .all(self.db)
            .await
    }

    /// Sets the status of a document request, replacing the remarks when provided
    ///
    /// Returns `Ok(None)` if the request does not exist.
    pub async fn set_status(
        &self,
        request_id: i32,
        status: DocumentStatus,
        remarks: Option<String>,
    ) -> Result<Option<DocumentRequestModel>, DbErr> {
        let request = match entity::prelude::DocumentRequest::find_by_id(request_id)
            .one(self.db)
            .await?
        {
            Some(request) => request,
            None => return Ok(None),
        };

        let mut request_am = request.into_active_model();
        request_am.status = ActiveValue::Set(status.to_string());
        if let Some(remarks) = remarks {
            request_am.remarks = ActiveValue::Set(Some(remarks));
        }
        request_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let request = request_am.update(self.db).await?;

        Ok(Some(request))
    }

    pub async fn count_by_status(&self, status: DocumentStatus) -> Result<u64, DbErr> {
        entity::prelude::DocumentRequest::find()
            .filter(entity::document_request::Column::Status.eq(status.as_str()))
            .count(self.db)
            .await
    }
}
