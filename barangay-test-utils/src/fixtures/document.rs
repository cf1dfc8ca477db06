use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::DocumentRequestModel, TestContext};

impl TestContext {
    pub fn document(&self) -> DocumentFixtures<'_> {
        DocumentFixtures { setup: self }
    }
}

pub struct DocumentFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> DocumentFixtures<'a> {
    /// Insert a barangay clearance request for `user_id` with the given status.
    pub async fn insert_document_request(
        &self,
        user_id: i32,
        status: &str,
    ) -> Result<DocumentRequestModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::DocumentRequest::insert(entity::document_request::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                document_type: ActiveValue::Set("barangay_clearance".to_string()),
                purpose: ActiveValue::Set("Employment".to_string()),
                status: ActiveValue::Set(status.to_string()),
                remarks: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
