use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::NotificationModel, TestContext};

impl TestContext {
    pub fn notification(&self) -> NotificationFixtures<'_> {
        NotificationFixtures { setup: self }
    }
}

pub struct NotificationFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> NotificationFixtures<'a> {
    pub async fn insert_notification(
        &self,
        user_id: i32,
        is_read: bool,
    ) -> Result<NotificationModel, TestError> {
        Ok(
            entity::prelude::Notification::insert(entity::notification::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                title: ActiveValue::Set("Appointment confirmed".to_string()),
                message: ActiveValue::Set("Your checkup has been confirmed".to_string()),
                is_read: ActiveValue::Set(is_read),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
