use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::db::NotificationModel;

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    /// Creates a new instance of [`NotificationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an unread notification for `user_id`
    pub async fn create(
        &self,
        user_id: i32,
        title: String,
        message: String,
    ) -> Result<NotificationModel, DbErr> {
        let notification = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(title),
            message: ActiveValue::Set(message),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        notification.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        notification_id: i32,
    ) -> Result<Option<NotificationModel>, DbErr> {
        entity::prelude::Notification::find_by_id(notification_id)
            .one(self.db)
            .await
    }

    /// Gets a user's notifications, newest first
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<NotificationModel>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .all(self.db)
            .await
    }

    /// Gets a user's unread notifications
    pub async fn get_unread_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<NotificationModel>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .all(self.db)
            .await
    }

    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Marks a notification as read
    ///
    /// Returns `Ok(None)` if the notification does not exist.
    pub async fn mark_read(
        &self,
        notification_id: i32,
    ) -> Result<Option<NotificationModel>, DbErr> {
        let notification = match entity::prelude::Notification::find_by_id(notification_id)
            .one(self.db)
            .await?
        {
            Some(notification) => notification,
            None => return Ok(None),
        };

        if notification.is_read {
            return Ok(Some(notification));
        }

        let mut notification_am = notification.into_active_model();
        notification_am.is_read = ActiveValue::Set(true);

        let notification = notification_am.update(self.db).await?;

        Ok(Some(notification))
    }

    /// Marks all of a user's notifications as read, returning the number changed
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::IsRead, Expr::value(true))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
