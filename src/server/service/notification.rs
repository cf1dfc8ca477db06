use dioxus_logger::tracing;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{
    model::{
        api::CountDto,
        notification::NotificationDto,
        realtime::{ChangeEvent, ChangeTable},
    },
    server::{
        data::notification::NotificationRepository,
        error::{auth::AuthError, workflow::WorkflowError, Error},
        model::db::NotificationModel,
        realtime::ChangeFeed,
        service::retry::RetryContext,
    },
};

/// Service for the notifications addressed to one user.
pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
    feed: &'a ChangeFeed,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of [`NotificationService`]
    pub fn new(db: &'a DatabaseConnection, feed: &'a ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Lists a user's notifications, newest first.
    pub async fn get_notifications(&self, user_id: i32) -> Result<Vec<NotificationDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get notifications of user ID {}", user_id), || {
            let db = db.clone();

            Box::pin(async move {
                let notifications = NotificationRepository::new(&db)
                    .get_for_user(user_id)
                    .await?;

                Ok(notifications.into_iter().map(notification_dto).collect())
            })
        })
        .await
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<CountDto, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("count unread of user ID {}", user_id), || {
            let db = db.clone();

            Box::pin(async move {
                let count = NotificationRepository::new(&db).count_unread(user_id).await?;

                Ok(CountDto { count })
            })
        })
        .await
    }

    /// Marks one of the user's notifications as read.
    ///
    /// # Returns
    /// - `Ok(NotificationDto)` - The notification, now read
    /// - `Err(WorkflowError::NotFound)` - No notification with that ID
    /// - `Err(AuthError::Forbidden)` - The notification belongs to another user
    pub async fn mark_read(
        &self,
        user_id: i32,
        notification_id: i32,
    ) -> Result<NotificationDto, Error> {
        let notification_repo = NotificationRepository::new(self.db);

        let notification = notification_repo
            .get_by_id(notification_id)
            .await?
            .ok_or_else(|| not_found(notification_id))?;

        if notification.user_id != user_id {
            return Err(AuthError::Forbidden {
                action: "read another user's notification",
            }
            .into());
        }

        if notification.is_read {
            return Ok(notification_dto(notification));
        }

        let notification = notification_repo
            .mark_read(notification_id)
            .await?
            .ok_or_else(|| not_found(notification_id))?;
        let notification = notification_dto(notification);

        self.feed.publish(ChangeEvent::update(
            ChangeTable::Notifications,
            notification.id,
            &notification,
        )?);

        Ok(notification)
    }

    /// Marks every unread notification of the user as read.
    ///
    /// An update is published for each notification that changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<CountDto, Error> {
        let notification_repo = NotificationRepository::new(self.db);

        let unread = notification_repo.get_unread_for_user(user_id).await?;
        let count = notification_repo.mark_all_read(user_id).await?;

        for notification in unread {
            let notification = NotificationDto {
                is_read: true,
                ..notification_dto(notification)
            };

            self.feed.publish(ChangeEvent::update(
                ChangeTable::Notifications,
                notification.id,
                &notification,
            )?);
        }

        tracing::info!(
            user_id = user_id,
            count = count,
            "Marked all notifications read"
        );

        Ok(CountDto { count })
    }
}

/// Inserts a notification for `user_id` and publishes the insert.
///
/// Used by the other services to tell a user that one of their records changed.
pub(crate) async fn notify<C: ConnectionTrait>(
    db: &C,
    feed: &ChangeFeed,
    user_id: i32,
    title: String,
    message: String,
) -> Result<NotificationDto, Error> {
    let notification = NotificationRepository::new(db)
        .create(user_id, title, message)
        .await?;
    let notification = notification_dto(notification);

    feed.publish(ChangeEvent::insert(
        ChangeTable::Notifications,
        notification.id,
        &notification,
    )?);
    tracing::debug!(
        user_id = user_id,
        notification_id = notification.id,
        "Notified user"
    );

    Ok(notification)
}

fn not_found(notification_id: i32) -> Error {
    WorkflowError::NotFound {
        entity: "notification",
        id: notification_id,
    }
    .into()
}

fn notification_dto(notification: NotificationModel) -> NotificationDto {
    NotificationDto {
        id: notification.id,
        user_id: notification.user_id,
        title: notification.title,
        message: notification.message,
        is_read: notification.is_read,
        created_at: notification.created_at,
    }
}
