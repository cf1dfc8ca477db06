use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A notification addressed to one user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct NotificationDto {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}
