use sea_orm::DatabaseConnection;

use crate::server::{config::DEFAULT_CHANGE_FEED_CAPACITY, realtime::ChangeFeed};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

/// Builds application state around an existing connection with a default sized change feed.
impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            feed: ChangeFeed::new(DEFAULT_CHANGE_FEED_CAPACITY),
        }
    }
}
