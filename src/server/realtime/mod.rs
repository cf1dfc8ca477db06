//! Realtime change distribution.
//!
//! Every successful mutation is published on the [`ChangeFeed`] as a
//! [`ChangeEvent`](crate::model::realtime::ChangeEvent). Subscribers receive the events of
//! all tables and filter for the one they follow.

mod feed;

pub use feed::{ChangeFeed, ChangeSubscription, FeedMessage};
