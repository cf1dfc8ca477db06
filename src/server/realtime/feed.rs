use dioxus_logger::tracing;
use tokio::sync::broadcast::{self, error::RecvError};

pub use crate::model::realtime::FeedMessage;
use crate::model::realtime::{ChangeEvent, ChangeTable};

/// Broadcast channel carrying change events from the mutation services to subscribers.
///
/// Cloning the feed shares the same underlying channel. Publishing never blocks; a subscriber
/// that falls more than `capacity` events behind observes [`FeedMessage::Resync`].
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Creates a feed buffering up to `capacity` events per subscriber.
    ///
    /// # Panics
    /// Panics if `capacity` is 0, configuration rejects such values before this is reached.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);

        Self { sender }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Having no subscribers is not an error, the event is simply dropped.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::debug!(
            table = %event.table,
            kind = %event.kind,
            id = event.id,
            "Publishing change event"
        );

        let _ = self.sender.send(event);
    }

    /// Subscribes to the events of one table published from now on.
    pub fn subscribe(&self, table: ChangeTable) -> ChangeSubscription {
        ChangeSubscription {
            table,
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions across all tables.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A live subscription to one table's changes, dropping it unsubscribes.
pub struct ChangeSubscription {
    table: ChangeTable,
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl ChangeSubscription {
    pub fn table(&self) -> ChangeTable {
        self.table
    }

    /// Waits for the next message relevant to the subscribed table.
    ///
    /// Returns `None` once the feed has been dropped.
    pub async fn recv(&mut self) -> Option<FeedMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.table == self.table => return Some(FeedMessage::Change(event)),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(
                        table = %self.table,
                        skipped = skipped,
                        "Change subscriber lagged behind, requesting resync"
                    );

                    return Some(FeedMessage::Resync);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
