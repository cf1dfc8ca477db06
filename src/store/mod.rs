//! Client-side cache of one entity collection.
//!
//! A [`ResourceStore`] is filled by a full load and then kept current from the change events
//! of its table. Events are applied per row, keyed by id, so a change never costs a full
//! reload unless the subscriber fell behind.

pub mod record;

use std::future::Future;

use dioxus_logger::tracing;
use serde::de::DeserializeOwned;

use crate::model::realtime::{ChangeEvent, ChangeKind, ChangeTable, FeedMessage};

/// A row that can be cached in a [`ResourceStore`].
pub trait Record: Clone + DeserializeOwned {
    /// Table whose change events update this record type.
    const TABLE: ChangeTable;

    /// Primary key of the row.
    fn id(&self) -> i32;

    /// Text fields matched by [`ResourceStore::search`].
    fn search_fields(&self) -> Vec<String>;

    /// Whether any searchable field contains `query`, ignoring case.
    ///
    /// A blank query matches every record.
    fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Something that can fetch the complete collection of `T`, e.g. an HTTP list endpoint.
pub trait RecordSource<T> {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<T>, String>>;
}

/// Identifies one started load; only the newest ticket may replace the cached rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Result of applying a change event to a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The cached rows changed.
    Applied,
    /// The event was for another table.
    Ignored,
    /// The event could not be applied row by row, a full load is needed.
    ReloadRequired,
}

/// Cached collection of one entity type together with its loading state.
#[derive(Clone, Debug)]
pub struct ResourceStore<T: Record> {
    rows: Vec<T>,
    loading: bool,
    error: Option<String>,
    latest_ticket: u64,
    /// Events applied while a load was in flight, replayed over its result.
    applied_during_load: Vec<ChangeEvent>,
}

impl<T: Record> Default for ResourceStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> ResourceStore<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            error: None,
            latest_ticket: 0,
            applied_during_load: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: i32) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Marks the store as loading and returns the ticket the result must be delivered with.
    ///
    /// Starting a new load invalidates every earlier ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.loading = true;

        LoadTicket(self.latest_ticket)
    }

    /// Delivers the result of the load started with `ticket`.
    ///
    /// Returns `false` without touching the store when a newer load has been started since.
    /// On success the cached rows are replaced in full, with duplicate ids collapsed to their
    /// last occurrence, and every event applied since the load started is replayed on top so
    /// the snapshot cannot roll back newer changes. On failure the previous rows are kept and
    /// the error is recorded.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<T>, String>) -> bool {
        if ticket.0 != self.latest_ticket {
            tracing::debug!(
                "Discarding stale {} load (ticket {} < {})",
                T::TABLE,
                ticket.0,
                self.latest_ticket
            );
            return false;
        }

        self.loading = false;
        let applied = std::mem::take(&mut self.applied_during_load);

        match result {
            Ok(rows) => {
                self.rows = Vec::with_capacity(rows.len());
                for row in rows {
                    self.upsert(row);
                }
                for event in &applied {
                    self.patch(event);
                }
                self.error = None;
            }
            Err(err) => {
                tracing::error!("Failed to load {}: {}", T::TABLE, err);
                self.error = Some(err);
            }
        }

        true
    }

    /// Loads the full collection from `source`, replacing the cached rows.
    pub async fn load<S: RecordSource<T>>(&mut self, source: &S) {
        let ticket = self.begin_load();
        let result = source.fetch_all().await;

        self.finish_load(ticket, result);
    }

    /// Patches the cached rows with a change event of this store's table.
    ///
    /// While a load is in flight the event is also kept so it survives the load's snapshot.
    pub fn apply(&mut self, event: &ChangeEvent) -> ApplyOutcome {
        if event.table != T::TABLE {
            return ApplyOutcome::Ignored;
        }

        if self.loading {
            self.applied_during_load.push(event.clone());
        }

        self.patch(event)
    }

    /// Handles one message of the table's change stream.
    ///
    /// A [`FeedMessage::Resync`] always requires a full load.
    pub fn receive(&mut self, message: &FeedMessage) -> ApplyOutcome {
        match message {
            FeedMessage::Change(event) => self.apply(event),
            FeedMessage::Resync => ApplyOutcome::ReloadRequired,
        }
    }

    fn patch(&mut self, event: &ChangeEvent) -> ApplyOutcome {
        match event.kind {
            ChangeKind::Delete => {
                self.rows.retain(|row| row.id() != event.id);
                ApplyOutcome::Applied
            }
            ChangeKind::Insert | ChangeKind::Update => {
                let Some(value) = event.record.clone() else {
                    return ApplyOutcome::ReloadRequired;
                };

                match serde_json::from_value::<T>(value) {
                    Ok(row) if row.id() == event.id => {
                        self.upsert(row);
                        ApplyOutcome::Applied
                    }
                    Ok(row) => {
                        tracing::warn!(
                            "Change event for {} ID {} carried record ID {}",
                            T::TABLE,
                            event.id,
                            row.id()
                        );
                        ApplyOutcome::ReloadRequired
                    }
                    Err(err) => {
                        tracing::warn!(
                            "Failed to decode {} change event for ID {}: {}",
                            T::TABLE,
                            event.id,
                            err
                        );
                        ApplyOutcome::ReloadRequired
                    }
                }
            }
        }
    }

    /// Rows whose searchable fields contain `query`, ignoring case.
    ///
    /// A blank query matches every row.
    pub fn search(&self, query: &str) -> Vec<&T> {
        self.rows.iter().filter(|row| row.matches(query)).collect()
    }

    fn upsert(&mut self, row: T) {
        match self.rows.iter_mut().find(|existing| existing.id() == row.id()) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }
}
