//! Change events published for every successful write.

use serde::{Deserialize, Serialize};

string_enum! {
    /// Table a change event refers to.
    pub enum ChangeTable {
        Users => "users",
        Residents => "residents",
        SecurityIncidents => "security_incidents",
        Appointments => "appointments",
        Documents => "documents",
        Notifications => "notifications",
    }
}

string_enum! {
    /// Kind of write that produced a change event.
    pub enum ChangeKind {
        Insert => "insert",
        Update => "update",
        Delete => "delete",
    }
}

/// A single row change on one table.
///
/// `record` carries the row as it reads after the write, serialized as its DTO. It is absent
/// for deletes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ChangeEvent {
    pub table: ChangeTable,
    pub kind: ChangeKind,
    pub id: i32,
    #[cfg_attr(feature = "server", schema(value_type = Option<Object>))]
    pub record: Option<serde_json::Value>,
}

impl ChangeEvent {
    pub fn insert<T: Serialize>(
        table: ChangeTable,
        id: i32,
        record: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            table,
            kind: ChangeKind::Insert,
            id,
            record: Some(serde_json::to_value(record)?),
        })
    }

    pub fn update<T: Serialize>(
        table: ChangeTable,
        id: i32,
        record: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            table,
            kind: ChangeKind::Update,
            id,
            record: Some(serde_json::to_value(record)?),
        })
    }

    pub fn delete(table: ChangeTable, id: i32) -> Self {
        Self {
            table,
            kind: ChangeKind::Delete,
            id,
            record: None,
        }
    }
}

/// Name of the server-sent event carrying a [`ChangeEvent`].
pub const CHANGE_EVENT_NAME: &str = "change";

/// Name of the server-sent event telling a subscriber it missed changes and must reload.
pub const RESYNC_EVENT_NAME: &str = "resync";

/// What a subscriber receives from a table's change stream.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// A change to a row of the followed table.
    Change(ChangeEvent),
    /// Events were dropped because the subscriber fell behind, the subscriber must reload.
    Resync,
}

impl FeedMessage {
    /// Decodes a server-sent event received from `/api/realtime/{table}`.
    ///
    /// A `change` event whose data is not a [`ChangeEvent`] decodes as [`FeedMessage::Resync`]
    /// since the row it described can only be recovered by a reload. Unknown event names
    /// yield `None`.
    pub fn from_server_event(event_name: &str, data: &str) -> Option<Self> {
        match event_name {
            CHANGE_EVENT_NAME => Some(
                serde_json::from_str(data)
                    .map(Self::Change)
                    .unwrap_or(Self::Resync),
            ),
            RESYNC_EVENT_NAME => Some(Self::Resync),
            _ => None,
        }
    }
}
