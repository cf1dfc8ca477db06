use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use dioxus_logger::tracing;
use futures::stream;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        realtime::{ChangeEvent, ChangeTable, CHANGE_EVENT_NAME, RESYNC_EVENT_NAME},
        user::UserDto,
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        realtime::FeedMessage,
        util::access::{
            has_role, require_staff, APPOINTMENT_MANAGERS, DOCUMENT_MANAGERS, INCIDENT_MANAGERS,
        },
    },
};

pub static REALTIME_TAG: &str = "realtime";

/// Stream the changes made to one table as server-sent events
///
/// Each change is sent as a `change` event carrying a JSON `ChangeEvent`. A subscriber that
/// falls behind receives a `resync` event and should reload the table. Users only receive
/// changes to records they may see, the resident and user tables are limited to staff.
#[utoipa::path(
    get,
    path = "/api/realtime/{table}",
    tag = REALTIME_TAG,
    params(("table" = ChangeTable, Path, description = "Table to subscribe to")),
    responses(
        (status = 200, description = "Stream of change events", content_type = "text/event-stream", body = ChangeEvent),
        (status = 400, description = "Unknown table"),
        (status = 403, description = "User is not staff", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn subscribe(
    State(state): State<AppState>,
    session: Session,
    Path(table): Path<ChangeTable>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    if matches!(table, ChangeTable::Residents | ChangeTable::Users) {
        require_staff(&user, "subscribe to this table")?;
    }

    let owner_field = owner_field(table, &user);
    let user_id = user.id;
    let subscription = state.feed.subscribe(table);

    tracing::debug!(user_id = user_id, table = %table, "Opened change stream");

    let events = stream::unfold(subscription, move |mut subscription| async move {
        loop {
            let event = match subscription.recv().await? {
                FeedMessage::Change(change) if is_visible(&change, owner_field, user_id) => {
                    Event::default().event(CHANGE_EVENT_NAME).json_data(&change)
                }
                FeedMessage::Change(_) => continue,
                FeedMessage::Resync => Ok(Event::default().event(RESYNC_EVENT_NAME).data("")),
            };

            return Some((event, subscription));
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// The record field holding the ID of the only user allowed to see a change, if any.
fn owner_field(table: ChangeTable, user: &UserDto) -> Option<&'static str> {
    match table {
        ChangeTable::Notifications => Some("user_id"),
        ChangeTable::SecurityIncidents if !has_role(user, INCIDENT_MANAGERS) => {
            Some("reported_by")
        }
        ChangeTable::Appointments if !has_role(user, APPOINTMENT_MANAGERS) => Some("user_id"),
        ChangeTable::Documents if !has_role(user, DOCUMENT_MANAGERS) => Some("user_id"),
        _ => None,
    }
}

fn is_visible(change: &ChangeEvent, owner_field: Option<&str>, user_id: i32) -> bool {
    let Some(field) = owner_field else {
        return true;
    };

    change
        .record
        .as_ref()
        .and_then(|record| record.get(field))
        .and_then(|owner| owner.as_i64())
        == Some(i64::from(user_id))
}
