use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors raised while reading or changing records.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("No {entity} exists with ID {id}")]
    NotFound { entity: &'static str, id: i32 },
    #[error("Cannot move {entity} from '{from}' to '{to}'")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },
    #[error("'{0}' is not a bookable appointment time")]
    InvalidSlot(String),
    #[error("The {time} slot on {date} is already booked")]
    SlotUnavailable { date: NaiveDate, time: String },
}

impl IntoResponse for WorkflowError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } | Self::InvalidSlot(_) | Self::SlotUnavailable { .. } => {
                StatusCode::CONFLICT
            }
        };

        tracing::debug!("{}", self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
