//! Error types for the barangay server application.
//!
//! This module provides the error handling system with specialized error types for the
//! different domains (authentication, configuration, record workflows). All errors implement
//! `IntoResponse` for Axum HTTP responses and use `thiserror` for ergonomic error definitions
//! with automatic `Display` and `Error` trait implementations.

pub mod auth;
pub mod config;
pub mod retry;
pub mod workflow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::{api::ErrorDto, ParseEnumError, ValidationError},
    server::error::{auth::AuthError, config::ConfigError, workflow::WorkflowError},
};

/// Main error type for the barangay server application.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator. The `IntoResponse` implementation
/// maps errors to appropriate HTTP responses for API consumers.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (session user, role checks)
/// - Workflow errors (missing records, illegal status transitions, booked slots)
/// - Validation errors (blank required fields)
/// - External library errors (database, sessions, serialization)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Record workflow error (not found, illegal transition, slot conflicts).
    #[error(transparent)]
    WorkflowError(#[from] WorkflowError),
    /// Request body failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// A stored enumeration value could not be parsed.
    ///
    /// Request bodies are parsed by serde before reaching the services, so this only occurs
    /// when a database row holds a value outside of the known set.
    #[error(transparent)]
    StoredValueError(#[from] ParseEnumError),
    /// Internal error indicating a bug in the server code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// JSON serialization error while building change events.
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For validation failures
/// - 403 Forbidden - For users whose role may not perform the action
/// - 404 Not Found - For missing records or missing session users
/// - 409 Conflict - For illegal status transitions and unavailable slots
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::WorkflowError(err) => err.into_response(),
            Self::ValidationError(err) => {
                tracing::debug!("{}", err);

                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
