use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// Startup configuration errors, see [`Config::from_env`](crate::server::config::Config::from_env).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("Environment variable {0} must be set to a non-empty value")]
    MissingEnvVar(String),
    #[error("Environment variable {var} has an invalid value: {reason}")]
    InvalidEnvValue { var: String, reason: String },
}

impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
