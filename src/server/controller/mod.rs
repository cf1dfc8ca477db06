//! HTTP controller endpoints for the barangay web API.
//!
//! This module contains Axum handlers for the session user, the resident registry, security
//! incidents, health center appointments, document requests, notifications, dashboard stats
//! and the realtime change stream. Controllers resolve the signed-in user, check the user's
//! role, call into the services and return the matching HTTP responses. Every handler is
//! annotated with utoipa for the OpenAPI documentation.

pub mod appointment;
pub mod auth;
pub mod document;
pub mod incident;
pub mod notification;
pub mod realtime;
pub mod resident;
pub mod stats;
pub mod util;
