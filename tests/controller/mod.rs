//! Tests for HTTP controller endpoints.
//!
//! These tests call the Axum handlers directly with an in-memory database and a memory-backed
//! session, verifying status codes, response bodies and role checks for every API area.

mod appointment;
mod auth;
mod document;
mod incident;
mod notification;
mod resident;
mod stats;
