//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the application.
//! Repositories provide an abstraction layer over database operations, organized by table,
//! and return `entity` models. Conversion into shared DTOs happens in the service layer.

pub mod appointment;
pub mod document;
pub mod incident;
pub mod notification;
pub mod resident;
pub mod user;
