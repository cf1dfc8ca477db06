//! Test fixture modules for database record creation.
//!
//! Each submodule adds an accessor to [`TestContext`](crate::TestContext) returning a fixture
//! helper for one table, plus `factory` for in-memory models that never touch the database.

pub mod appointment;
pub mod document;
pub mod factory;
pub mod incident;
pub mod notification;
pub mod resident;
pub mod user;
