//! Test utilities for the barangay workspace.
//!
//! Tests are written in two phases: a declarative [`TestBuilder`] describes the tables
//! the test needs, then the returned [`TestContext`] exposes the in-memory database, a
//! session backed by a memory store, and fixture helpers for inserting records.

pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{fixtures::factory, TestBuilder, TestContext, TestError};
}
