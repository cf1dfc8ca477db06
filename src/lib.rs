//! Barangay management platform.
//!
//! The crate is split into the [`model`] and [`store`] modules shared by every target and
//! the [`server`] module, which is only compiled with the `server` feature.

pub mod model;
pub mod store;

#[cfg(feature = "server")]
pub mod server;
