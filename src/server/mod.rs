//! Server application core modules.
//!
//! This module contains all server-side functionality for the barangay platform: HTTP
//! routing, session-backed user context, database repositories, the mutation and query
//! services for residents, incidents, appointments, document requests and notifications,
//! and the realtime change feed that keeps client caches current.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod realtime;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
