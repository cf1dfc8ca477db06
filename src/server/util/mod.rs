//! Utility functions and helpers for server operations.
//!
//! This module provides the role-based access policy shared by controllers and services and
//! the clock helpers used for timestamps.

pub mod access;
pub mod time;
