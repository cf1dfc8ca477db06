//! Utility functions for controller request handling.
//!
//! Every protected endpoint starts by resolving the signed-in user from the session with
//! [`get_user::get_user_from_session`] before checking the user's role.

pub mod get_user;
