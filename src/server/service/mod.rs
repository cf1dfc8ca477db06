//! Service layer for business logic.
//!
//! Services sit between the controllers and the repositories. They convert database models
//! into shared DTOs, enforce status transition tables and record ownership, and publish every
//! successful write on the change feed. Reads are retried on transient failures through
//! [`retry::RetryContext`], writes are attempted once.

pub mod appointment;
pub mod document;
pub mod incident;
pub mod notification;
pub mod resident;
pub mod retry;
pub mod stats;
pub mod user;

use crate::{
    model::workflow::StatusWorkflow,
    server::error::{workflow::WorkflowError, Error},
};

/// Checks a status change against the transition table of its workflow.
///
/// # Returns
/// - `Ok(true)` - The change is allowed and must be written
/// - `Ok(false)` - The record is already in `to`, nothing needs to be written
/// - `Err(WorkflowError::InvalidTransition)` - The transition table does not allow the change
pub(crate) fn check_transition<S: StatusWorkflow>(
    entity: &'static str,
    from: S,
    to: S,
) -> Result<bool, Error> {
    if from == to {
        return Ok(false);
    }

    if !from.can_transition_to(to) {
        return Err(WorkflowError::InvalidTransition {
            entity,
            from: from.to_string(),
            to: to.to_string(),
        }
        .into());
    }

    Ok(true)
}
