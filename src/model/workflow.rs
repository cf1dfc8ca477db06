//! Status transition tables.
//!
//! Each status enumeration lists the statuses it may move to. Moving to the current status
//! is always accepted and treated as a no-op by the services.

/// A status with an explicit transition table.
pub trait StatusWorkflow: Copy + Eq + std::fmt::Display + 'static {
    /// Statuses reachable from `self` in one step.
    fn next_statuses(&self) -> &'static [Self];

    /// Whether `self` may move to `next`.
    fn can_transition_to(&self, next: Self) -> bool {
        *self == next || self.next_statuses().contains(&next)
    }

    /// Whether no further transitions are possible.
    fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }
}
