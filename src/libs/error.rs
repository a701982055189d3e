//! Domain errors raised by work-order operations.
//!
//! The SLA clock and the pause ledger never fail; these errors come from the
//! host actions around them (completing an order, role checks, lookups).

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    #[error("Work order '{0}' not found")]
    NotFound(String),

    #[error("Work order '{0}' already exists")]
    DuplicateId(String),

    #[error("Work order '{0}' is already completed")]
    AlreadyCompleted(String),

    #[error("Work order '{id}' cannot be completed: {reason}")]
    CompletionBlocked { id: String, reason: String },

    #[error("Role '{role}' is not allowed to {action}")]
    PermissionDenied { role: String, action: String },

    #[error("Pause note must have at least {0} characters")]
    NoteTooShort(usize),
}
