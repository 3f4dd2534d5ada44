//! # Status Transition Table
//!
//! | From | Legal next |
//! |------|------------|
//! | `pending` | `sent`, `failed` |
//! | `sent` | `delivered`, `failed`, `bounced` |
//! | `delivered`, `failed`, `bounced` | (none) |
//!
//! [`valid_next_statuses`] is the table; every other predicate here is
//! defined in terms of it.

use thiserror::Error;

use fwd_core::{FwdError, NotificationStatus};

/// Errors that can occur when applying a status update to a log entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusTransitionError {
    /// Attempted transition is not in the table.
    #[error("invalid notification status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: NotificationStatus,
        /// Attempted target status.
        to: NotificationStatus,
    },

    /// Entry is already in a terminal status.
    #[error("notification is in terminal status {status}")]
    TerminalState {
        /// The terminal status.
        status: NotificationStatus,
    },

    /// Moving to `failed` without a reason.
    #[error("status {to} requires an error message")]
    MissingErrorMessage {
        /// Attempted target status.
        to: NotificationStatus,
    },
}

impl From<StatusTransitionError> for FwdError {
    fn from(err: StatusTransitionError) -> Self {
        match err {
            StatusTransitionError::MissingErrorMessage { .. } => {
                FwdError::Validation(err.to_string())
            }
            _ => FwdError::InvalidTransition(err.to_string()),
        }
    }
}

/// The statuses reachable in one step from `from`, in lifecycle order.
pub fn valid_next_statuses(from: NotificationStatus) -> &'static [NotificationStatus] {
    use NotificationStatus::*;
    match from {
        Pending => &[Sent, Failed],
        Sent => &[Delivered, Failed, Bounced],
        Delivered | Failed | Bounced => &[],
    }
}

/// Whether `from -> to` is a legal transition.
pub fn is_valid_status_transition(from: NotificationStatus, to: NotificationStatus) -> bool {
    valid_next_statuses(from).contains(&to)
}

/// Whether no transition out of `status` is legal.
pub fn is_terminal_status(status: NotificationStatus) -> bool {
    valid_next_statuses(status).is_empty()
}

/// [`is_valid_status_transition`] with the reason for a rejection.
pub fn check_status_transition(
    from: NotificationStatus,
    to: NotificationStatus,
) -> Result<(), StatusTransitionError> {
    if is_terminal_status(from) {
        return Err(StatusTransitionError::TerminalState { status: from });
    }
    if !is_valid_status_transition(from, to) {
        return Err(StatusTransitionError::InvalidTransition { from, to });
    }
    Ok(())
}
