//! Errors raised by hierarchy queries and employee code generation.

use thiserror::Error;

use fwd_core::{EmployeeId, FwdError};

/// Errors from the organizational hierarchy crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrgError {
    /// The requested employee does not appear in the snapshot.
    #[error("employee {0} is not in the snapshot")]
    UnknownEmployee(EmployeeId),

    /// Walking the reporting chain revisited an employee.
    #[error("reporting chain of employee {employee} is circular")]
    CircularReporting {
        /// Employee whose chain was being walked.
        employee: EmployeeId,
    },

    /// Employee code prefix is empty or not ASCII alphanumeric.
    #[error("invalid employee code prefix {0:?}: must be non-empty ASCII alphanumeric")]
    InvalidCodePrefix(String),

    /// Employee code width of zero.
    #[error("employee code width must be at least 1")]
    InvalidCodeWidth,

    /// The numeric sequence for a prefix cannot be incremented further.
    #[error("employee code sequence for prefix {prefix} is exhausted")]
    CodeSequenceExhausted {
        /// The prefix whose sequence overflowed.
        prefix: String,
    },
}

impl From<OrgError> for FwdError {
    fn from(err: OrgError) -> Self {
        match err {
            OrgError::UnknownEmployee(_) | OrgError::CircularReporting { .. } => {
                FwdError::Hierarchy(err.to_string())
            }
            OrgError::InvalidCodePrefix(_)
            | OrgError::InvalidCodeWidth
            | OrgError::CodeSequenceExhausted { .. } => FwdError::Validation(err.to_string()),
        }
    }
}
