//! # Error Types
//!
//! Top-level error type shared by the fwd-erp crates. Per-crate errors
//! (`OrgError`, `StatusTransitionError`, `LogEntryError`, `ThresholdError`)
//! carry the detail and convert into [`FwdError`] at crate boundaries.
//!
//! ## Design
//!
//! - Parsing errors name the rejected input.
//! - State machine errors include the current state and the attempted target.

use thiserror::Error;

/// Top-level error type for fwd-erp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FwdError {
    /// Input failed structural validation (unknown enum string, bad identifier).
    #[error("validation error: {0}")]
    Validation(String),

    /// State machine transition rejected.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    /// Organizational hierarchy rule violated.
    #[error("hierarchy error: {0}")]
    Hierarchy(String),
}
