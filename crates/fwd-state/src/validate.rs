//! # Pre-Insert Validation
//!
//! Structural checks on a raw log entry candidate, as received from a form
//! submission or a provider callback, before it is written to the log. This
//! is separate from the transition table: it asks whether a row is
//! well-formed, not whether a status change is legal.
//!
//! A candidate is rejected when:
//!
//! 1. `channel` is missing, empty, or not one of `email`, `whatsapp`,
//!    `in_app`, `push`;
//! 2. `status` is `failed` and `error_message` is missing or blank.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fwd_core::{Channel, FwdError, NotificationStatus};

/// Raw, untyped log entry fields subject to validation.
///
/// Unknown JSON fields are ignored so a full row payload can be validated
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntryCandidate {
    /// Raw channel string; must name a known channel.
    #[serde(default)]
    pub channel: Option<String>,
    /// Raw status string; only `failed` is inspected.
    #[serde(default)]
    pub status: Option<String>,
    /// Failure reason; required when `status` is `failed`.
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Outcome of [`validate_log_entry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogValidation {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// A failing result with a reason.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Reasons a candidate fails structural validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogEntryError {
    /// No channel, or an empty one.
    #[error("channel is required")]
    MissingChannel,

    /// Channel string outside the closed set.
    #[error("invalid channel {0:?}: expected one of email, whatsapp, in_app, push")]
    InvalidChannel(String),

    /// A `failed` row without a non-empty reason.
    #[error("error_message is required when status is failed")]
    MissingErrorMessage,
}

impl From<LogEntryError> for FwdError {
    fn from(err: LogEntryError) -> Self {
        FwdError::Validation(err.to_string())
    }
}

/// Validate a candidate, returning the first failing rule.
pub fn check_log_entry(candidate: &LogEntryCandidate) -> Result<(), LogEntryError> {
    let channel = candidate
        .channel
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or(LogEntryError::MissingChannel)?;
    channel
        .parse::<Channel>()
        .map_err(|_| LogEntryError::InvalidChannel(channel.to_string()))?;

    let failed = candidate.status.as_deref() == Some(NotificationStatus::Failed.as_str());
    let has_error = candidate
        .error_message
        .as_deref()
        .is_some_and(|m| !m.trim().is_empty());
    if failed && !has_error {
        return Err(LogEntryError::MissingErrorMessage);
    }
    Ok(())
}

/// Validate a candidate, reporting the outcome as a `{valid, error}` record.
pub fn validate_log_entry(candidate: &LogEntryCandidate) -> LogValidation {
    match check_log_entry(candidate) {
        Ok(()) => LogValidation::ok(),
        Err(err) => LogValidation::invalid(err.to_string()),
    }
}
