//! # Notify Subcommand
//!
//! Notification log operations on exported rows.
//!
//! ## Subcommands
//!
//! - `transitions`: List the statuses reachable from `--from`.
//! - `validate`: Structural pre-insert check of a row. Exits `2` when invalid.
//! - `apply`: Apply a status update to a row and print the updated row.
//!   Exits `2` when the transition is not allowed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use fwd_core::{NotificationStatus, Timestamp};
use fwd_state::{
    valid_next_statuses, validate_log_entry, LogEntryCandidate, NotificationLogEntry,
};

use crate::input::read_json;
use crate::EXIT_REJECTED;

/// Arguments for the `fwd notify` subcommand.
#[derive(Args, Debug)]
pub struct NotifyArgs {
    #[command(subcommand)]
    pub command: NotifyCommand,
}

/// Notify subcommands.
#[derive(Subcommand, Debug)]
pub enum NotifyCommand {
    /// List the statuses a notification may move to.
    Transitions {
        /// Current status (pending, sent, delivered, failed, bounced).
        #[arg(long)]
        from: NotificationStatus,
    },

    /// Validate a log row before it is written.
    Validate {
        /// Row to validate (JSON object).
        #[arg(long)]
        entry: PathBuf,
    },

    /// Apply a status update to a log row.
    Apply {
        /// Current row (JSON object).
        #[arg(long)]
        entry: PathBuf,
        /// Target status.
        #[arg(long)]
        status: NotificationStatus,
        /// Failure reason; required when moving to `failed`.
        #[arg(long)]
        error: Option<String>,
        /// Time of the update (RFC 3339 or epoch seconds). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },
}

/// Execute the notify subcommand.
pub fn run_notify(args: &NotifyArgs) -> Result<u8> {
    match &args.command {
        NotifyCommand::Transitions { from } => cmd_transitions(*from),
        NotifyCommand::Validate { entry } => cmd_validate(entry),
        NotifyCommand::Apply {
            entry,
            status,
            error,
            at,
        } => cmd_apply(entry, *status, error.clone(), at.as_deref()),
    }
}

fn cmd_transitions(from: NotificationStatus) -> Result<u8> {
    let next = valid_next_statuses(from);
    if next.is_empty() {
        println!("{from} is terminal");
    }
    for status in next {
        println!("{status}");
    }
    Ok(0)
}

fn cmd_validate(path: &Path) -> Result<u8> {
    let candidate: LogEntryCandidate = read_json(path)?;
    let result = validate_log_entry(&candidate);
    println!("{}", serde_json::to_string(&result)?);
    if result.valid {
        Ok(0)
    } else {
        tracing::info!(error = ?result.error, "log entry rejected");
        Ok(EXIT_REJECTED)
    }
}

fn cmd_apply(
    path: &Path,
    status: NotificationStatus,
    error: Option<String>,
    at: Option<&str>,
) -> Result<u8> {
    let entry: NotificationLogEntry = read_json(path)?;
    let at = match at {
        Some(s) => Timestamp::parse(s).context("invalid --at timestamp")?,
        None => Timestamp::now(),
    };
    match entry.with_status(status, at, error) {
        Ok(updated) => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(0)
        }
        Err(e) => {
            println!("REJECTED: {e}");
            Ok(EXIT_REJECTED)
        }
    }
}
