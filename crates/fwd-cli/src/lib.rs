//! # fwd-cli: fwd-erp Command-Line Interface
//!
//! Runs the hierarchy, notification, and statistics checks over JSON
//! snapshots exported from the storage layer.
//!
//! ## Subcommands
//!
//! - `reporting`: Reporting-cycle check and reporting-chain query
//! - `notify`: Status transitions, pre-insert validation, status application
//! - `stats`: Delivery statistics and health over one or more log exports
//! - `employee-code`: Next sequential employee code
//!
//! ## Exit Codes
//!
//! - `0`: success
//! - `1`: error (unreadable input, bad configuration)
//! - `2`: rule rejection (cycle, invalid entry, illegal transition)
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates; no business logic here.

pub mod config;
pub mod employee_code;
pub mod input;
pub mod notify;
pub mod reporting;
pub mod stats;

/// Exit code for a business-rule rejection.
pub const EXIT_REJECTED: u8 = 2;
