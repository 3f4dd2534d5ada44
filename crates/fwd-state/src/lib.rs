//! # fwd-state: Notification Delivery State Machine
//!
//! Governs the notification log: every outbound email, WhatsApp message,
//! in-app notice, or push notification is recorded as a log entry whose
//! status only moves forward.
//!
//! ```text
//! Pending ──▶ Sent ──▶ Delivered
//!    │          ├────▶ Failed
//!    │          └────▶ Bounced
//!    └──────────────▶ Failed
//! ```
//!
//! ## Modules
//!
//! - **Transition** (`transition.rs`): the legal-next table and terminal
//!   check. Pure predicates consulted before a provider-reported status is
//!   applied.
//!
//! - **Log** (`log.rs`): persisted entry and pre-insert shapes, the pending
//!   entry builder, the completeness rule, and [`NotificationLogEntry::with_status`]
//!   which applies a transition and returns the updated entry.
//!
//! - **Validate** (`validate.rs`): structural validation of raw candidates
//!   (form or webhook payloads) before insert.
//!
//! ## Design
//!
//! The status enum is closed and the table is an exhaustive `match`, so an
//! unlisted status cannot reach the table. Rejections are values (`false`,
//! `LogValidation { valid: false, .. }`, or a `StatusTransitionError`), never
//! panics.

pub mod log;
pub mod transition;
pub mod validate;

pub use log::{
    build_pending_log_entry, is_log_entry_complete, NotificationLogEntry, NotificationLogInsert,
    PendingLogOptions,
};
pub use transition::{
    check_status_transition, is_terminal_status, is_valid_status_transition,
    valid_next_statuses, StatusTransitionError,
};
pub use validate::{check_log_entry, validate_log_entry, LogEntryCandidate, LogEntryError, LogValidation};
