//! # fwd-core: Foundational Types for fwd-erp
//!
//! Shared vocabulary for the freight-forwarder ERP invariant crates. Every
//! other crate in the workspace depends on `fwd-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `EmployeeId`, `UserId`,
//!    `TemplateId`, `NotificationLogId` are distinct types over `Uuid`.
//!    An employee id cannot be passed where a user id is expected.
//!
//! 2. **Closed enums for wire vocabularies.** `Channel` (4 variants) and
//!    `NotificationStatus` (5 variants) are the single definitions of the
//!    notification channel and status sets. Every `match` on them is
//!    exhaustive, so adding a variant forces every consumer to handle it.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fwd-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod domain;
pub mod error;
pub mod identity;
pub mod temporal;

pub use domain::{Channel, NotificationStatus, CHANNEL_COUNT, STATUS_COUNT};
pub use error::FwdError;
pub use identity::{EmployeeId, NotificationLogId, TemplateId, UserId};
pub use temporal::Timestamp;
