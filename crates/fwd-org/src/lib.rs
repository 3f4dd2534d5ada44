//! # fwd-org: Organizational Hierarchy Invariants
//!
//! Pure checks over employee snapshots loaded by the caller.
//!
//! - **Hierarchy** (`hierarchy.rs`): the reports-to graph must stay acyclic.
//!   [`has_circular_reporting`] is consulted before a `reporting_to` update
//!   is committed; [`ReportingGraph`] indexes a snapshot once for repeated
//!   checks and chain queries.
//!
//! - **Employee codes** (`code.rs`): `EMP-0001` style sequential codes.
//!
//! Nothing here performs I/O. Results are only as fresh as the snapshot the
//! caller supplies; two concurrent reassignments can both pass against the
//! same snapshot, and serializing them is the storage layer's job.

pub mod code;
pub mod error;
pub mod hierarchy;

pub use code::EmployeeCodeFormat;
pub use error::OrgError;
pub use hierarchy::{has_circular_reporting, Employee, ReportingGraph};
