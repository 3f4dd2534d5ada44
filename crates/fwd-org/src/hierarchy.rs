//! # Reporting Hierarchy
//!
//! The reports-to relation is a functional graph: every employee has at most
//! one manager. Reassigning `employee -> manager` closes a cycle exactly when
//! `employee` is already reachable by walking up from `manager`.
//!
//! ```text
//!   proposed manager ──▶ its manager ──▶ ... ──▶ (no manager)   acyclic
//!   proposed manager ──▶ its manager ──▶ ... ──▶ employee       cycle
//! ```
//!
//! The walk is bounded by the snapshot size, so a snapshot that is already
//! cyclic (written before this check existed, or by a racing update) still
//! terminates. Exceeding the bound counts as a cycle.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use fwd_core::EmployeeId;

use crate::error::OrgError;

/// The subset of an employee record the hierarchy checks read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// The employee's manager, if any.
    #[serde(default)]
    pub reporting_to: Option<EmployeeId>,
    /// HR employee code (e.g. `EMP-0042`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_code: Option<String>,
    /// Display name, carried through for CLI output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl Employee {
    /// An employee with no manager.
    pub fn new(id: EmployeeId) -> Self {
        Self {
            id,
            reporting_to: None,
            employee_code: None,
            full_name: None,
        }
    }

    /// Set the manager.
    pub fn reporting_to(mut self, manager: EmployeeId) -> Self {
        self.reporting_to = Some(manager);
        self
    }

    /// Set the employee code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.employee_code = Some(code.into());
        self
    }
}

/// Whether assigning `proposed_manager_id` as the manager of `employee_id`
/// would create a reporting cycle in `employees`.
///
/// - `None` (clearing the manager) is always acyclic.
/// - Reporting to oneself is always a cycle.
///
/// The snapshot should already reflect every pending change other than the
/// one being tested.
pub fn has_circular_reporting(
    employee_id: &EmployeeId,
    proposed_manager_id: Option<&EmployeeId>,
    employees: &[Employee],
) -> bool {
    let Some(manager) = proposed_manager_id else {
        return false;
    };
    if manager == employee_id {
        return true;
    }
    ReportingGraph::from_snapshot(employees).would_create_cycle(employee_id, Some(manager))
}

/// Index of an employee snapshot by id, borrowed from the snapshot.
#[derive(Debug, Clone)]
pub struct ReportingGraph<'a> {
    managers: HashMap<&'a EmployeeId, Option<&'a EmployeeId>>,
    order: Vec<&'a Employee>,
}

impl<'a> ReportingGraph<'a> {
    /// Index a snapshot. Later duplicates of an id replace earlier ones.
    pub fn from_snapshot(employees: &'a [Employee]) -> Self {
        let managers = employees
            .iter()
            .map(|e| (&e.id, e.reporting_to.as_ref()))
            .collect();
        Self {
            managers,
            order: employees.iter().collect(),
        }
    }

    /// Number of distinct employees in the snapshot.
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// Whether the employee appears in the snapshot.
    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.managers.contains_key(id)
    }

    /// The manager of `id`, or `None` if unassigned or absent.
    pub fn manager_of(&self, id: &EmployeeId) -> Option<&'a EmployeeId> {
        self.managers.get(id).copied().flatten()
    }

    /// Same predicate as [`has_circular_reporting`], against this index.
    pub fn would_create_cycle(
        &self,
        employee_id: &EmployeeId,
        proposed_manager_id: Option<&EmployeeId>,
    ) -> bool {
        let Some(start) = proposed_manager_id else {
            return false;
        };
        if start == employee_id {
            return true;
        }

        let bound = self.len();
        let mut current = start;
        let mut steps = 0usize;
        loop {
            if current == employee_id {
                tracing::debug!(
                    employee = %employee_id,
                    manager = %start,
                    depth = steps,
                    "reassignment would close a reporting cycle"
                );
                return true;
            }
            match self.manager_of(current) {
                Some(next) => current = next,
                None => return false,
            }
            steps += 1;
            if steps > bound {
                tracing::warn!(
                    employee = %employee_id,
                    manager = %start,
                    snapshot_size = bound,
                    "reporting snapshot already contains a cycle; rejecting reassignment"
                );
                return true;
            }
        }
    }

    /// Managers above `id`, nearest first. Empty for a top-level employee.
    pub fn reporting_chain(&self, id: &EmployeeId) -> Result<Vec<EmployeeId>, OrgError> {
        if !self.contains(id) {
            return Err(OrgError::UnknownEmployee(id.clone()));
        }
        let mut chain = Vec::new();
        let mut seen: HashSet<&EmployeeId> = HashSet::new();
        seen.insert(id);
        let mut current = id;
        while let Some(next) = self.manager_of(current) {
            if !seen.insert(next) {
                return Err(OrgError::CircularReporting {
                    employee: id.clone(),
                });
            }
            chain.push(next.clone());
            current = next;
        }
        Ok(chain)
    }

    /// Employees whose manager is `id`, in snapshot order.
    pub fn direct_reports(&self, id: &EmployeeId) -> Vec<&'a Employee> {
        self.order
            .iter()
            .copied()
            .filter(|e| e.reporting_to.as_ref() == Some(id))
            .collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
