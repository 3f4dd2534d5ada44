//! JSON snapshot loading shared by the handlers.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use fwd_org::Employee;
use fwd_state::NotificationLogEntry;

/// Read and deserialize one JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Load an employee snapshot (JSON array of employee records).
pub fn load_employees(path: &Path) -> Result<Vec<Employee>> {
    let employees: Vec<Employee> = read_json(path)?;
    tracing::debug!(path = %path.display(), count = employees.len(), "loaded employee snapshot");
    Ok(employees)
}

/// Load a notification log export (JSON array of log rows).
pub fn load_log(path: &Path) -> Result<Vec<NotificationLogEntry>> {
    let entries: Vec<NotificationLogEntry> = read_json(path)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "loaded notification log");
    Ok(entries)
}
