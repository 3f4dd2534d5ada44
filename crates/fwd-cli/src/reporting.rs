//! # Reporting Subcommand
//!
//! Hierarchy checks over an exported employee snapshot.
//!
//! ## Subcommands
//!
//! - `check`: Would assigning `--manager` to `--employee` close a cycle?
//!   Exits `2` when it would.
//! - `chain`: Print the managers above an employee, nearest first.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use fwd_core::EmployeeId;
use fwd_org::{has_circular_reporting, ReportingGraph};

use crate::input::load_employees;
use crate::EXIT_REJECTED;

/// Arguments for the `fwd reporting` subcommand.
#[derive(Args, Debug)]
pub struct ReportingArgs {
    #[command(subcommand)]
    pub command: ReportingCommand,
}

/// Reporting subcommands.
#[derive(Subcommand, Debug)]
pub enum ReportingCommand {
    /// Check a proposed manager assignment for reporting cycles.
    Check {
        /// Employee snapshot (JSON array).
        #[arg(long)]
        employees: PathBuf,
        /// Employee being reassigned.
        #[arg(long)]
        employee: EmployeeId,
        /// Proposed manager. Omit to clear the manager.
        #[arg(long)]
        manager: Option<EmployeeId>,
    },

    /// Print the reporting chain above an employee.
    Chain {
        /// Employee snapshot (JSON array).
        #[arg(long)]
        employees: PathBuf,
        /// Employee whose chain to print.
        #[arg(long)]
        employee: EmployeeId,
    },
}

/// Execute the reporting subcommand.
pub fn run_reporting(args: &ReportingArgs) -> Result<u8> {
    match &args.command {
        ReportingCommand::Check {
            employees,
            employee,
            manager,
        } => cmd_check(employees, employee, manager.as_ref()),
        ReportingCommand::Chain {
            employees,
            employee,
        } => cmd_chain(employees, employee),
    }
}

fn cmd_check(path: &Path, employee: &EmployeeId, manager: Option<&EmployeeId>) -> Result<u8> {
    let employees = load_employees(path)?;
    if has_circular_reporting(employee, manager, &employees) {
        let manager = manager.map(ToString::to_string).unwrap_or_default();
        println!("REJECTED: {manager} cannot manage {employee}: the assignment would create a reporting cycle");
        return Ok(EXIT_REJECTED);
    }
    match manager {
        Some(manager) => println!("OK: {employee} may report to {manager}"),
        None => println!("OK: {employee} may have no manager"),
    }
    Ok(0)
}

fn cmd_chain(path: &Path, employee: &EmployeeId) -> Result<u8> {
    let employees = load_employees(path)?;
    let graph = ReportingGraph::from_snapshot(&employees);
    let chain = graph
        .reporting_chain(employee)
        .with_context(|| format!("cannot resolve reporting chain of {employee}"))?;
    if chain.is_empty() {
        println!("{employee} has no manager");
    }
    for manager in chain {
        println!("{manager}");
    }
    Ok(0)
}
