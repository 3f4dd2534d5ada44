//! # Employee Code Subcommand
//!
//! `next` prints the code HR should assign to the next hire. Prefix and
//! width come from `--prefix`/`--width`, falling back to the config file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::EmployeeCodeConfig;
use crate::input::load_employees;

/// Arguments for the `fwd employee-code` subcommand.
#[derive(Args, Debug)]
pub struct EmployeeCodeArgs {
    #[command(subcommand)]
    pub command: EmployeeCodeCommand,
}

/// Employee code subcommands.
#[derive(Subcommand, Debug)]
pub enum EmployeeCodeCommand {
    /// Print the next sequential employee code.
    Next {
        /// Employee snapshot (JSON array).
        #[arg(long)]
        employees: PathBuf,
        /// Code prefix (default from config, `EMP`).
        #[arg(long)]
        prefix: Option<String>,
        /// Zero-padded sequence width (default from config, 4).
        #[arg(long)]
        width: Option<usize>,
    },
}

/// Execute the employee-code subcommand.
pub fn run_employee_code(args: &EmployeeCodeArgs, config: &EmployeeCodeConfig) -> Result<u8> {
    match &args.command {
        EmployeeCodeCommand::Next {
            employees,
            prefix,
            width,
        } => {
            let code = next_code(employees, config, prefix.as_deref(), *width)?;
            println!("{code}");
            Ok(0)
        }
    }
}

fn next_code(
    path: &Path,
    config: &EmployeeCodeConfig,
    prefix: Option<&str>,
    width: Option<usize>,
) -> Result<String> {
    let format = config.format(prefix, width)?;
    let employees = load_employees(path)?;
    Ok(format.next_for_snapshot(&employees)?)
}
