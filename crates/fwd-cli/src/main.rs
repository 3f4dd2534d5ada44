//! # fwd CLI entry point
//!
//! Parses command-line arguments, loads configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fwd_cli::config::FwdConfig;
use fwd_cli::employee_code::{run_employee_code, EmployeeCodeArgs};
use fwd_cli::notify::{run_notify, NotifyArgs};
use fwd_cli::reporting::{run_reporting, ReportingArgs};
use fwd_cli::stats::{run_stats, StatsArgs};

/// fwd-erp operations CLI.
///
/// Checks reporting hierarchies, validates and advances notification log
/// rows, and summarizes delivery statistics from exported JSON snapshots.
#[derive(Parser, Debug)]
#[command(name = "fwd", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reporting hierarchy checks (cycle check, reporting chain).
    Reporting(ReportingArgs),

    /// Notification log operations (transitions, validate, apply).
    Notify(NotifyArgs),

    /// Delivery statistics and health over notification log exports.
    Stats(StatsArgs),

    /// Employee code generation.
    EmployeeCode(EmployeeCodeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("fwd CLI starting");

    let result = FwdConfig::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Reporting(args) => run_reporting(args),
        Commands::Notify(args) => run_notify(args),
        Commands::Stats(args) => run_stats(args, &config),
        Commands::EmployeeCode(args) => run_employee_code(args, &config.employee_code),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
