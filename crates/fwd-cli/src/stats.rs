//! # Stats Subcommand
//!
//! Delivery statistics over one or more notification log exports. Entries
//! from every file are pooled before summarizing, so exports split per
//! tenant or per day can be passed together and still rank errors exactly.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use fwd_core::{Channel, NotificationStatus};
use fwd_state::NotificationLogEntry;
use fwd_stats::{
    calculate_stats, delivery_health_with, most_used_channel, stats_by_channel,
    DeliveryHealth, HealthThresholds, NotificationStats,
};

use crate::config::FwdConfig;
use crate::input::load_log;

/// Arguments for the `fwd stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Notification log export (JSON array). Repeat for several files.
    #[arg(long = "logs", required = true)]
    pub logs: Vec<PathBuf>,

    /// Report each channel separately.
    #[arg(long)]
    pub by_channel: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// JSON object.
    Json,
}

/// One summary with its derived classifications.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: NotificationStats,
    pub health: DeliveryHealth,
    pub most_used_channel: Option<Channel>,
}

impl StatsReport {
    fn new(stats: NotificationStats, thresholds: &HealthThresholds) -> Self {
        Self {
            health: delivery_health_with(&stats, thresholds),
            most_used_channel: most_used_channel(&stats),
            stats,
        }
    }
}

/// Execute the stats subcommand.
pub fn run_stats(args: &StatsArgs, config: &FwdConfig) -> Result<u8> {
    let output = if args.by_channel {
        let reports = channel_reports(&args.logs, &config.health)?;
        match args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
            OutputFormat::Text => reports
                .iter()
                .map(|(channel, report)| format!("[{channel}]\n{}", render_text(report)))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    } else {
        let report = overall_report(&args.logs, &config.health)?;
        match args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            OutputFormat::Text => render_text(&report),
        }
    };
    println!("{output}");
    Ok(0)
}

/// One report over the entries of all files.
pub fn overall_report(paths: &[PathBuf], thresholds: &HealthThresholds) -> Result<StatsReport> {
    let stats = calculate_stats(&load_all(paths)?);
    tracing::info!(files = paths.len(), entries = stats.total_sent, "computed delivery stats");
    Ok(StatsReport::new(stats, thresholds))
}

/// One report per channel over all files.
pub fn channel_reports(
    paths: &[PathBuf],
    thresholds: &HealthThresholds,
) -> Result<BTreeMap<Channel, StatsReport>> {
    let entries = load_all(paths)?;
    Ok(stats_by_channel(&entries)
        .into_iter()
        .map(|(channel, stats)| (channel, StatsReport::new(stats, thresholds)))
        .collect())
}

fn load_all(paths: &[PathBuf]) -> Result<Vec<NotificationLogEntry>> {
    let mut entries = Vec::new();
    for path in paths {
        entries.extend(load_log(path)?);
    }
    Ok(entries)
}

fn render_text(report: &StatsReport) -> String {
    let stats = &report.stats;
    let channels = Channel::all()
        .iter()
        .map(|c| format!("{c}={}", stats.by_channel.get(*c)))
        .collect::<Vec<_>>()
        .join(" ");
    let statuses = NotificationStatus::all()
        .iter()
        .map(|s| format!("{s}={}", stats.by_status.get(*s)))
        .collect::<Vec<_>>()
        .join(" ");
    let most_used = report
        .most_used_channel
        .map_or_else(|| "-".to_string(), |c| c.to_string());

    let mut out = format!(
        "total:         {}\n\
         success rate:  {:.2}%\n\
         failure rate:  {:.2}%\n\
         health:        {}\n\
         most used:     {most_used}\n\
         by channel:    {channels}\n\
         by status:     {statuses}\n",
        stats.total_sent, stats.success_rate, stats.failure_rate, report.health,
    );
    if !stats.common_errors.is_empty() {
        out.push_str("common errors:\n");
        for error in &stats.common_errors {
            out.push_str(&format!("  {:>5}  {}\n", error.count, error.message));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn row(channel: &str, status: &str, error: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "id": fwd_core::NotificationLogId::new(),
            "recipient_email": "ops@example.com",
            "channel": channel,
            "status": status,
            "body": "Stock transfer ST-4410 received",
            "error_message": error,
            "created_at": "2026-02-01T09:00:00Z",
        })
    }

    fn write_log(dir: &Path, name: &str, rows: Vec<serde_json::Value>) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(&rows).unwrap()).unwrap();
        path
    }

    #[test]
    fn stats_merge_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let day1 = write_log(
            dir.path(),
            "day1.json",
            (0..19).map(|_| row("email", "delivered", None)).collect(),
        );
        let day2 = write_log(
            dir.path(),
            "day2.json",
            vec![row("whatsapp", "failed", Some("number not on whatsapp"))],
        );

        let report = overall_report(&[day1, day2], &HealthThresholds::default()).unwrap();
        assert_eq!(report.stats.total_sent, 20);
        assert_eq!(report.stats.success_rate, 95.0);
        assert_eq!(report.stats.failure_rate, 5.0);
        assert_eq!(report.health, DeliveryHealth::Healthy);
        assert_eq!(report.most_used_channel, Some(Channel::Email));
        assert_eq!(report.stats.common_errors.len(), 1);
    }

    #[test]
    fn stats_error_ranking_exact_across_files() {
        // "relay timeout" is 11th in each file but first overall.
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for prefix in ["a", "b"] {
            let mut rows = Vec::new();
            for i in 0..10 {
                let message = format!("{prefix}{i} rejected");
                rows.extend((0..3).map(|_| row("email", "failed", Some(message.as_str()))));
            }
            rows.extend((0..2).map(|_| row("email", "failed", Some("relay timeout"))));
            paths.push(write_log(dir.path(), &format!("{prefix}.json"), rows));
        }

        let report = overall_report(&paths, &HealthThresholds::default()).unwrap();
        let errors = &report.stats.common_errors;
        assert_eq!(report.stats.total_sent, 64);
        assert_eq!(errors.len(), fwd_stats::MAX_COMMON_ERRORS);
        assert_eq!(errors[0].message, "relay timeout");
        assert_eq!(errors[0].count, 4);
    }

    #[test]
    fn stats_thresholds_from_config_apply() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(
            dir.path(),
            "log.json",
            (0..5).map(|_| row("push", "delivered", None)).collect(),
        );
        let defaults = overall_report(&[log.clone()], &HealthThresholds::default()).unwrap();
        assert_eq!(defaults.health, DeliveryHealth::Unknown);

        let relaxed = HealthThresholds { min_completed: 5, ..HealthThresholds::default() };
        let report = overall_report(&[log], &relaxed).unwrap();
        assert_eq!(report.health, DeliveryHealth::Healthy);
    }

    #[test]
    fn stats_by_channel_lists_every_channel() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(
            dir.path(),
            "log.json",
            vec![row("in_app", "pending", None), row("email", "bounced", None)],
        );
        let reports = channel_reports(&[log], &HealthThresholds::default()).unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[&Channel::InApp].stats.by_status.pending, 1);
        assert_eq!(reports[&Channel::Push].most_used_channel, None);
    }

    #[test]
    fn stats_run_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(dir.path(), "log.json", vec![row("email", "sent", None)]);
        for (by_channel, format) in [
            (false, OutputFormat::Text),
            (false, OutputFormat::Json),
            (true, OutputFormat::Text),
            (true, OutputFormat::Json),
        ] {
            let args = StatsArgs { logs: vec![log.clone()], by_channel, format };
            assert_eq!(run_stats(&args, &FwdConfig::default()).unwrap(), 0);
        }
    }

    #[test]
    fn stats_report_json_is_flat() {
        let report = StatsReport::new(fwd_stats::create_empty_stats(), &HealthThresholds::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_sent"], 0);
        assert_eq!(json["health"], "unknown");
        assert!(json["most_used_channel"].is_null());
    }

    #[test]
    fn stats_text_lists_errors() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(
            dir.path(),
            "log.json",
            vec![row("push", "failed", Some("device token expired"))],
        );
        let report = overall_report(&[log], &HealthThresholds::default()).unwrap();
        let text = render_text(&report);
        assert!(text.contains("device token expired"));
        assert!(text.contains("push=1"));
        assert!(text.contains("failure rate:  100.00%"));
    }

    #[test]
    fn stats_unreadable_log_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(overall_report(&[missing], &HealthThresholds::default()).is_err());
    }
}
