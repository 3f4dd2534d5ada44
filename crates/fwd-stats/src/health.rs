//! # Delivery Health
//!
//! Coarse classification of a summary's delivery performance:
//!
//! | Health | Condition (default thresholds) |
//! |--------|--------------------------------|
//! | `unknown` | fewer than 10 completed (non-pending) entries |
//! | `healthy` | success >= 90% and failure <= 5% |
//! | `critical` | success <= 60% or failure >= 30% |
//! | `warning` | otherwise |
//!
//! Thresholds are configurable per deployment through [`HealthThresholds`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fwd_core::FwdError;

use crate::aggregate::NotificationStats;

/// Delivery health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryHealth {
    /// Not enough completed entries to judge.
    Unknown,
    /// Meets both `healthy` thresholds.
    Healthy,
    /// Between `healthy` and `critical`.
    Warning,
    /// At or past either `critical` threshold.
    Critical,
}

impl DeliveryHealth {
    /// Wire string for this classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for DeliveryHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected threshold configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    /// A percentage outside `[0, 100]` or not finite.
    #[error("threshold {name} must be a percentage in [0, 100], got {value}")]
    OutOfRange {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The healthy band does not lie strictly above the critical band.
    #[error("healthy and critical bands overlap: {0}")]
    Overlapping(String),
}

impl From<ThresholdError> for FwdError {
    fn from(err: ThresholdError) -> Self {
        FwdError::Validation(err.to_string())
    }
}

/// Classification thresholds. Rates are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    /// Completed entries required before health is judged.
    pub min_completed: u64,
    /// Minimum success rate for `healthy`.
    pub healthy_success: f64,
    /// Maximum failure rate for `healthy`.
    pub healthy_failure: f64,
    /// Success rate at or below which health is `critical`.
    pub critical_success: f64,
    /// Failure rate at or above which health is `critical`.
    pub critical_failure: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            min_completed: 10,
            healthy_success: 90.0,
            healthy_failure: 5.0,
            critical_success: 60.0,
            critical_failure: 30.0,
        }
    }
}

impl HealthThresholds {
    /// Check that every rate is a percentage and the bands are disjoint.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (name, value) in [
            ("healthy_success", self.healthy_success),
            ("healthy_failure", self.healthy_failure),
            ("critical_success", self.critical_success),
            ("critical_failure", self.critical_failure),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ThresholdError::OutOfRange { name, value });
            }
        }
        if self.healthy_success <= self.critical_success {
            return Err(ThresholdError::Overlapping(format!(
                "healthy_success ({}) must exceed critical_success ({})",
                self.healthy_success, self.critical_success
            )));
        }
        if self.healthy_failure >= self.critical_failure {
            return Err(ThresholdError::Overlapping(format!(
                "healthy_failure ({}) must be below critical_failure ({})",
                self.healthy_failure, self.critical_failure
            )));
        }
        Ok(())
    }
}

/// Classify with the default thresholds.
pub fn delivery_health(stats: &NotificationStats) -> DeliveryHealth {
    delivery_health_with(stats, &HealthThresholds::default())
}

/// Classify with caller-supplied thresholds.
pub fn delivery_health_with(stats: &NotificationStats, thresholds: &HealthThresholds) -> DeliveryHealth {
    let completed = stats.by_status.completed();
    if completed < thresholds.min_completed {
        return DeliveryHealth::Unknown;
    }
    if stats.success_rate >= thresholds.healthy_success
        && stats.failure_rate <= thresholds.healthy_failure
    {
        DeliveryHealth::Healthy
    } else if stats.success_rate <= thresholds.critical_success
        || stats.failure_rate >= thresholds.critical_failure
    {
        DeliveryHealth::Critical
    } else {
        DeliveryHealth::Warning
    }
}

/// Whether [`delivery_health`] is `Healthy`.
pub fn is_healthy_delivery(stats: &NotificationStats) -> bool {
    delivery_health(stats) == DeliveryHealth::Healthy
}
