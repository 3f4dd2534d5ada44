//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every key is optional:
//!
//! ```yaml
//! health:
//!   min_completed: 10
//!   healthy_success: 90.0
//!   healthy_failure: 5.0
//!   critical_success: 60.0
//!   critical_failure: 30.0
//! employee_code:
//!   prefix: EMP
//!   width: 4
//! ```
//!
//! Values are validated on load, so handlers can rely on them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fwd_org::code::{DEFAULT_PREFIX, DEFAULT_WIDTH};
use fwd_org::EmployeeCodeFormat;
use fwd_stats::HealthThresholds;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FwdConfig {
    /// Delivery health thresholds used by `fwd stats`.
    pub health: HealthThresholds,
    /// Defaults for `fwd employee-code next`.
    pub employee_code: EmployeeCodeConfig,
}

/// Employee code defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmployeeCodeConfig {
    /// Leading letters of every code, e.g. `EMP`.
    pub prefix: String,
    /// Minimum digits after the prefix; shorter numbers are zero-padded.
    pub width: usize,
}

impl Default for EmployeeCodeConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            width: DEFAULT_WIDTH,
        }
    }
}

impl EmployeeCodeConfig {
    /// Build a validated format, letting `prefix` and `width` override.
    pub fn format(&self, prefix: Option<&str>, width: Option<usize>) -> Result<EmployeeCodeFormat> {
        let prefix = prefix.unwrap_or(&self.prefix);
        let width = width.unwrap_or(self.width);
        EmployeeCodeFormat::new(prefix, width).context("invalid employee code format")
    }
}

impl FwdConfig {
    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no config file given, using defaults");
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate YAML. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).context("failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Check thresholds and the employee code format.
    pub fn validate(&self) -> Result<()> {
        self.health
            .validate()
            .context("invalid health thresholds")?;
        self.employee_code.format(None, None)?;
        Ok(())
    }
}
