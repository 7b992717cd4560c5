//! Raw quality metrics consumed by the engine
//!
//! A `RawMetrics` record is one service's static-analysis readout as a
//! quality server reports it. The engine treats the record as an immutable
//! input snapshot; nothing here is persisted.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Hourly rate applied to remediation cost when no override is configured
pub const DEFAULT_HOURLY_RATE: f64 = 92_000.0;

/// Technical-debt baseline substituted when a record reports zero debt hours
pub const DEBT_BASELINE_HOURS: f64 = 32.0;

/// Raw static-analysis metrics for a single service
///
/// Counts are unsigned, so negative counts are unrepresentable. Float
/// fields and `lines_of_code = 0` are only checked by [`RawMetrics::validate`];
/// the engine itself accepts any record (see `normalize`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawMetrics {
    #[serde(default)]
    pub code_smells: u64,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub lines_of_code: u64,
    #[serde(default)]
    pub security_hotspots: u64,
    #[serde(default)]
    pub cognitive_complexity: f64,
    #[serde(default)]
    pub coverage_percent: f64,
    #[serde(default)]
    pub duplicated_lines: u64,
    /// Reported technical debt in hours; 0 means unreported
    #[serde(default)]
    pub technical_debt_hours: f64,
    /// Per-record hourly rate as reported by the quality server.
    /// Carried through serialization but not consulted by the cost formula.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rate: Option<f64>,
}

impl RawMetrics {
    /// Validate a record before handing it to the engine
    ///
    /// The engine never fails on degenerate input; hosts that want to
    /// reject such records instead of propagating NaN call this first.
    pub fn validate(&self) -> Result<()> {
        if self.lines_of_code == 0 {
            anyhow::bail!("lines_of_code must be positive (got 0)");
        }
        if !(0.0..=100.0).contains(&self.coverage_percent) {
            anyhow::bail!(
                "coverage_percent must be in [0, 100] (got {})",
                self.coverage_percent
            );
        }
        if self.cognitive_complexity < 0.0 || !self.cognitive_complexity.is_finite() {
            anyhow::bail!(
                "cognitive_complexity must be a non-negative finite number (got {})",
                self.cognitive_complexity
            );
        }
        if self.technical_debt_hours < 0.0 || !self.technical_debt_hours.is_finite() {
            anyhow::bail!(
                "technical_debt_hours must be a non-negative finite number (got {})",
                self.technical_debt_hours
            );
        }
        if let Some(rate) = self.rate {
            if rate <= 0.0 || !rate.is_finite() {
                anyhow::bail!("rate must be a positive finite number (got {})", rate);
            }
        }
        Ok(())
    }
}
