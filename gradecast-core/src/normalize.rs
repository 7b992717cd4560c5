//! Metric normalization and risk score derivation
//!
//! Global invariants enforced:
//! - Deterministic: identical input yields identical output
//! - Pure and total: every record produces a numeric result, no side effects
//! - Monotonic level mapping via the shared threshold table

use crate::level::{level_for_score_with_thresholds, LevelThresholds, RiskLevel};
use crate::metrics::RawMetrics;
use serde::{Deserialize, Serialize};

/// Coverage target used for the coverage-gap feature; only shortfall counts
pub const COVERAGE_TARGET_PERCENT: f64 = 85.0;

/// Normalized features and the derived risk score for one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NormalizedMetrics {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub duplicated_percent: f64,
    pub coverage_gap: f64,
    pub complexity: f64,
    pub hotspots_density: f64,
}

/// Per-feature weights folding normalized features into the risk score
///
/// The defaults encode relative severity per unit: security hotspots weigh
/// most, cognitive complexity least.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskWeights {
    pub smells: f64,
    pub issues: f64,
    pub hotspots: f64,
    pub duplication: f64,
    pub complexity: f64,
    pub coverage_gap: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        RiskWeights {
            smells: 0.8,
            issues: 1.1,
            hotspots: 1.5,
            duplication: 0.7,
            complexity: 0.3,
            coverage_gap: 1.0,
        }
    }
}

/// Normalize a record with default weights and thresholds
pub fn normalize(raw: &RawMetrics) -> NormalizedMetrics {
    normalize_with_config(raw, &RiskWeights::default(), &LevelThresholds::default())
}

/// Normalize a record with custom weights and thresholds
///
/// Density features divide defect counts by KLOC, with the divisor floored
/// at 1 so near-empty codebases do not explode. `duplicated_percent` is NOT
/// floor-protected: a record with `lines_of_code = 0` produces NaN (or
/// Infinity), which propagates into the score and lands in level E.
pub fn normalize_with_config(
    raw: &RawMetrics,
    weights: &RiskWeights,
    thresholds: &LevelThresholds,
) -> NormalizedMetrics {
    let kloc = (raw.lines_of_code as f64 / 1000.0).max(1.0);
    let smells_density = raw.code_smells as f64 / kloc;
    let issues_density = raw.open_issues as f64 / kloc;
    let hotspots_density = raw.security_hotspots as f64 / kloc;
    let duplicated_percent = raw.duplicated_lines as f64 / raw.lines_of_code as f64 * 100.0;
    let coverage_gap = (COVERAGE_TARGET_PERCENT - raw.coverage_percent).max(0.0);
    let complexity = raw.cognitive_complexity;

    let risk_score = smells_density * weights.smells
        + issues_density * weights.issues
        + hotspots_density * weights.hotspots
        + duplicated_percent * weights.duplication
        + complexity * weights.complexity
        + coverage_gap * weights.coverage_gap;

    let risk_level = level_for_score_with_thresholds(risk_score, thresholds);

    NormalizedMetrics {
        risk_score,
        risk_level,
        duplicated_percent,
        coverage_gap,
        complexity,
        hotspots_density,
    }
}
