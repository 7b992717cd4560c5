//! Remediation effort estimation
//!
//! Turns a normalized risk score into a concrete remediation plan: total
//! hours, a four-way work split, a cost figure, and the projected risk
//! after the work is done.
//!
//! Global invariants enforced:
//! - Deterministic: identical input yields identical output
//! - `refactor + test + security + management == total` exactly
//! - `total_hours >= 8` for every input
//! - All hour values round half away from zero (`f64::round`)

use crate::level::{level_for_score_with_thresholds, LevelThresholds, RiskLevel};
use crate::metrics::{RawMetrics, DEBT_BASELINE_HOURS, DEFAULT_HOURLY_RATE};
use crate::normalize::{normalize_with_config, RiskWeights};
use serde::{Deserialize, Serialize};

/// Risk score seams between the three base-effort regimes
const EFFORT_SEAM_LOW: f64 = 120.0;
const EFFORT_SEAM_HIGH: f64 = 220.0;

/// Minimum billable remediation effort
const MIN_TOTAL_HOURS: f64 = 8.0;

/// Fraction of the risk score assumed to remain after remediation
pub const RISK_RETENTION: f64 = 0.72;

/// Nominal effort shares per work category
const REFACTOR_BASE_SHARE: f64 = 0.35;
const TEST_BASE_SHARE: f64 = 0.25;
const SECURITY_BASE_SHARE: f64 = 0.15;

/// Extra share added when a feature crosses its surcharge threshold
const SHARE_SURCHARGE: f64 = 0.10;
const DUPLICATION_SURCHARGE_PERCENT: f64 = 8.0;
const COMPLEXITY_SURCHARGE_THRESHOLD: f64 = 120.0;
const COVERAGE_GAP_SURCHARGE_THRESHOLD: f64 = 10.0;
const HOTSPOT_DENSITY_SURCHARGE_THRESHOLD: f64 = 0.3;

/// Cost parameters for effort estimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffortParams {
    pub hourly_rate: f64,
    pub debt_baseline_hours: f64,
}

impl Default for EffortParams {
    fn default() -> Self {
        EffortParams {
            hourly_rate: DEFAULT_HOURLY_RATE,
            debt_baseline_hours: DEBT_BASELINE_HOURS,
        }
    }
}

/// Complete remediation plan for one service
///
/// Carries the normalized features it was derived from alongside the
/// effort figures, mirroring the flat record hosts render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EstimationPlan {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub duplicated_percent: f64,
    pub coverage_gap: f64,
    pub complexity: f64,
    pub hotspots_density: f64,
    pub total_hours: u64,
    pub refactor_hours: i64,
    pub test_hours: i64,
    pub security_hours: i64,
    /// Remainder after the three sized categories; absorbs all rounding
    /// error and may go negative when the surcharged shares exceed 100%
    pub management_hours: i64,
    pub cost: f64,
    pub projected_risk_score: f64,
    pub projected_risk_level: RiskLevel,
}

/// Base remediation effort in hours for a risk score
///
/// Piecewise-linear with three regimes, continuous at both seams:
/// - below 120: 24 + (score/120) * 16, spanning 24-40h
/// - 120 to 220: 40 + ((score-120)/100) * 40, spanning 40-80h
/// - 220 and above: 80 + ((score-220)/200) * 120, 0.6h per point, unbounded
pub fn base_effort(risk_score: f64) -> f64 {
    if risk_score < EFFORT_SEAM_LOW {
        24.0 + (risk_score / EFFORT_SEAM_LOW) * 16.0
    } else if risk_score < EFFORT_SEAM_HIGH {
        40.0 + ((risk_score - EFFORT_SEAM_LOW) / 100.0) * 40.0
    } else {
        80.0 + ((risk_score - EFFORT_SEAM_HIGH) / 200.0) * 120.0
    }
}

/// Estimate a remediation plan with default weights, thresholds, and rates
pub fn estimate(raw: &RawMetrics) -> EstimationPlan {
    estimate_with_config(
        raw,
        &RiskWeights::default(),
        &LevelThresholds::default(),
        &EffortParams::default(),
    )
}

/// Estimate a remediation plan with custom configuration
///
/// Runs the normalizer once and derives everything from its output plus
/// the reported technical debt. A zero/unreported debt figure falls back
/// to the baseline, so the debt multiplier is 1.0 for such records.
///
/// A NaN risk score (zero lines of code) fails every regime comparison and
/// every surcharge comparison; the effort floor wins in `max`, so such
/// records bottom out at the 8-hour minimum plan with level E.
pub fn estimate_with_config(
    raw: &RawMetrics,
    weights: &RiskWeights,
    thresholds: &LevelThresholds,
    params: &EffortParams,
) -> EstimationPlan {
    let norm = normalize_with_config(raw, weights, thresholds);

    let base = base_effort(norm.risk_score);
    let debt_base = if raw.technical_debt_hours > 0.0 {
        raw.technical_debt_hours
    } else {
        params.debt_baseline_hours
    };
    let scaled = base * (debt_base / params.debt_baseline_hours);
    let total = scaled.max(MIN_TOTAL_HOURS).round();
    let total_hours = total as u64;

    let refactor_share = REFACTOR_BASE_SHARE
        + surcharge(norm.duplicated_percent > DUPLICATION_SURCHARGE_PERCENT)
        + surcharge(norm.complexity > COMPLEXITY_SURCHARGE_THRESHOLD);
    let test_share =
        TEST_BASE_SHARE + surcharge(norm.coverage_gap > COVERAGE_GAP_SURCHARGE_THRESHOLD);
    let security_share =
        SECURITY_BASE_SHARE + surcharge(norm.hotspots_density > HOTSPOT_DENSITY_SURCHARGE_THRESHOLD);

    let refactor_hours = (total * refactor_share).round() as i64;
    let test_hours = (total * test_share).round() as i64;
    let security_hours = (total * security_share).round() as i64;
    let management_hours = total_hours as i64 - (refactor_hours + test_hours + security_hours);

    let cost = params.hourly_rate * total;

    let projected_risk_score = norm.risk_score * RISK_RETENTION;
    let projected_risk_level = level_for_score_with_thresholds(projected_risk_score, thresholds);

    EstimationPlan {
        risk_score: norm.risk_score,
        risk_level: norm.risk_level,
        duplicated_percent: norm.duplicated_percent,
        coverage_gap: norm.coverage_gap,
        complexity: norm.complexity,
        hotspots_density: norm.hotspots_density,
        total_hours,
        refactor_hours,
        test_hours,
        security_hours,
        management_hours,
        cost,
        projected_risk_score,
        projected_risk_level,
    }
}

fn surcharge(triggered: bool) -> f64 {
    if triggered {
        SHARE_SURCHARGE
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn billing_api() -> RawMetrics {
        RawMetrics {
            code_smells: 95,
            open_issues: 12,
            lines_of_code: 38_000,
            security_hotspots: 3,
            cognitive_complexity: 110.0,
            coverage_percent: 78.0,
            duplicated_lines: 2_200,
            technical_debt_hours: 32.0,
            rate: None,
        }
    }

    /// Record whose score is driven by coverage gap and smell density alone,
    /// both exact in binary, so seam scores land precisely
    fn record_scoring(coverage_percent: f64, code_smells: u64) -> RawMetrics {
        RawMetrics {
            code_smells,
            open_issues: 0,
            lines_of_code: 1_000,
            security_hotspots: 0,
            cognitive_complexity: 0.0,
            coverage_percent,
            duplicated_lines: 0,
            technical_debt_hours: 0.0,
            rate: None,
        }
    }

    #[test]
    fn test_billing_api_plan() {
        let plan = estimate(&billing_api());

        // score ≈ 46.5184, level A
        // base = 24 + (46.5184/120)*16 ≈ 30.2025, debt factor 32/32 = 1
        assert_eq!(plan.risk_level, RiskLevel::A);
        assert_eq!(plan.total_hours, 30);
        // refactor 30*0.35 → 10, test 30*0.25 → 8, security 30*0.15 → 4
        assert_eq!(plan.refactor_hours, 10);
        assert_eq!(plan.test_hours, 8);
        assert_eq!(plan.security_hours, 4);
        assert_eq!(plan.management_hours, 8);
        assert_eq!(plan.cost, 30.0 * 92_000.0);
        assert_eq!(plan.projected_risk_level, RiskLevel::A);
    }

    #[test]
    fn test_base_effort_regimes_and_continuity() {
        assert_eq!(base_effort(0.0), 24.0);
        // both sides of the first seam meet at 40h
        assert!((base_effort(119.999_999) - 40.0).abs() < 1e-4);
        assert_eq!(base_effort(120.0), 40.0);
        // both sides of the second seam meet at 80h
        assert!((base_effort(219.999_999) - 80.0).abs() < 1e-4);
        assert_eq!(base_effort(220.0), 80.0);
        // third regime grows 0.6h per risk point
        assert!((base_effort(320.0) - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_seam_score_uses_upper_regime() {
        // coverage gap 80 + smells 50*0.8 = 40 gives exactly 120.0
        let raw = record_scoring(5.0, 50);
        let plan = estimate(&raw);
        assert_eq!(plan.risk_score, 120.0);
        assert_eq!(plan.risk_level, RiskLevel::B);
        assert_eq!(plan.total_hours, 40);

        // coverage gap 80 + smells 175*0.8 = 140 gives exactly 220.0
        let raw = record_scoring(5.0, 175);
        let plan = estimate(&raw);
        assert_eq!(plan.risk_score, 220.0);
        assert_eq!(plan.risk_level, RiskLevel::D);
        assert_eq!(plan.total_hours, 80);
    }

    #[test]
    fn test_total_hours_floor() {
        // clean record with 4 debt hours: base 24 * 0.125 = 3, floored to 8
        let raw = RawMetrics {
            code_smells: 0,
            open_issues: 0,
            lines_of_code: 1_000,
            security_hotspots: 0,
            cognitive_complexity: 0.0,
            coverage_percent: 100.0,
            duplicated_lines: 0,
            technical_debt_hours: 4.0,
            rate: None,
        };
        let plan = estimate(&raw);
        assert_eq!(plan.total_hours, 8);
        assert_eq!(plan.refactor_hours, 3);
        assert_eq!(plan.test_hours, 2);
        assert_eq!(plan.security_hours, 1);
        assert_eq!(plan.management_hours, 2);
    }

    #[test]
    fn test_debt_multiplier_scales_effort() {
        let raw = RawMetrics {
            technical_debt_hours: 64.0,
            ..billing_api()
        };
        let plan = estimate(&raw);
        // base ≈ 30.2025 doubled by the 64/32 multiplier
        assert_eq!(plan.total_hours, 60);
    }

    #[test]
    fn test_zero_debt_falls_back_to_baseline() {
        let raw = RawMetrics {
            technical_debt_hours: 0.0,
            ..billing_api()
        };
        let plan = estimate(&raw);
        assert_eq!(plan.total_hours, 30);
    }

    #[test]
    fn test_management_can_go_negative() {
        // every surcharge triggered at the 8h floor: shares sum to 1.15
        let raw = RawMetrics {
            code_smells: 0,
            open_issues: 0,
            lines_of_code: 1_000,
            security_hotspots: 1,
            cognitive_complexity: 121.0,
            coverage_percent: 70.0,
            duplicated_lines: 90,
            technical_debt_hours: 4.0,
            rate: None,
        };
        let plan = estimate(&raw);
        assert_eq!(plan.total_hours, 8);
        // refactor 8*0.55 → 4, test 8*0.35 → 3, security 8*0.25 → 2
        assert_eq!(plan.refactor_hours, 4);
        assert_eq!(plan.test_hours, 3);
        assert_eq!(plan.security_hours, 2);
        assert_eq!(plan.management_hours, -1);
        // the remainder keeps the sum exact even when negative
        assert_eq!(
            plan.refactor_hours + plan.test_hours + plan.security_hours + plan.management_hours,
            plan.total_hours as i64
        );
    }

    #[test]
    fn test_projected_risk_is_fixed_retention() {
        let plan = estimate(&billing_api());
        assert!((plan.projected_risk_score - plan.risk_score * RISK_RETENTION).abs() < 1e-12);

        // a score of 250 is level E now, D after the assumed reduction
        let raw = record_scoring(5.0, 50);
        let raw = RawMetrics {
            cognitive_complexity: 433.333_333,
            ..raw
        };
        let plan = estimate(&raw);
        assert_eq!(plan.risk_level, RiskLevel::E);
        assert_eq!(plan.projected_risk_level, RiskLevel::D);
    }

    #[test]
    fn test_record_rate_field_is_not_consulted() {
        // cost uses the configured rate; the per-record rate rides along unused
        let with_rate = RawMetrics {
            rate: Some(999_999.0),
            ..billing_api()
        };
        let plan_with = estimate(&with_rate);
        let plan_without = estimate(&billing_api());
        assert_eq!(plan_with.cost, plan_without.cost);
        assert_eq!(plan_with, plan_without);
    }

    #[test]
    fn test_custom_hourly_rate() {
        let params = EffortParams {
            hourly_rate: 100.0,
            ..EffortParams::default()
        };
        let plan = estimate_with_config(
            &billing_api(),
            &RiskWeights::default(),
            &LevelThresholds::default(),
            &params,
        );
        assert_eq!(plan.total_hours, 30);
        assert_eq!(plan.cost, 3_000.0);
    }

    #[test]
    fn test_degenerate_record_bottoms_out_at_floor() {
        // zero lines of code: NaN score, every comparison fails, the floor
        // wins in max, and the plan is the 8h minimum at level E
        let raw = RawMetrics {
            code_smells: 0,
            open_issues: 0,
            lines_of_code: 0,
            security_hotspots: 0,
            cognitive_complexity: 0.0,
            coverage_percent: 0.0,
            duplicated_lines: 0,
            technical_debt_hours: 0.0,
            rate: None,
        };
        let plan = estimate(&raw);
        assert!(plan.risk_score.is_nan());
        assert_eq!(plan.risk_level, RiskLevel::E);
        assert_eq!(plan.total_hours, 8);
        assert!(plan.projected_risk_score.is_nan());
        assert_eq!(plan.projected_risk_level, RiskLevel::E);
    }
}
