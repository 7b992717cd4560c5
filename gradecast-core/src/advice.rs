//! Remediation advice derived from an estimation plan

use crate::estimate::EstimationPlan;

/// Fixed practice recommendations that apply to every service
pub const GENERAL_ADVICE: &[&str] = &[
    "Run the quality analysis automatically in the CI/CD pipeline.",
    "Review metrics weekly with the architecture group.",
    "Add automated tests to prevent regressions.",
    "Establish consistent coding standards.",
    "Hold periodic technical reviews.",
];

/// Threshold-driven recommendations for one plan
///
/// Rules fire independently; a plan can collect several (or none).
pub fn advice_for(plan: &EstimationPlan) -> Vec<&'static str> {
    let mut advice = Vec::new();

    if plan.risk_score > 220.0 {
        advice.push("Critical risk: prioritize refactoring the largest modules.");
    }
    if plan.coverage_gap > 10.0 {
        advice.push("Raise test coverage to reduce production failures.");
    }
    if plan.duplicated_percent > 8.0 {
        advice.push("Reduce duplication by applying DRY principles.");
    }
    if plan.complexity > 140.0 {
        advice.push("Split oversized functions to reduce complexity.");
    }
    if plan.hotspots_density > 0.3 {
        advice.push("Address security hotspots immediately.");
    }
    if plan.risk_score < 120.0 {
        advice.push("Metrics are healthy: keep the current strategy.");
    }

    advice
}

/// Headline risk-reduction percentage for a plan
///
/// With the fixed retention factor this is 28% for any finite nonzero
/// score; degenerate scores yield NaN, which callers should not render.
pub fn risk_reduction_percent(plan: &EstimationPlan) -> f64 {
    100.0 - (plan.projected_risk_score / plan.risk_score) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::estimate;
    use crate::metrics::RawMetrics;

    fn healthy() -> RawMetrics {
        RawMetrics {
            code_smells: 30,
            open_issues: 1,
            lines_of_code: 16_000,
            security_hotspots: 0,
            cognitive_complexity: 70.0,
            coverage_percent: 90.0,
            duplicated_lines: 320,
            technical_debt_hours: 16.0,
            rate: None,
        }
    }

    fn distressed() -> RawMetrics {
        RawMetrics {
            code_smells: 500,
            open_issues: 120,
            lines_of_code: 10_000,
            security_hotspots: 20,
            cognitive_complexity: 300.0,
            coverage_percent: 40.0,
            duplicated_lines: 2_000,
            technical_debt_hours: 80.0,
            rate: None,
        }
    }

    #[test]
    fn test_healthy_service_gets_keep_course_advice() {
        let plan = estimate(&healthy());
        let advice = advice_for(&plan);
        assert_eq!(advice, vec!["Metrics are healthy: keep the current strategy."]);
    }

    #[test]
    fn test_distressed_service_collects_every_rule() {
        // score: smells 50*0.8 + issues 12*1.1 + hotspots 2*1.5 + dup 20*0.7
        //        + complexity 300*0.3 + gap 45 = 40+13.2+3+14+90+45 = 205.2
        // fires coverage, duplication, complexity, and hotspot rules
        let plan = estimate(&distressed());
        let advice = advice_for(&plan);
        assert_eq!(advice.len(), 4);
        assert!(advice.iter().any(|a| a.contains("coverage")));
        assert!(advice.iter().any(|a| a.contains("duplication")));
        assert!(advice.iter().any(|a| a.contains("oversized")));
        assert!(advice.iter().any(|a| a.contains("security hotspots")));
    }

    #[test]
    fn test_risk_reduction_is_twenty_eight_percent() {
        let plan = estimate(&healthy());
        assert!((risk_reduction_percent(&plan) - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_general_advice_is_stable() {
        assert_eq!(GENERAL_ADVICE.len(), 5);
    }
}
