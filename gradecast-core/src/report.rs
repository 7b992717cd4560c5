//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use crate::catalog::ServiceEntry;
use crate::estimate::EstimationPlan;
use crate::level::{LevelThresholds, RiskLevel};
use crate::normalize::{normalize_with_config, RiskWeights};
use serde::{Deserialize, Serialize};

/// Catalog listing row: reported level next to what the engine computes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CatalogRow {
    pub id: String,
    pub name: String,
    pub reported_level: RiskLevel,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

/// Build catalog rows by grading every entry
pub fn grade_catalog(
    entries: &[ServiceEntry],
    weights: &RiskWeights,
    thresholds: &LevelThresholds,
) -> Vec<CatalogRow> {
    entries
        .iter()
        .map(|entry| {
            let norm = normalize_with_config(&entry.metrics, weights, thresholds);
            CatalogRow {
                id: entry.id.clone(),
                name: entry.name.clone(),
                reported_level: entry.reported_level,
                risk_score: norm.risk_score,
                risk_level: norm.risk_level,
            }
        })
        .collect()
}

/// Render an estimation plan as text output
pub fn render_text(plan: &EstimationPlan) -> String {
    let mut output = String::new();

    output.push_str("Remediation Estimate\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:.2} (level {})\n",
        "Risk score:", plan.risk_score, plan.risk_level
    ));
    output.push_str(&format!(
        "{:<20} {:.2} (level {})\n",
        "Projected score:", plan.projected_risk_score, plan.projected_risk_level
    ));
    output.push_str(&format!(
        "{:<20} {:.2}%\n",
        "Duplication:", plan.duplicated_percent
    ));
    output.push_str(&format!("{:<20} {:.2}\n", "Coverage gap:", plan.coverage_gap));
    output.push_str(&format!("{:<20} {:.2}\n", "Complexity:", plan.complexity));
    output.push_str(&format!(
        "{:<20} {:.3} per KLOC\n",
        "Hotspot density:", plan.hotspots_density
    ));
    output.push('\n');
    output.push_str(&format!("{:<20} {} h\n", "Estimated effort:", plan.total_hours));
    output.push_str(&format!("{:<20} {:.0}\n", "Estimated cost:", plan.cost));
    output.push_str(&format!("{:<20} {} h\n", "  Refactoring:", plan.refactor_hours));
    output.push_str(&format!("{:<20} {} h\n", "  Testing:", plan.test_hours));
    output.push_str(&format!("{:<20} {} h\n", "  Security:", plan.security_hours));
    output.push_str(&format!("{:<20} {} h\n", "  Management:", plan.management_hours));

    output
}

/// Render an estimation plan as JSON output
pub fn render_json(plan: &EstimationPlan) -> String {
    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "{}".to_string())
}

/// Render a graded catalog as text output
pub fn render_catalog_text(rows: &[CatalogRow]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<20} {:<26} {:<10} {:<10} {}\n",
        "ID", "NAME", "REPORTED", "SCORE", "LEVEL"
    ));

    for row in rows {
        let score_str = format!("{:.2}", row.risk_score);
        output.push_str(&format!(
            "{:<20} {:<26} {:<10} {:<10} {}\n",
            truncate_or_pad(&row.id, 20),
            truncate_or_pad(&row.name, 26),
            row.reported_level,
            score_str,
            row.risk_level,
        ));
    }

    output
}

/// Render a graded catalog as JSON output
pub fn render_catalog_json(rows: &[CatalogRow]) -> String {
    serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        format!("{}...", &s[..width.saturating_sub(3)])
    } else {
        format!("{:<width$}", s, width = width)
    }
}
