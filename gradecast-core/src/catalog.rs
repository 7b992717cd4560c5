//! Service catalog
//!
//! A catalog is the list of services a quality server tracks, each with its
//! reported level and the raw metrics the engine consumes. The builtin
//! catalog ships a small demo portfolio; real deployments load their own
//! from JSON.

use crate::level::RiskLevel;
use crate::metrics::{RawMetrics, DEFAULT_HOURLY_RATE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One service tracked by a quality server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Level the quality server reports for the service; independent of
    /// the level the engine computes from the metrics
    pub reported_level: RiskLevel,
    pub metrics: RawMetrics,
}

/// The bundled demo portfolio
pub fn builtin_catalog() -> Vec<ServiceEntry> {
    vec![
        ServiceEntry {
            id: "billing-api".to_string(),
            name: "Billing API".to_string(),
            description: "Invoicing and payment reconciliation.".to_string(),
            reported_level: RiskLevel::C,
            metrics: RawMetrics {
                code_smells: 95,
                open_issues: 12,
                lines_of_code: 38_000,
                security_hotspots: 3,
                cognitive_complexity: 110.0,
                coverage_percent: 78.0,
                duplicated_lines: 2_200,
                technical_debt_hours: 32.0,
                rate: Some(DEFAULT_HOURLY_RATE),
            },
        },
        ServiceEntry {
            id: "onboarding-web".to_string(),
            name: "Onboarding Web".to_string(),
            description: "Customer sign-up portal.".to_string(),
            reported_level: RiskLevel::B,
            metrics: RawMetrics {
                code_smells: 60,
                open_issues: 5,
                lines_of_code: 21_000,
                security_hotspots: 1,
                cognitive_complexity: 80.0,
                coverage_percent: 82.0,
                duplicated_lines: 900,
                technical_debt_hours: 28.0,
                rate: Some(DEFAULT_HOURLY_RATE),
            },
        },
        ServiceEntry {
            id: "core-banking-batch".to_string(),
            name: "Core Banking Batch".to_string(),
            description: "Nightly accounting batch jobs.".to_string(),
            reported_level: RiskLevel::D,
            metrics: RawMetrics {
                code_smells: 210,
                open_issues: 40,
                lines_of_code: 52_000,
                security_hotspots: 9,
                cognitive_complexity: 170.0,
                coverage_percent: 60.0,
                duplicated_lines: 4_800,
                technical_debt_hours: 48.0,
                rate: Some(DEFAULT_HOURLY_RATE),
            },
        },
        ServiceEntry {
            id: "payments-gateway".to_string(),
            name: "Payments Gateway".to_string(),
            description: "Payment orchestration.".to_string(),
            reported_level: RiskLevel::A,
            metrics: RawMetrics {
                code_smells: 30,
                open_issues: 1,
                lines_of_code: 16_000,
                security_hotspots: 0,
                cognitive_complexity: 70.0,
                coverage_percent: 90.0,
                duplicated_lines: 320,
                technical_debt_hours: 16.0,
                rate: Some(DEFAULT_HOURLY_RATE),
            },
        },
        ServiceEntry {
            id: "fraud-engine".to_string(),
            name: "Fraud Engine".to_string(),
            description: "Fraud detection.".to_string(),
            reported_level: RiskLevel::E,
            metrics: RawMetrics {
                code_smells: 290,
                open_issues: 70,
                lines_of_code: 50_000,
                security_hotspots: 15,
                cognitive_complexity: 220.0,
                coverage_percent: 55.0,
                duplicated_lines: 6_100,
                technical_debt_hours: 60.0,
                rate: Some(DEFAULT_HOURLY_RATE),
            },
        },
    ]
}

/// Load a catalog from a JSON file and validate every entry
pub fn load_catalog(path: &Path) -> Result<Vec<ServiceEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    let entries: Vec<ServiceEntry> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse catalog file: {}", path.display()))?;

    for entry in &entries {
        entry
            .metrics
            .validate()
            .with_context(|| format!("invalid metrics for service '{}'", entry.id))?;
    }

    Ok(entries)
}

/// Look up a service by id
pub fn find_service<'a>(entries: &'a [ServiceEntry], id: &str) -> Option<&'a ServiceEntry> {
    entries.iter().find(|e| e.id == id)
}
