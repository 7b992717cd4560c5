//! Gradecast core library - code-quality risk grading and remediation forecasting

#![deny(warnings)]

// Global invariants enforced in this crate:
// - The engine is two pure functions; no global mutable state
// - No randomness, clocks, threads, or async
// - No I/O inside the engine; file access only in config/catalog loading
// - Identical input yields identical output

pub mod advice;
pub mod catalog;
pub mod config;
pub mod estimate;
pub mod level;
pub mod metrics;
pub mod normalize;
pub mod report;

pub use catalog::{builtin_catalog, find_service, load_catalog, ServiceEntry};
pub use config::ResolvedConfig;
pub use estimate::{estimate, estimate_with_config, EstimationPlan};
pub use level::{level_for_score, RiskLevel};
pub use metrics::{RawMetrics, DEBT_BASELINE_HOURS, DEFAULT_HOURLY_RATE};
pub use normalize::{normalize, normalize_with_config, NormalizedMetrics};
pub use report::{render_json, render_text};
