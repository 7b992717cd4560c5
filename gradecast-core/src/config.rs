//! Configuration file support for Gradecast
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.gradecastrc.json` in the working directory
//! 3. `gradecast.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::estimate::EffortParams;
use crate::level::LevelThresholds;
use crate::normalize::RiskWeights;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Gradecast configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradecastConfig {
    /// Custom per-feature risk weights
    #[serde(default)]
    pub weights: Option<WeightConfig>,

    /// Custom level breakpoints
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,

    /// Hourly rate applied to remediation cost (default: 92000)
    #[serde(default)]
    pub hourly_rate: Option<f64>,

    /// Technical-debt baseline in hours (default: 32)
    #[serde(default)]
    pub debt_baseline_hours: Option<f64>,
}

/// Custom per-feature risk weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightConfig {
    /// Weight for code-smell density (default: 0.8)
    pub smells: Option<f64>,
    /// Weight for open-issue density (default: 1.1)
    pub issues: Option<f64>,
    /// Weight for security-hotspot density (default: 1.5)
    pub hotspots: Option<f64>,
    /// Weight for duplicated-line percentage (default: 0.7)
    pub duplication: Option<f64>,
    /// Weight for cognitive complexity (default: 0.3)
    pub complexity: Option<f64>,
    /// Weight for coverage gap (default: 1.0)
    pub coverage_gap: Option<f64>,
}

/// Custom level breakpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Lowest score graded B (default: 80)
    pub b: Option<f64>,
    /// Lowest score graded C (default: 130)
    pub c: Option<f64>,
    /// Lowest score graded D (default: 170)
    pub d: Option<f64>,
    /// Lowest score graded E (default: 230)
    pub e: Option<f64>,
}

/// Resolved configuration with every default filled in
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub weights: RiskWeights,
    pub thresholds: LevelThresholds,
    pub params: EffortParams,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl GradecastConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref w) = self.weights {
            for (name, val) in [
                ("smells", w.smells),
                ("issues", w.issues),
                ("hotspots", w.hotspots),
                ("duplication", w.duplication),
                ("complexity", w.complexity),
                ("coverage_gap", w.coverage_gap),
            ] {
                if let Some(v) = val {
                    if v < 0.0 {
                        anyhow::bail!("weights.{} must be non-negative (got {})", name, v);
                    }
                    if v > 10.0 {
                        anyhow::bail!("weights.{} must be at most 10.0 (got {})", name, v);
                    }
                }
            }
        }

        if let Some(ref t) = self.thresholds {
            let defaults = LevelThresholds::default();
            let b = t.b.unwrap_or(defaults.b);
            let c = t.c.unwrap_or(defaults.c);
            let d = t.d.unwrap_or(defaults.d);
            let e = t.e.unwrap_or(defaults.e);

            for (name, v) in [("b", b), ("c", c), ("d", d), ("e", e)] {
                if v <= 0.0 {
                    anyhow::bail!("thresholds.{} must be positive (got {})", name, v);
                }
            }
            if b >= c {
                anyhow::bail!("thresholds.b ({}) must be less than thresholds.c ({})", b, c);
            }
            if c >= d {
                anyhow::bail!("thresholds.c ({}) must be less than thresholds.d ({})", c, d);
            }
            if d >= e {
                anyhow::bail!("thresholds.d ({}) must be less than thresholds.e ({})", d, e);
            }
        }

        if let Some(rate) = self.hourly_rate {
            if rate <= 0.0 {
                anyhow::bail!("hourly_rate must be positive (got {})", rate);
            }
        }

        if let Some(baseline) = self.debt_baseline_hours {
            if baseline <= 0.0 {
                anyhow::bail!("debt_baseline_hours must be positive (got {})", baseline);
            }
        }

        Ok(())
    }

    /// Resolve config into a filled-in form ready for the engine
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let default_weights = RiskWeights::default();
        let weights = match &self.weights {
            Some(w) => RiskWeights {
                smells: w.smells.unwrap_or(default_weights.smells),
                issues: w.issues.unwrap_or(default_weights.issues),
                hotspots: w.hotspots.unwrap_or(default_weights.hotspots),
                duplication: w.duplication.unwrap_or(default_weights.duplication),
                complexity: w.complexity.unwrap_or(default_weights.complexity),
                coverage_gap: w.coverage_gap.unwrap_or(default_weights.coverage_gap),
            },
            None => default_weights,
        };

        let default_thresholds = LevelThresholds::default();
        let thresholds = match &self.thresholds {
            Some(t) => LevelThresholds {
                b: t.b.unwrap_or(default_thresholds.b),
                c: t.c.unwrap_or(default_thresholds.c),
                d: t.d.unwrap_or(default_thresholds.d),
                e: t.e.unwrap_or(default_thresholds.e),
            },
            None => default_thresholds,
        };

        let default_params = EffortParams::default();
        let params = EffortParams {
            hourly_rate: self.hourly_rate.unwrap_or(default_params.hourly_rate),
            debt_baseline_hours: self
                .debt_baseline_hours
                .unwrap_or(default_params.debt_baseline_hours),
        };

        Ok(ResolvedConfig {
            weights,
            thresholds,
            params,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        GradecastConfig::default().resolve()
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.gradecastrc.json`
/// 2. `gradecast.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(GradecastConfig, PathBuf)>> {
    let rc_path = project_root.join(".gradecastrc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    let config_path = project_root.join("gradecast.config.json");
    if config_path.exists() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<GradecastConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: GradecastConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (GradecastConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
