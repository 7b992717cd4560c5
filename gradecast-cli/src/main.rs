//! Gradecast CLI - grades code-quality risk and forecasts remediation effort

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use gradecast_core::advice::{advice_for, risk_reduction_percent, GENERAL_ADVICE};
use gradecast_core::config;
use gradecast_core::report::{grade_catalog, render_catalog_json, render_catalog_text};
use gradecast_core::{
    builtin_catalog, estimate_with_config, find_service, load_catalog, render_json, render_text,
    RawMetrics,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gradecast")]
#[command(about = "Grade code-quality risk and forecast remediation effort")]
#[command(version = env!("GRADECAST_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a remediation plan from quality metrics
    Estimate {
        /// Grade a service from the catalog by id
        #[arg(long)]
        service: Option<String>,

        /// Catalog file to resolve --service against (default: builtin)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Read metrics from a JSON file
        #[arg(long)]
        input: Option<PathBuf>,

        /// Code smell count
        #[arg(long)]
        code_smells: Option<u64>,

        /// Open issue count
        #[arg(long)]
        open_issues: Option<u64>,

        /// Lines of code
        #[arg(long)]
        lines_of_code: Option<u64>,

        /// Security hotspot count
        #[arg(long)]
        security_hotspots: Option<u64>,

        /// Cognitive complexity
        #[arg(long)]
        cognitive_complexity: Option<f64>,

        /// Test coverage percentage
        #[arg(long)]
        coverage: Option<f64>,

        /// Duplicated line count
        #[arg(long)]
        duplicated_lines: Option<u64>,

        /// Reported technical debt in hours (default: 32)
        #[arg(long)]
        debt_hours: Option<f64>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append remediation advice (only valid with --format text)
        #[arg(long)]
        advice: bool,
    },
    /// List and grade the service catalog
    Catalog {
        /// Catalog file (default: builtin demo portfolio)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or inspect a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running an estimate
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Metric values collected from individual CLI flags
struct MetricFlags {
    code_smells: Option<u64>,
    open_issues: Option<u64>,
    lines_of_code: Option<u64>,
    security_hotspots: Option<u64>,
    cognitive_complexity: Option<f64>,
    coverage: Option<f64>,
    duplicated_lines: Option<u64>,
    debt_hours: Option<f64>,
}

impl MetricFlags {
    fn any_set(&self) -> bool {
        self.code_smells.is_some()
            || self.open_issues.is_some()
            || self.lines_of_code.is_some()
            || self.security_hotspots.is_some()
            || self.cognitive_complexity.is_some()
            || self.coverage.is_some()
            || self.duplicated_lines.is_some()
            || self.debt_hours.is_some()
    }

    fn into_metrics(self) -> RawMetrics {
        RawMetrics {
            code_smells: self.code_smells.unwrap_or(0),
            open_issues: self.open_issues.unwrap_or(0),
            lines_of_code: self.lines_of_code.unwrap_or(0),
            security_hotspots: self.security_hotspots.unwrap_or(0),
            cognitive_complexity: self.cognitive_complexity.unwrap_or(0.0),
            coverage_percent: self.coverage.unwrap_or(0.0),
            duplicated_lines: self.duplicated_lines.unwrap_or(0),
            technical_debt_hours: self.debt_hours.unwrap_or(32.0),
            rate: None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            service,
            catalog: catalog_path,
            input,
            code_smells,
            open_issues,
            lines_of_code,
            security_hotspots,
            cognitive_complexity,
            coverage,
            duplicated_lines,
            debt_hours,
            format,
            config: config_path,
            advice,
        } => {
            let flags = MetricFlags {
                code_smells,
                open_issues,
                lines_of_code,
                security_hotspots,
                cognitive_complexity,
                coverage,
                duplicated_lines,
                debt_hours,
            };

            // Exactly one metrics source
            if service.is_some() && input.is_some() {
                anyhow::bail!("--service and --input are mutually exclusive");
            }
            if flags.any_set() && (service.is_some() || input.is_some()) {
                anyhow::bail!("metric flags cannot be combined with --service or --input");
            }
            if catalog_path.is_some() && service.is_none() {
                anyhow::bail!("--catalog is only valid with --service");
            }
            if advice && format != OutputFormat::Text {
                anyhow::bail!("--advice is only valid with --format text");
            }

            let raw = if let Some(service_id) = service {
                load_service_metrics(&service_id, catalog_path.as_deref())?
            } else if let Some(input_path) = input {
                load_input_metrics(&input_path)?
            } else if flags.any_set() {
                flags.into_metrics()
            } else {
                anyhow::bail!("provide metrics via --service, --input, or metric flags");
            };

            raw.validate().context("invalid metrics")?;

            let resolved = load_config(config_path.as_deref())?;
            let plan =
                estimate_with_config(&raw, &resolved.weights, &resolved.thresholds, &resolved.params);

            match format {
                OutputFormat::Text => {
                    print!("{}", render_text(&plan));
                    if advice {
                        print_advice(&plan);
                    }
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&plan));
                }
            }
        }
        Commands::Catalog {
            file,
            format,
            config: config_path,
        } => {
            let entries = match file {
                Some(path) => load_catalog(&path)?,
                None => builtin_catalog(),
            };

            let resolved = load_config(config_path.as_deref())?;
            let rows = grade_catalog(&entries, &resolved.weights, &resolved.thresholds);

            match format {
                OutputFormat::Text => print!("{}", render_catalog_text(&rows)),
                OutputFormat::Json => println!("{}", render_catalog_json(&rows)),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(resolved) => {
                        if let Some(ref p) = resolved.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("Weights:");
                println!("  smells: {}", resolved.weights.smells);
                println!("  issues: {}", resolved.weights.issues);
                println!("  hotspots: {}", resolved.weights.hotspots);
                println!("  duplication: {}", resolved.weights.duplication);
                println!("  complexity: {}", resolved.weights.complexity);
                println!("  coverage_gap: {}", resolved.weights.coverage_gap);
                println!();
                println!("Thresholds:");
                println!("  b: {}", resolved.thresholds.b);
                println!("  c: {}", resolved.thresholds.c);
                println!("  d: {}", resolved.thresholds.d);
                println!("  e: {}", resolved.thresholds.e);
                println!();
                println!("Rates:");
                println!("  hourly_rate: {}", resolved.params.hourly_rate);
                println!(
                    "  debt_baseline_hours: {}",
                    resolved.params.debt_baseline_hours
                );
            }
        },
    }

    Ok(())
}

/// Resolve metrics for a catalog service by id
fn load_service_metrics(
    service_id: &str,
    catalog_path: Option<&std::path::Path>,
) -> anyhow::Result<RawMetrics> {
    let entries = match catalog_path {
        Some(path) => load_catalog(path)?,
        None => builtin_catalog(),
    };

    match find_service(&entries, service_id) {
        Some(entry) => Ok(entry.metrics.clone()),
        None => {
            let known: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
            anyhow::bail!(
                "unknown service '{}' (known services: {})",
                service_id,
                known.join(", ")
            )
        }
    }
}

/// Read a metrics record from a JSON file
fn load_input_metrics(path: &std::path::Path) -> anyhow::Result<RawMetrics> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read metrics file: {}", path.display()))?;
    let raw: RawMetrics = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse metrics file: {}", path.display()))?;
    Ok(raw)
}

/// Load configuration, reporting the source file when one is used
fn load_config(config_path: Option<&std::path::Path>) -> anyhow::Result<config::ResolvedConfig> {
    let project_root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&project_root, config_path)
        .context("failed to load configuration")?;

    if let Some(ref path) = resolved.config_path {
        eprintln!("Using config: {}", path.display());
    }

    Ok(resolved)
}

/// Print remediation advice below a text-format plan
fn print_advice(plan: &gradecast_core::EstimationPlan) {
    println!();
    let reduction = risk_reduction_percent(plan);
    if reduction.is_finite() {
        println!(
            "Projected risk reduction: {:.1}% ({} -> {})",
            reduction, plan.risk_level, plan.projected_risk_level
        );
    }

    let advice = advice_for(plan);
    if !advice.is_empty() {
        println!("\nRecommendations:");
        for item in advice {
            println!("- {}", item);
        }
    }

    println!("\nGeneral practices:");
    for item in GENERAL_ADVICE {
        println!("- {}", item);
    }
}
