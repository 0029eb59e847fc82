//! Cooler Curves - Air Cooler Test-Bench Analysis & Chart Generator
//!
//! Loads a test-bench CSV export, normalizes it against the canonical
//! schema, and writes the two performance charts.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cooler_curves::charts::render_chart;
use cooler_curves::config::{self, ThresholdOverrides};
use cooler_curves::data::BenchTable;
use cooler_curves::pipeline;

const UA_DUTY_FILE: &str = "Air_Cooler_Performance_Curve_UA_Duty.png";
const FAN_POWER_FILE: &str = "Air_Cooler_Performance_Curve_Fan_Power.png";

/// Generate air cooler performance charts from a test-bench CSV export.
#[derive(Parser, Debug)]
#[command(name = "cooler_curves", version, about)]
struct Args {
    /// Test-bench CSV export
    input: PathBuf,

    /// JSON file with rated_power / design_duty / design_ua
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rated fan power (kW); overrides the config file
    #[arg(long)]
    rated_power: Option<f64>,

    /// Design air cooler duty (kcal/hr); overrides the config file
    #[arg(long)]
    design_duty: Option<f64>,

    /// Design UA (kcal/hr.m².°C); overrides the config file
    #[arg(long)]
    design_ua: Option<f64>,

    /// Directory the chart PNGs are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    // Threshold problems are fatal before any chart work starts.
    let thresholds = config::resolve(
        args.config.as_deref(),
        ThresholdOverrides {
            rated_power: args.rated_power,
            design_duty: args.design_duty,
            design_ua: args.design_ua,
        },
    )?;

    let table = BenchTable::load(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    info!(
        "loaded {} rows from {}",
        table.row_count(),
        table.path().display()
    );

    let output = pipeline::run(table.frame(), &thresholds)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let ua_duty_path = args.out_dir.join(UA_DUTY_FILE);
    render_chart(&output.performance, &ua_duty_path)?;
    info!("wrote {}", ua_duty_path.display());

    let fan_power_path = args.out_dir.join(FAN_POWER_FILE);
    render_chart(&output.fan_power, &fan_power_path)?;
    info!("wrote {}", fan_power_path.display());

    output.report.emit();

    Ok(())
}
