//! Curve Simulation Runner
//!
//! Loads a simulation configuration, walks its market price path against the
//! CASH/RISK bonding curves, and writes the recorded series as JSON.
//!
//! Architecture:
//! config file (+ environment overlay, CURVESIM__* vars) → THIS BINARY → JSON report
//!                                                          (transcript on stderr)

mod reporter;

use anyhow::{Context, Result};
use clap::Parser;
use curvesim_amm::{NullObserver, Simulation, SimulationOutput};
use curvesim_config::{load_config, SimulationConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use reporter::TranscriptReporter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "curvesim")]
#[command(about = "Concentrated-liquidity bonding curve simulator")]
struct Args {
    /// Configuration file path (JSON or TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Environment overlay under <config dir>/environments
    #[arg(short, long)]
    environment: Option<String>,

    /// Output file for the JSON report (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable the per-step transcript
    #[arg(short, long)]
    quiet: bool,

    /// Log level for curvesim crates
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn simulate(config: &SimulationConfig, quiet: bool) -> Result<SimulationOutput> {
    if quiet {
        return Simulation::run(config, NullObserver).context("Simulation setup failed");
    }

    let mut reporter = TranscriptReporter::new();
    let output =
        Simulation::run(config, &mut reporter).context("Simulation setup failed")?;
    reporter.log_summary();
    Ok(output)
}

fn write_report(output: &SimulationOutput, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize report")?;
    match path {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write report to {:?}", path))?;
            info!("📤 Report written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<SimulationOutput> {
    let config = load_config(&args.config, args.environment.as_deref())
        .with_context(|| format!("Failed to load configuration from {:?}", args.config))?;
    info!(
        "⚙️ Loaded {} prices, fee {}",
        config.prices.len(),
        config.fee
    );

    let output = simulate(&config, args.quiet)?;
    write_report(&output, args.output.as_deref())?;
    Ok(output)
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Transcript goes to stderr so the report can be piped
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for target in ["curvesim", "curvesim_amm", "curvesim_config"] {
        filter = filter.add_directive(format!("{target}={}", args.log_level).parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Curve Simulation Starting");
    info!("📁 Config file: {:?}", args.config);
    if let Some(env) = &args.environment {
        info!("🌍 Environment: {}", env);
    }

    let output = run(&args)?;
    info!(
        "✅ Simulation complete: {} steps",
        output.state.recorded_steps()
    );
    Ok(())
}
