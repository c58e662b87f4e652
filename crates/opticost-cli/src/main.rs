use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use opticost::config::SweepParameter;

mod commands;

/// Top-level CLI argument parser for the `oc` command
#[derive(Parser)]
#[command(
    name = "oc",
    about = "opticost — ViT workload estimation for a photonic optical core",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `oc` CLI
#[derive(Subcommand)]
enum Commands {
    /// Validate a YAML scenario file
    Validate {
        /// Path to the scenario YAML file
        scenario: PathBuf,
    },
    /// Show the six-step access derivation table
    Steps {
        /// Path to the scenario YAML file (defaults when omitted)
        scenario: Option<PathBuf>,
    },
    /// Show the derived optical-core metrics
    Metrics {
        /// Path to the scenario YAML file (defaults when omitted)
        scenario: Option<PathBuf>,
        /// Output format: text (default) or json (full estimate report)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Sweep one parameter and print the resulting series
    Sweep {
        /// Parameter to vary: embedding-dim, sequence-length, num-heads, or image-size
        parameter: SweepParameter,
        /// Path to the scenario YAML file (defaults when omitted)
        scenario: Option<PathBuf>,
        /// Range start (overrides the scenario's sweep range)
        #[arg(long)]
        min: Option<f64>,
        /// Range end, inclusive (overrides the scenario's sweep range)
        #[arg(long)]
        max: Option<f64>,
        /// Step between points (overrides the scenario's sweep range)
        #[arg(long)]
        step: Option<f64>,
        /// Output format: text (default), csv, or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Display the step formulas with their derivations
    Equations {
        /// Path to the scenario YAML file (defaults when omitted)
        scenario: Option<PathBuf>,
        /// Output format: text (default) or latex
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Compare two scenarios and their derived workloads
    Diff {
        /// Path to the old scenario YAML file
        old: PathBuf,
        /// Path to the new scenario YAML file
        new: PathBuf,
    },
}

/// Dispatch a parsed CLI subcommand to its handler
fn run_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Validate { scenario } => commands::validate::run(&scenario),
        Commands::Steps { scenario } => commands::steps::run(scenario.as_deref()),
        Commands::Metrics { scenario, format } => {
            match commands::metrics::OutputFormat::from_str(&format) {
                Ok(fmt) => commands::metrics::run(scenario.as_deref(), fmt),
                Err(e) => Err(e.into()),
            }
        }
        Commands::Sweep {
            parameter,
            scenario,
            min,
            max,
            step,
            format,
        } => match commands::sweep::OutputFormat::from_str(&format) {
            Ok(fmt) => commands::sweep::run(
                parameter,
                scenario.as_deref(),
                commands::sweep::RangeOverride { min, max, step },
                fmt,
            ),
            Err(e) => Err(e.into()),
        },
        Commands::Equations { scenario, format } => {
            match commands::equations::OutputFormat::from_str(&format) {
                Ok(fmt) => commands::equations::run(scenario.as_deref(), fmt),
                Err(e) => Err(e.into()),
            }
        }
        Commands::Diff { old, new } => commands::diff::run(&old, &new),
    }
}

/// Entry point: parse CLI arguments and run the selected subcommand
fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_command(cli.command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
