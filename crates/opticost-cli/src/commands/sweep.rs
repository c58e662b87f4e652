use std::path::Path;

use opticost::config::{SweepParameter, SweepRange};
use opticost::sweep::{sweep, SweepPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}', expected 'text', 'csv', or 'json'"
            )),
        }
    }
}

/// CLI range flags; any field left `None` falls back to the scenario's
/// sweep range (or the parameter's default range).
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

pub fn run(
    parameter: SweepParameter,
    path: Option<&Path>,
    over: RangeOverride,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = super::load_scenario(path)?;
    let (vit, core) = scenario.resolve();

    let base = scenario.sweep_range(parameter);
    let range = SweepRange::new(
        over.min.unwrap_or(base.min),
        over.max.unwrap_or(base.max),
        over.step.unwrap_or(base.step),
    );

    let points: Vec<SweepPoint> = sweep(parameter, range, &vit, &core).collect();

    match format {
        OutputFormat::Text => render_text(parameter, &points),
        OutputFormat::Csv => render_csv(parameter, &points),
        OutputFormat::Json => render_json(&points)?,
    }

    Ok(())
}

fn render_text(parameter: SweepParameter, points: &[SweepPoint]) {
    println!("Sweep over {} ({})", parameter.label(), parameter.symbol());
    println!();
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12} {:>14} {:>10}",
        parameter.symbol(),
        "total (M)",
        "proj (M)",
        "attn (M)",
        "energy",
        "time (ms)",
        "tput %"
    );
    for p in points {
        println!(
            "{:>10} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>14.8} {:>10.4}",
            p.value,
            p.total_maccesses,
            p.projection_maccesses,
            p.attention_maccesses,
            p.energy,
            p.execution_time_ms,
            p.throughput_utilization_percent
        );
    }
    println!();
    println!("{} point(s)", points.len());
}

fn render_csv(parameter: SweepParameter, points: &[SweepPoint]) {
    println!(
        "{},total_maccesses,projection_maccesses,attention_maccesses,energy,execution_time_ms,throughput_utilization_percent",
        parameter
    );
    for p in points {
        println!(
            "{},{},{},{},{},{},{}",
            p.value,
            p.total_maccesses,
            p.projection_maccesses,
            p.attention_maccesses,
            p.energy,
            p.execution_time_ms,
            p.throughput_utilization_percent
        );
    }
}

fn render_json(points: &[SweepPoint]) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(points)?);
    Ok(())
}
