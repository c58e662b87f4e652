use std::path::Path;

use opticost::accesses::access_profile;
use opticost::metrics::optical_metrics;
use opticost::report::estimate_report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}', expected 'text' or 'json'"
            )),
        }
    }
}

pub fn run(path: Option<&Path>, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = super::load_scenario(path)?;
    let (vit, core) = scenario.resolve();

    if format == OutputFormat::Json {
        let report = estimate_report(scenario.display_name(), &vit, &core);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let profile = access_profile(&vit);
    let m = optical_metrics(profile.total_accesses, &core);

    println!("Scenario: {}", scenario.display_name());
    println!(
        "Optical core: {} channels × {} microrings × {} parallel ops",
        core.wavelength_channels, core.microrings_per_channel, core.parallel_ops
    );
    println!();
    println!("Total accesses:         {}", profile.total_accesses);
    println!("Max parallel ops:       {}", m.max_parallel_ops);
    println!("Utilization ratio:      {:.4}", m.utilization_ratio);
    println!(
        "Energy consumption:     {} (display: {:.4} μJ)",
        m.energy_consumption,
        m.energy_consumption / 1000.0
    );
    println!("Execution time:         {} ms", m.execution_time_ms);
    println!(
        "Throughput utilization: {:.6}% (display cap 100%: {:.6}%)",
        m.throughput_utilization_percent,
        m.throughput_utilization_percent.min(100.0)
    );

    Ok(())
}
