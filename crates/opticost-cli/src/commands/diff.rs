use std::path::Path;

use opticost::accesses::access_profile;
use opticost::metrics::optical_metrics;
use opticost::scenario::parse_scenario;

pub fn run(old_path: &Path, new_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let old = parse_scenario(old_path)?;
    let new = parse_scenario(new_path)?;

    println!(
        "Diff: {} → {}",
        old.display_name(),
        new.display_name()
    );
    println!();

    println!("Configuration changes:");
    let mut changed = 0;
    changed += field("vit.embedding_dim", old.vit.embedding_dim, new.vit.embedding_dim);
    changed += field("vit.num_heads", old.vit.num_heads, new.vit.num_heads);
    changed += field("vit.image_size", old.vit.image_size, new.vit.image_size);
    changed += field("vit.patch_size", old.vit.patch_size, new.vit.patch_size);
    changed += field(
        "optical_core.wavelength_channels",
        old.optical_core.wavelength_channels,
        new.optical_core.wavelength_channels,
    );
    changed += field(
        "optical_core.microrings_per_channel",
        old.optical_core.microrings_per_channel,
        new.optical_core.microrings_per_channel,
    );
    changed += field(
        "optical_core.parallel_ops",
        old.optical_core.parallel_ops,
        new.optical_core.parallel_ops,
    );
    changed += field(
        "optical_core.energy_per_access",
        old.optical_core.energy_per_access,
        new.optical_core.energy_per_access,
    );
    changed += field(
        "optical_core.throughput_gops",
        old.optical_core.throughput_gops,
        new.optical_core.throughput_gops,
    );
    if changed == 0 {
        println!("  (none)");
    }

    let (old_vit, old_core) = old.resolve();
    let (new_vit, new_core) = new.resolve();
    let old_profile = access_profile(&old_vit);
    let new_profile = access_profile(&new_vit);
    let old_metrics = optical_metrics(old_profile.total_accesses, &old_core);
    let new_metrics = optical_metrics(new_profile.total_accesses, &new_core);

    println!();
    println!("Derived workload:");
    delta(
        "total accesses",
        old_profile.total_accesses,
        new_profile.total_accesses,
    );
    delta(
        "projection accesses",
        old_profile.projection_accesses,
        new_profile.projection_accesses,
    );
    delta(
        "attention accesses",
        old_profile.attention_accesses,
        new_profile.attention_accesses,
    );
    delta(
        "energy consumption",
        old_metrics.energy_consumption,
        new_metrics.energy_consumption,
    );
    delta(
        "execution time (ms)",
        old_metrics.execution_time_ms,
        new_metrics.execution_time_ms,
    );
    delta(
        "utilization ratio",
        old_metrics.utilization_ratio,
        new_metrics.utilization_ratio,
    );

    Ok(())
}

fn field<T: PartialEq + std::fmt::Display>(name: &str, old: T, new: T) -> usize {
    if old == new {
        0
    } else {
        println!("  {name}: {old} → {new}");
        1
    }
}

fn delta(name: &str, old: f64, new: f64) {
    if old == new {
        println!("  {name}: {new} (unchanged)");
    } else if old == 0.0 {
        println!("  {name}: {old} → {new}");
    } else {
        let pct = (new - old) / old * 100.0;
        println!("  {name}: {old} → {new} ({pct:+.1}%)");
    }
}
