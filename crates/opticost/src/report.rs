//! Serializable estimate report — the structured record the CLI emits
//! for `--format json` and the one external chart/table consumers read.

use serde::{Deserialize, Serialize};

use crate::accesses::{access_profile, AccessProfile};
use crate::config::{OpticalCoreConfig, ViTConfig};
use crate::metrics::{optical_metrics, OpticalMetrics};

pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// Full estimate for one scenario: configs, the six-step access
/// profile, and the derived optical metrics. JSON round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    pub schema_version: String,
    pub scenario: String,
    pub vit: ViTConfig,
    pub optical_core: OpticalCoreConfig,
    pub profile: AccessProfile,
    pub metrics: OpticalMetrics,
}

/// Run the full derivation for one config pair.
pub fn estimate_report(
    scenario: &str,
    vit: &ViTConfig,
    core: &OpticalCoreConfig,
) -> EstimateReport {
    let profile = access_profile(vit);
    let metrics = optical_metrics(profile.total_accesses, core);
    EstimateReport {
        schema_version: REPORT_SCHEMA_VERSION.to_string(),
        scenario: scenario.to_string(),
        vit: *vit,
        optical_core: *core,
        profile,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_report_numbers() {
        let report = estimate_report(
            "defaults",
            &ViTConfig::default(),
            &OpticalCoreConfig::default(),
        );
        assert_eq!(report.profile.total_accesses, 1_385_304.0);
        assert_eq!(report.metrics.max_parallel_ops, 2_097_152);
        assert_eq!(report.scenario, "defaults");
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = estimate_report(
            "vit-base",
            &ViTConfig::default(),
            &OpticalCoreConfig::default(),
        );
        let json = serde_json::to_string(&report).unwrap();
        let parsed: EstimateReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn report_is_deterministic() {
        let vit = ViTConfig::new(512, 8, 256, 32);
        let core = OpticalCoreConfig::default();
        assert_eq!(
            estimate_report("s", &vit, &core),
            estimate_report("s", &vit, &core)
        );
    }
}
