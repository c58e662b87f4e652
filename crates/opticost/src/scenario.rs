//! YAML scenario files: a named ViT + optical-core parameter set with
//! optional sweep ranges.
//!
//! A scenario holds raw, user-edited values. Parsing never clamps;
//! [`validate_scenario`] reports what [`Scenario::resolve`] will do to
//! out-of-range fields, and `resolve` applies the floors and the
//! sequence-length derivation to produce the configs the engine consumes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{
    OpticalCoreConfig, SweepParameter, SweepRange, ViTConfig, MIN_EMBEDDING_DIM, MIN_IMAGE_SIZE,
    MIN_NUM_HEADS, MIN_PATCH_SIZE,
};
use crate::error::{ScenarioError, Severity, Violation};

/// A complete scenario file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub metadata: Metadata,
    pub vit: VitParams,
    pub optical_core: OpticalCoreParams,
    pub sweeps: BTreeMap<SweepParameter, SweepRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub name: String,
    pub description: String,
}

/// Raw ViT parameters as edited; `sequence_length` is always derived,
/// never stored in the file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct VitParams {
    pub embedding_dim: u32,
    pub num_heads: u32,
    pub image_size: u32,
    pub patch_size: u32,
}

impl Default for VitParams {
    fn default() -> Self {
        Self {
            embedding_dim: 768,
            num_heads: 12,
            image_size: 224,
            patch_size: 16,
        }
    }
}

/// Raw optical-core parameters as edited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct OpticalCoreParams {
    pub wavelength_channels: u32,
    pub microrings_per_channel: u32,
    pub parallel_ops: u32,
    pub energy_per_access: f64,
    pub throughput_gops: f64,
    pub clock_cycles_per_op: u32,
}

impl Default for OpticalCoreParams {
    fn default() -> Self {
        Self {
            wavelength_channels: 32,
            microrings_per_channel: 64,
            parallel_ops: 32,
            energy_per_access: 0.1,
            throughput_gops: 100.0,
            clock_cycles_per_op: 1,
        }
    }
}

/// Parse a YAML scenario file.
///
/// # Errors
///
/// Returns [`ScenarioError::Io`] if the file cannot be read, or
/// [`ScenarioError::Yaml`] if the YAML is malformed.
pub fn parse_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let content = std::fs::read_to_string(path)?;
    parse_scenario_str(&content)
}

/// Parse a YAML scenario from a string.
pub fn parse_scenario_str(yaml: &str) -> Result<Scenario, ScenarioError> {
    let scenario: Scenario = serde_yaml::from_str(yaml)?;
    Ok(scenario)
}

/// Validate a parsed scenario.
///
/// Returns a list of violations; the scenario is unusable only if one
/// of them has [`Severity::Error`]. Below-floor values are reported as
/// INFO because `resolve` clamps them rather than failing.
pub fn validate_scenario(scenario: &Scenario) -> Vec<Violation> {
    let mut violations = Vec::new();

    if scenario.vit.patch_size > scenario.vit.image_size {
        violations.push(Violation {
            severity: Severity::Error,
            rule: "SCEN-001".to_string(),
            message: format!(
                "vit.patch_size ({}) exceeds vit.image_size ({})",
                scenario.vit.patch_size, scenario.vit.image_size
            ),
            location: Some("vit.patch_size".to_string()),
        });
    }

    for (parameter, range) in &scenario.sweeps {
        if range.min > range.max {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "SCEN-002".to_string(),
                message: format!(
                    "sweeps.{parameter}: min ({}) exceeds max ({})",
                    range.min, range.max
                ),
                location: Some(format!("sweeps.{parameter}")),
            });
        }
        if range.step < 1.0 {
            violations.push(Violation {
                severity: Severity::Info,
                rule: "SCEN-005".to_string(),
                message: format!(
                    "sweeps.{parameter}: step ({}) below 1 will be clamped to 1",
                    range.step
                ),
                location: Some(format!("sweeps.{parameter}.step")),
            });
        }
    }

    if scenario.vit.num_heads > 0 && scenario.vit.embedding_dim % scenario.vit.num_heads != 0 {
        violations.push(Violation {
            severity: Severity::Warning,
            rule: "SCEN-003".to_string(),
            message: format!(
                "vit.num_heads ({}) does not evenly divide vit.embedding_dim ({}); \
                 the head dimension will be fractional",
                scenario.vit.num_heads, scenario.vit.embedding_dim
            ),
            location: Some("vit.num_heads".to_string()),
        });
    }

    check_floor(
        &mut violations,
        "vit.embedding_dim",
        scenario.vit.embedding_dim,
        MIN_EMBEDDING_DIM,
    );
    check_floor(
        &mut violations,
        "vit.num_heads",
        scenario.vit.num_heads,
        MIN_NUM_HEADS,
    );
    check_floor(
        &mut violations,
        "vit.image_size",
        scenario.vit.image_size,
        MIN_IMAGE_SIZE,
    );
    check_floor(
        &mut violations,
        "vit.patch_size",
        scenario.vit.patch_size,
        MIN_PATCH_SIZE,
    );
    check_floor(
        &mut violations,
        "optical_core.wavelength_channels",
        scenario.optical_core.wavelength_channels,
        1,
    );
    check_floor(
        &mut violations,
        "optical_core.microrings_per_channel",
        scenario.optical_core.microrings_per_channel,
        1,
    );
    check_floor(
        &mut violations,
        "optical_core.parallel_ops",
        scenario.optical_core.parallel_ops,
        1,
    );
    if scenario.optical_core.throughput_gops < 1.0 {
        violations.push(Violation {
            severity: Severity::Info,
            rule: "SCEN-004".to_string(),
            message: format!(
                "optical_core.throughput_gops ({}) below floor 1 will be clamped",
                scenario.optical_core.throughput_gops
            ),
            location: Some("optical_core.throughput_gops".to_string()),
        });
    }

    violations
}

fn check_floor(violations: &mut Vec<Violation>, field: &str, value: u32, floor: u32) {
    if value < floor {
        violations.push(Violation {
            severity: Severity::Info,
            rule: "SCEN-004".to_string(),
            message: format!("{field} ({value}) below floor {floor} will be clamped"),
            location: Some(field.to_string()),
        });
    }
}

impl Scenario {
    /// Apply the floors and derivation, yielding the engine's configs.
    pub fn resolve(&self) -> (ViTConfig, OpticalCoreConfig) {
        let vit = ViTConfig::new(
            self.vit.embedding_dim,
            self.vit.num_heads,
            self.vit.image_size,
            self.vit.patch_size,
        );
        let core = OpticalCoreConfig::new(
            self.optical_core.wavelength_channels,
            self.optical_core.microrings_per_channel,
            self.optical_core.parallel_ops,
            self.optical_core.energy_per_access,
            self.optical_core.throughput_gops,
            self.optical_core.clock_cycles_per_op,
        );
        (vit, core)
    }

    /// The range to sweep `parameter` over: the scenario's entry when
    /// present, otherwise the parameter's default exploration range.
    pub fn sweep_range(&self, parameter: SweepParameter) -> SweepRange {
        self.sweeps
            .get(&parameter)
            .copied()
            .unwrap_or_else(|| parameter.default_range())
    }

    /// Display name: the metadata name, or "defaults" when unset.
    pub fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            "defaults"
        } else {
            &self.metadata.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_SCENARIO: &str = r#"
metadata:
  name: "vit-base"
  description: "ViT-Base/16 at 224px"
"#;

    #[test]
    fn parse_minimal_scenario_fills_defaults() {
        let scenario = parse_scenario_str(MINIMAL_SCENARIO).unwrap();
        assert_eq!(scenario.metadata.name, "vit-base");
        assert_eq!(scenario.vit.embedding_dim, 768);
        assert_eq!(scenario.optical_core.microrings_per_channel, 64);
        assert!(scenario.sweeps.is_empty());
    }

    #[test]
    fn parse_empty_scenario_is_all_defaults() {
        let scenario = parse_scenario_str("{}").unwrap();
        let (vit, core) = scenario.resolve();
        assert_eq!(vit, ViTConfig::default());
        assert_eq!(core, OpticalCoreConfig::default());
        assert_eq!(scenario.display_name(), "defaults");
    }

    #[test]
    fn parse_scenario_with_all_fields() {
        let yaml = r#"
metadata:
  name: "vit-large"
  description: "ViT-Large at 384px"
vit:
  embedding_dim: 1024
  num_heads: 16
  image_size: 384
  patch_size: 16
optical_core:
  wavelength_channels: 64
  microrings_per_channel: 64
  parallel_ops: 16
  energy_per_access: 0.05
  throughput_gops: 200
  clock_cycles_per_op: 2
sweeps:
  embedding_dim:
    min: 256
    max: 1024
    step: 256
  image_size:
    min: 64
    max: 384
    step: 64
"#;
        let scenario = parse_scenario_str(yaml).unwrap();
        assert_eq!(scenario.vit.embedding_dim, 1024);
        assert_eq!(scenario.optical_core.throughput_gops, 200.0);
        assert_eq!(scenario.sweeps.len(), 2);
        let (vit, _) = scenario.resolve();
        assert_eq!(vit.sequence_length, 577.0); // 24² + 1
    }

    #[test]
    fn parse_invalid_yaml_returns_error() {
        assert!(parse_scenario_str("vit: [not: a: map: {{").is_err());
    }

    #[test]
    fn validate_clean_scenario_has_no_findings() {
        let scenario = parse_scenario_str(MINIMAL_SCENARIO).unwrap();
        assert!(validate_scenario(&scenario).is_empty());
    }

    #[test]
    fn validate_patch_exceeding_image_is_an_error() {
        let yaml = "vit:\n  image_size: 32\n  patch_size: 64\n";
        let scenario = parse_scenario_str(yaml).unwrap();
        let violations = validate_scenario(&scenario);
        assert!(violations
            .iter()
            .any(|v| v.severity == Severity::Error && v.rule == "SCEN-001"));
    }

    #[test]
    fn validate_inverted_sweep_range_is_an_error() {
        let yaml = "sweeps:\n  num_heads:\n    min: 24\n    max: 4\n    step: 4\n";
        let scenario = parse_scenario_str(yaml).unwrap();
        let violations = validate_scenario(&scenario);
        assert!(violations
            .iter()
            .any(|v| v.severity == Severity::Error && v.rule == "SCEN-002"));
    }

    #[test]
    fn validate_non_dividing_heads_is_a_warning() {
        let yaml = "vit:\n  embedding_dim: 768\n  num_heads: 10\n";
        let scenario = parse_scenario_str(yaml).unwrap();
        let violations = validate_scenario(&scenario);
        let warns: Vec<_> = violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].rule, "SCEN-003");
    }

    #[test]
    fn validate_below_floor_is_info_and_resolve_clamps() {
        let yaml = "vit:\n  image_size: 10\n  patch_size: 4\n";
        let scenario = parse_scenario_str(yaml).unwrap();
        let violations = validate_scenario(&scenario);
        assert!(violations
            .iter()
            .any(|v| v.severity == Severity::Info && v.rule == "SCEN-004"));
        let (vit, _) = scenario.resolve();
        assert_eq!(vit.image_size, 32);
    }

    #[test]
    fn sweep_range_falls_back_to_default() {
        let scenario = parse_scenario_str("{}").unwrap();
        let range = scenario.sweep_range(SweepParameter::EmbeddingDim);
        assert_eq!(range, SweepParameter::EmbeddingDim.default_range());
    }

    #[test]
    fn scenario_round_trips_through_yaml() {
        let yaml = "vit:\n  embedding_dim: 512\nsweeps:\n  image_size:\n    min: 64\n    max: 256\n    step: 32\n";
        let scenario = parse_scenario_str(yaml).unwrap();
        let dumped = serde_yaml::to_string(&scenario).unwrap();
        let reparsed = parse_scenario_str(&dumped).unwrap();
        assert_eq!(reparsed.vit.embedding_dim, 512);
        assert_eq!(
            reparsed.sweeps[&SweepParameter::ImageSize].max,
            scenario.sweeps[&SweepParameter::ImageSize].max
        );
    }
}
