//! Optical-core performance metrics derived from a total access count.
//!
//! Pure closed-form accounting; no hardware simulation. The energy
//! value is raw (`accesses × energy_per_access`) and the throughput
//! percentage is unclamped — μJ scaling and the clamp-to-100 are
//! presentation decisions made by the consumers, not here.

use serde::{Deserialize, Serialize};

use crate::config::OpticalCoreConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalMetrics {
    /// Concurrent access capacity: channels × microrings × parallel ops.
    pub max_parallel_ops: u64,
    /// Total accesses over concurrent capacity.
    pub utilization_ratio: f64,
    /// Raw energy, same unit as `energy_per_access × accesses`.
    pub energy_consumption: f64,
    pub execution_time_ms: f64,
    /// May exceed 100; display clamping happens in the sweep series.
    pub throughput_utilization_percent: f64,
}

/// Derive optical-core metrics for a given total access count.
///
/// Divisors are kept ≥ 1 by the [`OpticalCoreConfig`] floors, so every
/// result is finite; there are no error paths.
pub fn optical_metrics(total_accesses: f64, core: &OpticalCoreConfig) -> OpticalMetrics {
    let max_parallel_ops = u64::from(core.wavelength_channels)
        * u64::from(core.microrings_per_channel)
        * u64::from(core.parallel_ops);

    OpticalMetrics {
        max_parallel_ops,
        utilization_ratio: total_accesses / max_parallel_ops as f64,
        energy_consumption: total_accesses * core.energy_per_access,
        execution_time_ms: total_accesses / (core.throughput_gops * 1e9) * 1000.0,
        throughput_utilization_percent: (total_accesses / 1e9) / core.throughput_gops * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASELINE_ACCESSES: f64 = 1_385_304.0;

    #[test]
    fn baseline_max_parallel_ops() {
        let m = optical_metrics(BASELINE_ACCESSES, &OpticalCoreConfig::default());
        assert_eq!(m.max_parallel_ops, 2_097_152); // 32 × 64 × 32
    }

    #[test]
    fn baseline_utilization_ratio() {
        let m = optical_metrics(BASELINE_ACCESSES, &OpticalCoreConfig::default());
        assert_eq!(m.utilization_ratio, BASELINE_ACCESSES / 2_097_152.0);
    }

    #[test]
    fn baseline_energy_is_raw_units() {
        let m = optical_metrics(BASELINE_ACCESSES, &OpticalCoreConfig::default());
        assert!((m.energy_consumption - 138_530.4).abs() < 1e-9);
    }

    #[test]
    fn baseline_execution_time() {
        let m = optical_metrics(BASELINE_ACCESSES, &OpticalCoreConfig::default());
        assert!((m.execution_time_ms - 0.013_853_04).abs() < 1e-12);
    }

    #[test]
    fn throughput_percent_is_not_clamped() {
        let core = OpticalCoreConfig::new(1, 1, 1, 0.1, 1.0, 1);
        let m = optical_metrics(5e9, &core);
        assert_eq!(m.throughput_utilization_percent, 500.0);
    }

    #[test]
    fn zero_accesses_yield_zero_metrics() {
        let m = optical_metrics(0.0, &OpticalCoreConfig::default());
        assert_eq!(m.utilization_ratio, 0.0);
        assert_eq!(m.energy_consumption, 0.0);
        assert_eq!(m.execution_time_ms, 0.0);
        assert_eq!(m.throughput_utilization_percent, 0.0);
    }

    #[test]
    fn deterministic_for_identical_input() {
        let core = OpticalCoreConfig::default();
        assert_eq!(
            optical_metrics(BASELINE_ACCESSES, &core),
            optical_metrics(BASELINE_ACCESSES, &core)
        );
    }

    #[test]
    fn clock_cycles_per_op_is_inert() {
        let mut core = OpticalCoreConfig::default();
        let before = optical_metrics(BASELINE_ACCESSES, &core);
        core.clock_cycles_per_op = 64;
        let after = optical_metrics(BASELINE_ACCESSES, &core);
        assert_eq!(before, after);
    }
}
