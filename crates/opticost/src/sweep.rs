//! Parameter-sweep generator: re-run the full derivation across a range
//! of one varying parameter to produce series data for charting.
//!
//! A [`Sweep`] is a lazy, finite, restartable iterator. Each point is a
//! fresh engine run on a working copy of the baseline config; nothing is
//! incrementally patched between points.

use serde::{Deserialize, Serialize};

use crate::accesses::access_profile;
use crate::config::{
    derive_sequence_length_exact, OpticalCoreConfig, SweepParameter, SweepRange, ViTConfig,
};
use crate::metrics::optical_metrics;

/// One point of a sweep series, pre-scaled for charting.
///
/// Access counts are in mega-accesses and energy is divided by 1000;
/// the throughput percentage is clamped to 100 here (and only here —
/// the raw metric is unclamped).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// The varying parameter's value at this point.
    pub value: f64,
    pub total_maccesses: f64,
    pub projection_maccesses: f64,
    pub attention_maccesses: f64,
    pub energy: f64,
    pub execution_time_ms: f64,
    pub throughput_utilization_percent: f64,
}

/// Lazy iterator over sweep points. `Clone` it to restart.
#[derive(Debug, Clone)]
pub struct Sweep {
    parameter: SweepParameter,
    range: SweepRange,
    baseline: ViTConfig,
    core: OpticalCoreConfig,
    next_value: f64,
}

/// Build a sweep of `parameter` over `range` against a fixed baseline.
///
/// Values step from `range.min` to `range.max` inclusive; an overshoot
/// past `max` is dropped, never interpolated, and `min > max` yields an
/// empty sweep.
pub fn sweep(
    parameter: SweepParameter,
    range: SweepRange,
    baseline: &ViTConfig,
    core: &OpticalCoreConfig,
) -> Sweep {
    let range = range.normalized();
    Sweep {
        parameter,
        range,
        baseline: *baseline,
        core: *core,
        next_value: range.min,
    }
}

impl Sweep {
    pub fn parameter(&self) -> SweepParameter {
        self.parameter
    }

    pub fn range(&self) -> SweepRange {
        self.range
    }

    /// The working config evaluated at one sweep value.
    ///
    /// The varying field is set directly (the baseline was clamped when
    /// it was built; sweep values are exploration inputs, not edits).
    /// Sweeping the image size re-derives the sequence length with the
    /// exact (unfloored) derivation, unlike the config model's own path.
    fn configure(&self, value: f64) -> ViTConfig {
        let mut vit = self.baseline;
        match self.parameter {
            SweepParameter::EmbeddingDim => vit.embedding_dim = value as u32,
            SweepParameter::SequenceLength => vit.sequence_length = value,
            SweepParameter::NumHeads => vit.num_heads = value as u32,
            SweepParameter::ImageSize => {
                vit.image_size = value as u32;
                vit.sequence_length =
                    derive_sequence_length_exact(value, f64::from(vit.patch_size));
            }
        }
        vit
    }

    /// The value the engine actually sees at one step position.
    ///
    /// Integer-backed parameters truncate a fractional step position, and
    /// the emitted [`SweepPoint::value`] is this truncated value, so the
    /// reported axis never disagrees with the evaluated config. Sequence
    /// length is the one `f64`-backed parameter and passes through as-is.
    fn evaluated_value(&self, raw: f64) -> f64 {
        match self.parameter {
            SweepParameter::SequenceLength => raw,
            SweepParameter::EmbeddingDim
            | SweepParameter::NumHeads
            | SweepParameter::ImageSize => f64::from(raw as u32),
        }
    }
}

impl Iterator for Sweep {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<SweepPoint> {
        // Negated `<=` instead of `>`: a NaN bound fails every comparison,
        // so it must end the sweep here rather than step forever.
        if !(self.next_value <= self.range.max) {
            return None;
        }
        let value = self.evaluated_value(self.next_value);
        self.next_value += self.range.step;

        let vit = self.configure(value);
        let profile = access_profile(&vit);
        let metrics = optical_metrics(profile.total_accesses, &self.core);

        Some(SweepPoint {
            value,
            total_maccesses: profile.total_accesses / 1e6,
            projection_maccesses: profile.projection_accesses / 1e6,
            attention_maccesses: profile.attention_accesses / 1e6,
            energy: metrics.energy_consumption / 1000.0,
            execution_time_ms: metrics.execution_time_ms,
            throughput_utilization_percent: metrics.throughput_utilization_percent.min(100.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> (ViTConfig, OpticalCoreConfig) {
        (ViTConfig::default(), OpticalCoreConfig::default())
    }

    #[test]
    fn embedding_dim_sweep_hits_exactly_four_points() {
        let (vit, core) = baseline();
        let range = SweepRange::new(256.0, 1024.0, 256.0);
        let values: Vec<f64> = sweep(SweepParameter::EmbeddingDim, range, &vit, &core)
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![256.0, 512.0, 768.0, 1024.0]);
    }

    #[test]
    fn points_match_direct_engine_runs() {
        let (vit, core) = baseline();
        let range = SweepRange::new(256.0, 1024.0, 256.0);
        for point in sweep(SweepParameter::EmbeddingDim, range, &vit, &core) {
            let mut direct = vit;
            direct.embedding_dim = point.value as u32;
            let profile = access_profile(&direct);
            assert_eq!(point.total_maccesses, profile.total_accesses / 1e6);
            assert_eq!(
                point.projection_maccesses,
                profile.projection_accesses / 1e6
            );
        }
    }

    #[test]
    fn overshoot_is_dropped_not_interpolated() {
        let (vit, core) = baseline();
        let range = SweepRange::new(100.0, 250.0, 100.0);
        let values: Vec<f64> = sweep(SweepParameter::SequenceLength, range, &vit, &core)
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![100.0, 200.0]);
    }

    #[test]
    fn last_point_landing_on_max_is_included() {
        let (vit, core) = baseline();
        let range = SweepRange::new(100.0, 300.0, 100.0);
        let count = sweep(SweepParameter::SequenceLength, range, &vit, &core).count();
        assert_eq!(count, 3);
    }

    #[test]
    fn empty_range_yields_empty_sweep() {
        let (vit, core) = baseline();
        let range = SweepRange::new(500.0, 100.0, 50.0);
        assert_eq!(
            sweep(SweepParameter::EmbeddingDim, range, &vit, &core).count(),
            0
        );
    }

    #[test]
    fn nan_range_bound_yields_empty_sweep() {
        let (vit, core) = baseline();
        let nan_min = SweepRange::new(f64::NAN, 512.0, 64.0);
        assert_eq!(
            sweep(SweepParameter::EmbeddingDim, nan_min, &vit, &core).count(),
            0
        );
        let nan_max = SweepRange::new(64.0, f64::NAN, 64.0);
        assert_eq!(
            sweep(SweepParameter::EmbeddingDim, nan_max, &vit, &core).count(),
            0
        );
    }

    #[test]
    fn fractional_values_report_what_was_evaluated() {
        let (vit, core) = baseline();
        // 100.5, 101.5, 102.5 truncate to the embedding dims the engine
        // actually runs with.
        let range = SweepRange::new(100.5, 102.5, 1.0);
        let points: Vec<SweepPoint> =
            sweep(SweepParameter::EmbeddingDim, range, &vit, &core).collect();
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 101.0, 102.0]);

        let mut direct = vit;
        direct.embedding_dim = 100;
        let profile = access_profile(&direct);
        assert_eq!(points[0].total_maccesses, profile.total_accesses / 1e6);
    }

    #[test]
    fn fractional_sequence_length_passes_through_untruncated() {
        let (vit, core) = baseline();
        let range = SweepRange::new(64.5, 64.5, 1.0);
        let point = sweep(SweepParameter::SequenceLength, range, &vit, &core)
            .next()
            .unwrap();
        assert_eq!(point.value, 64.5);
        let expected = 3.0 * 64.5 * 768.0 + 2.0 * 64.5 * 64.5 * 12.0;
        assert_eq!(point.total_maccesses, expected / 1e6);
    }

    #[test]
    fn clone_restarts_the_sweep() {
        let (vit, core) = baseline();
        let range = SweepRange::new(256.0, 1024.0, 256.0);
        let mut first = sweep(SweepParameter::EmbeddingDim, range, &vit, &core);
        first.next();
        first.next();
        let restarted = sweep(SweepParameter::EmbeddingDim, range, &vit, &core);
        assert_eq!(restarted.count(), 4);
    }

    #[test]
    fn image_size_sweep_uses_exact_derivation() {
        let (vit, core) = baseline();
        // 200/16 = 12.5 → L = 157.25, not floored in the sweep path.
        let range = SweepRange::new(200.0, 200.0, 100.0);
        let point = sweep(SweepParameter::ImageSize, range, &vit, &core)
            .next()
            .unwrap();
        let l = 157.25_f64;
        let expected = 3.0 * l * 768.0 + 2.0 * l * l * 12.0;
        assert_eq!(point.total_maccesses, expected / 1e6);
    }

    #[test]
    fn sequence_length_sweep_bypasses_derivation() {
        let (vit, core) = baseline();
        let range = SweepRange::new(64.0, 64.0, 64.0);
        let point = sweep(SweepParameter::SequenceLength, range, &vit, &core)
            .next()
            .unwrap();
        let expected = 3.0 * 64.0 * 768.0 + 2.0 * 64.0 * 64.0 * 12.0;
        assert_eq!(point.total_maccesses, expected / 1e6);
    }

    #[test]
    fn throughput_percent_is_clamped_in_series() {
        let vit = ViTConfig::default();
        let core = OpticalCoreConfig::new(1, 1, 1, 0.1, 1.0, 1);
        // Long sequences push raw utilization far past 100%.
        let range = SweepRange::new(100_000.0, 100_000.0, 1.0);
        let point = sweep(SweepParameter::SequenceLength, range, &vit, &core)
            .next()
            .unwrap();
        assert_eq!(point.throughput_utilization_percent, 100.0);
    }

    #[test]
    fn energy_is_scaled_by_1000_in_series() {
        let (vit, core) = baseline();
        let range = SweepRange::new(197.0, 197.0, 1.0);
        let point = sweep(SweepParameter::SequenceLength, range, &vit, &core)
            .next()
            .unwrap();
        assert!((point.energy - 138.5304).abs() < 1e-9);
    }
}
