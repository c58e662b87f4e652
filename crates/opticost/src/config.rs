//! ViT and optical-core configuration.
//!
//! All numeric inputs are clamped to a per-field floor at the edit
//! boundary rather than rejected, so the calculation engine downstream
//! never observes a zero or negative divisor. There is no fail-fast
//! validation path anywhere in this module.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ScenarioError;

// ── Field floors ──────────────────────────────────────────────────

pub const MIN_EMBEDDING_DIM: u32 = 64;
pub const MIN_NUM_HEADS: u32 = 1;
pub const MIN_IMAGE_SIZE: u32 = 32;
pub const MIN_PATCH_SIZE: u32 = 4;

/// Clamp a raw edit to its per-field floor. Never fails.
pub fn clamp_min(value: u32, floor: u32) -> u32 {
    value.max(floor)
}

// ── Sequence-length derivations ───────────────────────────────────

/// Sequence length used by the config model: `floor((image/patch)²) + 1`
/// (patch tokens plus one class token).
///
/// The floor is applied to the squared ratio, not to the ratio itself:
/// for image 225, patch 16 the result is `floor(14.0625²) + 1 = 198`.
pub fn derive_sequence_length_floored(image_size: u32, patch_size: u32) -> f64 {
    let ratio = f64::from(image_size) / f64::from(patch_size);
    (ratio * ratio).floor() + 1.0
}

/// Sequence length used by the sweep-over-image-size path:
/// `(image/patch)² + 1`, deliberately NOT floored.
///
/// The two derivations diverge for ratios that are not whole; they are
/// kept as two named functions so neither path silently changes the
/// other's output series.
pub fn derive_sequence_length_exact(image_size: f64, patch_size: f64) -> f64 {
    let ratio = image_size / patch_size;
    ratio * ratio + 1.0
}

// ── ViT configuration ─────────────────────────────────────────────

/// Vision Transformer hyperparameters.
///
/// `sequence_length` is derived from `image_size` and `patch_size` and
/// re-derived by every setter that touches either. It is stored as `f64`
/// because the sweep generator's exact derivation can produce fractional
/// lengths; the floored path always stores a whole value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViTConfig {
    pub embedding_dim: u32,
    pub num_heads: u32,
    pub image_size: u32,
    pub patch_size: u32,
    pub sequence_length: f64,
}

impl ViTConfig {
    /// Build a config from raw edits, clamping each field to its floor
    /// and deriving the sequence length.
    pub fn new(embedding_dim: u32, num_heads: u32, image_size: u32, patch_size: u32) -> Self {
        let image_size = clamp_min(image_size, MIN_IMAGE_SIZE);
        let patch_size = clamp_min(patch_size, MIN_PATCH_SIZE);
        Self {
            embedding_dim: clamp_min(embedding_dim, MIN_EMBEDDING_DIM),
            num_heads: clamp_min(num_heads, MIN_NUM_HEADS),
            image_size,
            patch_size,
            sequence_length: derive_sequence_length_floored(image_size, patch_size),
        }
    }

    pub fn set_embedding_dim(&mut self, value: u32) {
        self.embedding_dim = clamp_min(value, MIN_EMBEDDING_DIM);
    }

    pub fn set_num_heads(&mut self, value: u32) {
        self.num_heads = clamp_min(value, MIN_NUM_HEADS);
    }

    pub fn set_image_size(&mut self, value: u32) {
        self.image_size = clamp_min(value, MIN_IMAGE_SIZE);
        self.rederive_sequence_length();
    }

    pub fn set_patch_size(&mut self, value: u32) {
        self.patch_size = clamp_min(value, MIN_PATCH_SIZE);
        self.rederive_sequence_length();
    }

    fn rederive_sequence_length(&mut self) {
        self.sequence_length = derive_sequence_length_floored(self.image_size, self.patch_size);
    }

    /// Per-head dimension `d_k = d / h` as real division.
    ///
    /// Heads that do not evenly divide the embedding dim are allowed;
    /// the quotient is simply non-integral and only feeds the FLOP
    /// display, never an access count.
    pub fn head_dim(&self) -> f64 {
        f64::from(self.embedding_dim) / f64::from(self.num_heads)
    }
}

impl Default for ViTConfig {
    /// ViT-Base/16 at 224px: the estimator's baseline model.
    fn default() -> Self {
        Self::new(768, 12, 224, 16)
    }
}

// ── Optical-core configuration ────────────────────────────────────

/// Photonic optical-core accelerator parameters.
///
/// Wavelength channels and microrings follow the WDM crossbar layout:
/// each wavelength channel drives a bank of microring modulators, and
/// `parallel_ops` banks operate concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalCoreConfig {
    pub wavelength_channels: u32,
    pub microrings_per_channel: u32,
    pub parallel_ops: u32,
    /// Energy per access in raw units; the display layer scales to μJ.
    pub energy_per_access: f64,
    pub throughput_gops: f64,
    /// Reserved: accepted and carried through, used by no derived metric.
    pub clock_cycles_per_op: u32,
}

impl OpticalCoreConfig {
    /// Build a config from raw edits. Every divisor-contributing field
    /// is floored at 1 so downstream divisions stay finite.
    pub fn new(
        wavelength_channels: u32,
        microrings_per_channel: u32,
        parallel_ops: u32,
        energy_per_access: f64,
        throughput_gops: f64,
        clock_cycles_per_op: u32,
    ) -> Self {
        Self {
            wavelength_channels: clamp_min(wavelength_channels, 1),
            microrings_per_channel: clamp_min(microrings_per_channel, 1),
            parallel_ops: clamp_min(parallel_ops, 1),
            energy_per_access: energy_per_access.max(0.0),
            throughput_gops: throughput_gops.max(1.0),
            clock_cycles_per_op: clamp_min(clock_cycles_per_op, 1),
        }
    }
}

impl Default for OpticalCoreConfig {
    fn default() -> Self {
        Self::new(32, 64, 32, 0.1, 100.0, 1)
    }
}

// ── Sweepable parameters ──────────────────────────────────────────

/// The ViT parameter varied by a sweep.
///
/// Sweeping `sequence_length` sets the field directly, bypassing the
/// image/patch derivation — an intentional decoupling for exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    EmbeddingDim,
    SequenceLength,
    NumHeads,
    ImageSize,
}

impl SweepParameter {
    pub const ALL: [Self; 4] = [
        Self::EmbeddingDim,
        Self::SequenceLength,
        Self::NumHeads,
        Self::ImageSize,
    ];

    /// Symbol used in step formulas and axis labels.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::EmbeddingDim => "d",
            Self::SequenceLength => "L",
            Self::NumHeads => "h",
            Self::ImageSize => "I",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EmbeddingDim => "embedding dimension",
            Self::SequenceLength => "sequence length",
            Self::NumHeads => "attention heads",
            Self::ImageSize => "image size",
        }
    }

    /// Default exploration range when neither the CLI nor the scenario
    /// file provides one.
    pub fn default_range(&self) -> SweepRange {
        match self {
            Self::EmbeddingDim => SweepRange::new(256.0, 1024.0, 256.0),
            Self::SequenceLength => SweepRange::new(64.0, 512.0, 64.0),
            Self::NumHeads => SweepRange::new(4.0, 24.0, 4.0),
            Self::ImageSize => SweepRange::new(64.0, 384.0, 64.0),
        }
    }
}

impl std::fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EmbeddingDim => "embedding-dim",
            Self::SequenceLength => "sequence-length",
            Self::NumHeads => "num-heads",
            Self::ImageSize => "image-size",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SweepParameter {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "embedding-dim" | "embedding_dim" => Ok(Self::EmbeddingDim),
            "sequence-length" | "sequence_length" => Ok(Self::SequenceLength),
            "num-heads" | "num_heads" => Ok(Self::NumHeads),
            "image-size" | "image_size" => Ok(Self::ImageSize),
            other => Err(ScenarioError::UnknownParameter(other.to_string())),
        }
    }
}

/// Inclusive `min..=max` range stepped by `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SweepRange {
    /// `step` is floored at 1 so a sweep always terminates.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step: step.max(1.0),
        }
    }

    /// Copy with the step floor applied — ranges arriving through serde
    /// bypass [`SweepRange::new`].
    pub fn normalized(&self) -> Self {
        Self::new(self.min, self.max, self.step)
    }
}
