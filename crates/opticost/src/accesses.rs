//! Access-count accounting for one ViT forward pass on the optical core.
//!
//! [`access_profile`] is the calculation engine: a pure function from a
//! [`ViTConfig`] snapshot to exactly six named steps with formulas,
//! derivation narratives, and access counts, plus aggregate totals.
//! The FLOP count on each step is display-only and never feeds back
//! into the access accounting.

use serde::{Deserialize, Serialize};

use crate::config::ViTConfig;

/// The six calculation phases, always produced in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InputPreparation,
    QueryProjection,
    KeyProjection,
    ValueProjection,
    AttentionScores,
    WeightedSum,
}

impl Phase {
    pub const ALL: [Self; 6] = [
        Self::InputPreparation,
        Self::QueryProjection,
        Self::KeyProjection,
        Self::ValueProjection,
        Self::AttentionScores,
        Self::WeightedSum,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::InputPreparation => "Input Preparation",
            Self::QueryProjection => "Query Projection",
            Self::KeyProjection => "Key Projection",
            Self::ValueProjection => "Value Projection",
            Self::AttentionScores => "Attention Scores",
            Self::WeightedSum => "Weighted Sum",
        }
    }

    /// Chart color consumed by the pie/bar renderers.
    pub fn display_color(&self) -> &'static str {
        match self {
            Self::InputPreparation => "#94a3b8",
            Self::QueryProjection => "#3b82f6",
            Self::KeyProjection => "#8b5cf6",
            Self::ValueProjection => "#ec4899",
            Self::AttentionScores => "#f59e0b",
            Self::WeightedSum => "#10b981",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::InputPreparation => {
                "Patch embedding: tile the image, flatten each patch, prepend the class token"
            }
            Self::QueryProjection => "Project the token sequence into the query space",
            Self::KeyProjection => "Project the token sequence into the key space",
            Self::ValueProjection => "Project the token sequence into the value space",
            Self::AttentionScores => "Score every token pair in every head (Q·Kᵀ)",
            Self::WeightedSum => "Blend values by attention weight in every head",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One step of the access derivation, ready for table or chart display.
///
/// `name`, `description`, and `display_color` are denormalized from the
/// phase so JSON consumers get a self-contained record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    pub phase: Phase,
    pub name: String,
    /// Symbolic formula with the config's values substituted in.
    pub formula: String,
    /// Human-readable derivation text for the explanation panel.
    pub narrative: String,
    pub description: String,
    pub display_color: String,
    /// Optical accesses charged to this step.
    pub accesses: f64,
    /// Matrix-multiply FLOPs, display only.
    pub flops: f64,
}

impl CalculationStep {
    fn new(phase: Phase, formula: String, narrative: String, accesses: f64, flops: f64) -> Self {
        Self {
            phase,
            name: phase.name().to_string(),
            formula,
            narrative,
            description: phase.description().to_string(),
            display_color: phase.display_color().to_string(),
            accesses,
            flops,
        }
    }
}

/// The full six-step derivation with aggregate totals.
///
/// `total_accesses == projection_accesses + attention_accesses` holds
/// exactly: the total is computed from the two partial sums, not by
/// re-summing the step list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessProfile {
    pub steps: Vec<CalculationStep>,
    pub total_accesses: f64,
    pub projection_accesses: f64,
    pub attention_accesses: f64,
}

/// Derive the six-step access profile for one ViT configuration.
///
/// Pure and deterministic: identical inputs always produce identical
/// output, and the function touches no shared state, so the sweep
/// generator can call it once per data point.
pub fn access_profile(vit: &ViTConfig) -> AccessProfile {
    let d = f64::from(vit.embedding_dim);
    let h = f64::from(vit.num_heads);
    let l = vit.sequence_length;
    let dk = vit.head_dim();

    let projection = l * d;
    let attention = l * l * h;
    let projection_flops = l * d * d;
    let attention_flops = h * l * l * dk;

    let projection_formula = format!("L × d = {l} × {d} = {projection}");
    let attention_formula = format!("L × L × h = {l} × {l} × {h} = {attention}");

    let steps = vec![
        CalculationStep::new(
            Phase::InputPreparation,
            "0".to_string(),
            format!(
                "The {image}×{image} image is cut into {patch}×{patch} patches and a class \
                 token is prepended, giving L = {l} tokens of width d = {d}. Preparation \
                 itself charges no optical accesses.",
                image = vit.image_size,
                patch = vit.patch_size,
            ),
            0.0,
            0.0,
        ),
        projection_step(Phase::QueryProjection, &projection_formula, l, d, projection, projection_flops),
        projection_step(Phase::KeyProjection, &projection_formula, l, d, projection, projection_flops),
        projection_step(Phase::ValueProjection, &projection_formula, l, d, projection, projection_flops),
        CalculationStep::new(
            Phase::AttentionScores,
            attention_formula.clone(),
            format!(
                "Each of the {h} heads scores all {l}×{l} token pairs: \
                 {l} × {l} × {h} = {attention} accesses \
                 ({h} × {l} × {l} × {dk} = {attention_flops} FLOPs with d_k = {dk})."
            ),
            attention,
            attention_flops,
        ),
        CalculationStep::new(
            Phase::WeightedSum,
            attention_formula,
            format!(
                "Each head blends its {l} value rows under {l}×{l} attention weights: \
                 {l} × {l} × {h} = {attention} accesses \
                 ({h} × {l} × {l} × {dk} = {attention_flops} FLOPs with d_k = {dk})."
            ),
            attention,
            attention_flops,
        ),
    ];

    let projection_accesses = projection + projection + projection;
    let attention_accesses = attention + attention;

    AccessProfile {
        steps,
        total_accesses: projection_accesses + attention_accesses,
        projection_accesses,
        attention_accesses,
    }
}

fn projection_step(
    phase: Phase,
    formula: &str,
    l: f64,
    d: f64,
    accesses: f64,
    flops: f64,
) -> CalculationStep {
    let space = match phase {
        Phase::QueryProjection => "query",
        Phase::KeyProjection => "key",
        Phase::ValueProjection => "value",
        _ => unreachable!("projection_step called with a non-projection phase"),
    };
    CalculationStep::new(
        phase,
        formula.to_string(),
        format!(
            "Multiplying the {l}×{d} token matrix by the {d}×{d} {space} weight matrix \
             writes {l} × {d} = {accesses} output elements \
             ({l} × {d} × {d} = {flops} FLOPs)."
        ),
        accesses,
        flops,
    )
}
