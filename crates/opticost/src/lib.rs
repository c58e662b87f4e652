//! # opticost
//!
//! Closed-form workload estimation for Vision Transformers on a
//! hypothetical photonic optical-core accelerator.
//!
//! Given a ViT configuration and an optical-core configuration, the
//! engine deterministically derives per-phase access counts (patch
//! embedding, Q/K/V projection, attention scores, weighted sum) and
//! core performance metrics (utilization, energy, execution time), and
//! can re-run the derivation across a range of one varying parameter to
//! produce chartable series. Everything is a pure function over config
//! snapshots; no hardware is simulated and no model is executed.
//!
//! ## Modules
//!
//! - [`config`] — ViT and optical-core parameters, floors, derivations
//! - [`accesses`] — the six-step access calculator
//! - [`metrics`] — optical-core performance metrics
//! - [`sweep`] — parameter-sweep series generator
//! - [`scenario`] — parse and validate YAML scenario files
//! - [`latex`] — LaTeX conversion for formula notation
//! - [`report`] — serializable estimate reports

pub mod accesses;
pub mod config;
pub mod error;
pub mod latex;
pub mod metrics;
pub mod report;
pub mod scenario;
pub mod sweep;
