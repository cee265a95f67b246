//! Σ-Guard (C3): the ten-gate non-compensatory fail-closed pipeline.
//!
//! Combines [`penin_kernel`] metrics and [`penin_ethics`]'s verdict into a
//! single [`verdict::GuardVerdict`]. Every gate is always evaluated — this
//! crate never short-circuits — so the verdict always carries the full
//! diagnostic set regardless of which gate (if any) failed first.

pub mod gate;
pub mod input;
pub mod thresholds;
pub mod verdict;

pub use gate::{GateResult, GATE_NAMES};
pub use input::GateInputs;
pub use thresholds::GuardThresholds;
pub use verdict::{evaluate, evaluate_with_policy, Action, ActionPolicy, DefaultActionPolicy, GuardVerdict};
