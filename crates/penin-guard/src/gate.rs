//! The ten individual Σ-Guard gates, evaluated in a fixed order.
//!
//! Every gate is a pure predicate over [`crate::input::GateInputs`] plus a
//! [`crate::thresholds::GuardThresholds`]. None of them short-circuit —
//! [`crate::verdict::evaluate`] runs all ten and records every
//! [`GateResult`] regardless of earlier failures, so the verdict always
//! carries the full diagnostic set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::GateInputs;
use crate::thresholds::GuardThresholds;

/// Stable names for the ten gates, in evaluation order.
pub const GATE_NAMES: [&str; 10] = [
    "contractivity",
    "calibration",
    "bias",
    "reflexivity",
    "coherence",
    "improvement",
    "cost",
    "amplifier_floor",
    "consent",
    "sustainability",
];

/// One gate's verdict: whether it passed, the measured value, the
/// threshold it was checked against, and a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResult {
    pub name: String,
    pub passed: bool,
    pub value: f64,
    pub threshold: f64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

fn result(name: &str, passed: bool, value: f64, threshold: f64, reason: String) -> GateResult {
    GateResult {
        name: name.to_string(),
        passed,
        value,
        threshold,
        reason,
        timestamp: Utc::now(),
    }
}

/// Gate 1: contractivity, `rho < rho_max`.
pub fn contractivity(inputs: &GateInputs, thresholds: &GuardThresholds) -> GateResult {
    let passed = inputs.rho < thresholds.rho_max;
    let reason = if passed {
        format!("rho {:.4} < rho_max {:.4}", inputs.rho, thresholds.rho_max)
    } else {
        format!("rho {:.4} >= rho_max {:.4}", inputs.rho, thresholds.rho_max)
    };
    result(GATE_NAMES[0], passed, inputs.rho, thresholds.rho_max, reason)
}

/// Gate 2: calibration, `ece <= ece_max`.
pub fn calibration(inputs: &GateInputs, thresholds: &GuardThresholds) -> GateResult {
    let passed = inputs.ece <= thresholds.ece_max;
    let reason = if passed {
        format!("ece {:.4} <= ece_max {:.4}", inputs.ece, thresholds.ece_max)
    } else {
        format!("ece {:.4} > ece_max {:.4}", inputs.ece, thresholds.ece_max)
    };
    result(GATE_NAMES[1], passed, inputs.ece, thresholds.ece_max, reason)
}

/// Gate 3: bias, `rho_bias <= bias_max`.
pub fn bias(inputs: &GateInputs, thresholds: &GuardThresholds) -> GateResult {
    let passed = inputs.rho_bias <= thresholds.bias_max;
    let reason = if passed {
        format!(
            "rho_bias {:.4} <= bias_max {:.4}",
            inputs.rho_bias, thresholds.bias_max
        )
    } else {
        format!(
            "rho_bias {:.4} > bias_max {:.4}",
            inputs.rho_bias, thresholds.bias_max
        )
    };
    result(GATE_NAMES[2], passed, inputs.rho_bias, thresholds.bias_max, reason)
}

/// Gate 4: reflexivity, `sr >= sr_min`.
pub fn reflexivity(inputs: &GateInputs, thresholds: &GuardThresholds) -> GateResult {
    let passed = inputs.sr >= thresholds.sr_min;
    let reason = if passed {
        format!("sr {:.4} >= sr_min {:.4}", inputs.sr, thresholds.sr_min)
    } else {
        format!("sr {:.4} < sr_min {:.4}", inputs.sr, thresholds.sr_min)
    };
    result(GATE_NAMES[3], passed, inputs.sr, thresholds.sr_min, reason)
}

/// Gate 5: coherence, `G >= G_min`.
pub fn coherence(inputs: &GateInputs, thresholds: &GuardThresholds) -> GateResult {
    let passed = inputs.coherence_g >= thresholds.coherence_min;
    let reason = if passed {
        format!(
            "G {:.4} >= G_min {:.4}",
            inputs.coherence_g, thresholds.coherence_min
        )
    } else {
        format!(
            "G {:.4} < G_min {:.4}",
            inputs.coherence_g, thresholds.coherence_min
        )
    };
    result(
        GATE_NAMES[4],
        passed,
        inputs.coherence_g,
        thresholds.coherence_min,
        reason,
    )
}

/// Gate 6: improvement (the death gate), `delta_linf >= beta_min`.
pub fn improvement(inputs: &GateInputs, thresholds: &GuardThresholds) -> GateResult {
    let passed = inputs.delta_linf >= thresholds.beta_min;
    let reason = if passed {
        format!(
            "delta_linf {:.4} >= beta_min {:.4}",
            inputs.delta_linf, thresholds.beta_min
        )
    } else {
        format!(
            "delta_linf {:.4} < beta_min {:.4}",
            inputs.delta_linf, thresholds.beta_min
        )
    };
    result(
        GATE_NAMES[5],
        passed,
        inputs.delta_linf,
        thresholds.beta_min,
        reason,
    )
}

/// Gate 7: cost, `cost_increase <= cost_max`.
pub fn cost(inputs: &GateInputs, thresholds: &GuardThresholds) -> GateResult {
    let passed = inputs.cost_increase <= thresholds.cost_max;
    let reason = if passed {
        format!(
            "cost_increase {:.4} <= cost_max {:.4}",
            inputs.cost_increase, thresholds.cost_max
        )
    } else {
        format!(
            "cost_increase {:.4} > cost_max {:.4}",
            inputs.cost_increase, thresholds.cost_max
        )
    };
    result(
        GATE_NAMES[6],
        passed,
        inputs.cost_increase,
        thresholds.cost_max,
        reason,
    )
}

/// Gate 8: amplifier floor, `kappa >= kappa_min`.
pub fn amplifier_floor(inputs: &GateInputs, thresholds: &GuardThresholds) -> GateResult {
    let passed = inputs.kappa >= thresholds.kappa_min;
    let reason = if passed {
        format!(
            "kappa {:.4} >= kappa_min {:.4}",
            inputs.kappa, thresholds.kappa_min
        )
    } else {
        format!(
            "kappa {:.4} < kappa_min {:.4}",
            inputs.kappa, thresholds.kappa_min
        )
    };
    result(
        GATE_NAMES[7],
        passed,
        inputs.kappa,
        thresholds.kappa_min,
        reason,
    )
}

/// Gate 9: consent, required `== true`.
pub fn consent(inputs: &GateInputs) -> GateResult {
    let passed = inputs.consent;
    let reason = if passed {
        "consent obtained".to_string()
    } else {
        "consent not obtained".to_string()
    };
    result(GATE_NAMES[8], passed, if passed { 1.0 } else { 0.0 }, 1.0, reason)
}

/// Gate 10: sustainability, required `== true`.
pub fn sustainability(inputs: &GateInputs) -> GateResult {
    let passed = inputs.eco_ok;
    let reason = if passed {
        "ecological envelope satisfied".to_string()
    } else {
        "ecological envelope breached".to_string()
    };
    result(GATE_NAMES[9], passed, if passed { 1.0 } else { 0.0 }, 1.0, reason)
}

/// Evaluates all ten gates, in order, against `inputs`. Does not
/// short-circuit: every gate is always computed and returned.
pub fn evaluate_all(inputs: &GateInputs, thresholds: &GuardThresholds) -> Vec<GateResult> {
    vec![
        contractivity(inputs, thresholds),
        calibration(inputs, thresholds),
        bias(inputs, thresholds),
        reflexivity(inputs, thresholds),
        coherence(inputs, thresholds),
        improvement(inputs, thresholds),
        cost(inputs, thresholds),
        amplifier_floor(inputs, thresholds),
        consent(inputs),
        sustainability(inputs),
    ]
}
