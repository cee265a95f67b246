//! Equation 4: SR-Omega-infinity reflexive score, and the effective step
//! size `alpha_eff` it modulates.

use crate::caos::phi;
use crate::error::{ensure_finite, KernelError, KernelResult};
use crate::linf::{harmonic_mean_weighted, WeightedMetric, DEFAULT_EPSILON};

/// Inputs to the SR-Omega-infinity reflexive score.
#[derive(Debug, Clone, Copy)]
pub struct SrInputs {
    pub awareness: f64,
    pub ethics_ok: bool,
    pub autocorrection: f64,
    pub metacognition: f64,
}

/// Harmonic mean of (awareness, ethics pin, autocorrection, metacognition).
/// Returns `0.0` immediately if `ethics_ok` is `false` — any of the four
/// collapsing (ethics hardest of all) drops SR toward zero, which in turn
/// zeroes `alpha_eff` below.
pub fn sr_omega_infinity(inputs: SrInputs) -> KernelResult<f64> {
    if !inputs.ethics_ok {
        return Ok(0.0);
    }

    ensure_finite("awareness", inputs.awareness)?;
    ensure_finite("autocorrection", inputs.autocorrection)?;
    ensure_finite("metacognition", inputs.metacognition)?;

    let metrics = [
        WeightedMetric {
            value: inputs.awareness.clamp(0.0, 1.0),
            weight: 0.25,
        },
        WeightedMetric {
            value: 1.0,
            weight: 0.25,
        },
        WeightedMetric {
            value: inputs.autocorrection.clamp(0.0, 1.0),
            weight: 0.25,
        },
        WeightedMetric {
            value: inputs.metacognition.clamp(0.0, 1.0),
            weight: 0.25,
        },
    ];

    let score = harmonic_mean_weighted(&metrics, DEFAULT_EPSILON)
        .map_err(|_| KernelError::EmptyMetrics)?;
    Ok(score.clamp(0.0, 1.0))
}

/// `alpha_eff = clamp(alpha_0 * tanh(gamma * CAOS+) * SR, 0, alpha_0)`.
///
/// Always `0` when `sr == 0` or `caos_plus <= 0`. The `tanh(gamma * CAOS+)`
/// saturation is applied uniformly here for every caller — no raw-SR
/// shortcut is offered.
pub fn alpha_effective(alpha_0: f64, caos_plus: f64, gamma: f64, sr: f64) -> KernelResult<f64> {
    ensure_finite("alpha_0", alpha_0)?;
    ensure_finite("caos_plus", caos_plus)?;
    ensure_finite("gamma", gamma)?;
    ensure_finite("sr", sr)?;

    if alpha_0 < 0.0 {
        return Err(KernelError::InvalidInput {
            field: "alpha_0",
            reason: "must be non-negative".into(),
        });
    }

    if caos_plus <= 0.0 || sr <= 0.0 {
        return Ok(0.0);
    }

    let saturated = phi(caos_plus, gamma);
    let raw = alpha_0 * saturated * sr;
    Ok(raw.clamp(0.0, alpha_0))
}
