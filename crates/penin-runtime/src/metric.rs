//! `MetricVector`: the per-candidate measurement bundle every cycle
//! produces, clamped at ingestion.

use serde::{Deserialize, Serialize};

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// The raw measurements a host's scoring function reports for one
/// candidate, before `penin-kernel` derives `linf`/`phi`/`sr` from them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawMetricInputs {
    pub c: f64,
    pub a: f64,
    pub o: f64,
    pub s: f64,
    pub awareness: f64,
    pub autocorrection: f64,
    pub metacognition: f64,
    pub ethics_ok: bool,
    pub rho: f64,
    pub ece: f64,
    pub rho_bias: f64,
    pub g: f64,
    pub delta_linf: f64,
    pub kappa: f64,
    pub cost_increase: f64,
    pub consent: bool,
    pub eco_ok: bool,
}

/// The full per-candidate measurement bundle: the raw inputs plus the
/// derived scores `linf`, `phi`, `sr`. `MetricVector` is the record a host
/// and the evolution loop exchange once C1 has computed the derived
/// fields; every `[0, 1]`-typed field is clamped at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricVector {
    pub c: f64,
    pub a: f64,
    pub o: f64,
    pub s: f64,
    pub awareness: f64,
    pub autocorrection: f64,
    pub metacognition: f64,
    pub ethics_ok: bool,
    pub rho: f64,
    pub ece: f64,
    pub rho_bias: f64,
    pub g: f64,
    pub delta_linf: f64,
    pub kappa: f64,
    pub cost_increase: f64,
    pub consent: bool,
    pub eco_ok: bool,
    pub linf: f64,
    pub phi: f64,
    pub sr: f64,
}

impl MetricVector {
    /// Builds a `MetricVector` from raw inputs plus the scores C1 already
    /// derived, clamping every `[0, 1]`-typed field and enforcing the
    /// `ethics_ok == false => sr == 0` invariant.
    pub fn new(raw: RawMetricInputs, linf: f64, phi: f64, sr: f64) -> Self {
        let sr = if raw.ethics_ok { clamp01(sr) } else { 0.0 };
        Self {
            c: clamp01(raw.c),
            a: clamp01(raw.a),
            o: clamp01(raw.o),
            s: clamp01(raw.s),
            awareness: clamp01(raw.awareness),
            autocorrection: clamp01(raw.autocorrection),
            metacognition: clamp01(raw.metacognition),
            ethics_ok: raw.ethics_ok,
            rho: raw.rho,
            ece: raw.ece.max(0.0),
            rho_bias: raw.rho_bias.max(0.0),
            g: clamp01(raw.g),
            delta_linf: raw.delta_linf,
            kappa: raw.kappa,
            cost_increase: raw.cost_increase,
            consent: raw.consent,
            eco_ok: raw.eco_ok,
            linf: clamp01(linf),
            phi,
            sr,
        }
    }

    /// `rho >= 1` must fail the contractivity gate regardless of every
    /// other field (a cross-field invariant).
    pub fn contractivity_ok(&self, rho_max: f64) -> bool {
        self.rho < rho_max && self.rho < 1.0
    }
}
