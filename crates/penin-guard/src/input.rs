//! `GateInputs`: the raw measurements Σ-Guard checks against its thresholds.

use serde::{Deserialize, Serialize};

/// One candidate's measurements, gathered before the gate pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GateInputs {
    pub rho: f64,
    pub ece: f64,
    pub rho_bias: f64,
    pub sr: f64,
    pub coherence_g: f64,
    pub delta_linf: f64,
    pub cost_increase: f64,
    pub kappa: f64,
    pub consent: bool,
    pub eco_ok: bool,
}
