//! Default per-gate thresholds for the ten-gate pipeline.

use serde::{Deserialize, Serialize};

/// Configurable thresholds for every Σ-Guard gate. Defaults match the
/// reference table: contractivity < 0.99, calibration <= 0.01, bias <=
/// 1.05, reflexivity >= 0.80, coherence >= 0.85, improvement >= 0.01, cost
/// <= 0.10, amplifier floor >= 20.0, consent required, sustainability
/// required.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GuardThresholds {
    pub rho_max: f64,
    pub ece_max: f64,
    pub bias_max: f64,
    pub sr_min: f64,
    pub coherence_min: f64,
    pub beta_min: f64,
    pub cost_max: f64,
    pub kappa_min: f64,
}

impl Default for GuardThresholds {
    fn default() -> Self {
        Self {
            rho_max: 0.99,
            ece_max: 0.01,
            bias_max: 1.05,
            sr_min: 0.80,
            coherence_min: 0.85,
            beta_min: 0.01,
            cost_max: 0.10,
            kappa_min: 20.0,
        }
    }
}
