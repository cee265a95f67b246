//! `PeninConfig`: the single, serde-deserializable configuration
//! object a host assembles (from TOML/YAML/env, or in code) and hands to
//! [`crate::PeninCore::new`]. The core itself does no file I/O for
//! configuration — that loading is the host's job.

use serde::{Deserialize, Serialize};

use penin_ethics::EthicsThresholds;
use penin_evolution::{EvolutionConfig, SpiWeights, DEFAULT_SPI_TAU};
use penin_guard::GuardThresholds;
use penin_mutate::BatchStrategy;

/// Every tunable a host may need to override, flattened into
/// one struct so a host can load it as a single TOML/YAML/JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeninConfig {
    pub guard_thresholds: GuardThresholds,
    pub ethics_thresholds: EthicsThresholds,
    pub lambda_c: f64,
    pub epsilon: f64,
    pub alpha_0: f64,
    pub gamma: f64,
    pub lyapunov_tolerance: f64,
    pub stability_reference: Option<Vec<f64>>,
    pub box_bounds: Option<(Vec<f64>, Vec<f64>)>,
    pub max_norm: Option<f64>,
    pub spi_tau: f64,
    pub spi_weights: SpiWeights,
    pub strategy: BatchStrategy,
    /// Rolling metric-window capacity (C8).
    pub window_capacity: usize,
    /// Daily monetary budget in USD.
    pub daily_budget_usd: f64,
    /// Residual floor below which the loop halts gracefully.
    pub budget_floor_usd: f64,
    /// How many checkpoints the rolling store retains.
    pub checkpoint_retention: usize,
}

impl Default for PeninConfig {
    fn default() -> Self {
        Self {
            guard_thresholds: GuardThresholds::default(),
            ethics_thresholds: EthicsThresholds::default(),
            lambda_c: 0.5,
            epsilon: 1e-3,
            alpha_0: 0.1,
            gamma: 1.0,
            lyapunov_tolerance: 1e-6,
            stability_reference: None,
            box_bounds: None,
            max_norm: None,
            spi_tau: DEFAULT_SPI_TAU,
            spi_weights: SpiWeights::default(),
            strategy: BatchStrategy::Conservative,
            window_capacity: 64,
            daily_budget_usd: 100.0,
            budget_floor_usd: 1.0,
            checkpoint_retention: 16,
        }
    }
}

impl PeninConfig {
    /// Splits into the evolution loop's config plus the four scalars
    /// `PeninRuntime::new` needs — the two downstream types this crate
    /// glues together.
    pub fn evolution_config(&self) -> EvolutionConfig {
        EvolutionConfig {
            guard_thresholds: self.guard_thresholds,
            ethics_thresholds: self.ethics_thresholds,
            lambda_c: self.lambda_c,
            epsilon: self.epsilon,
            alpha_0: self.alpha_0,
            gamma: self.gamma,
            lyapunov_tolerance: self.lyapunov_tolerance,
            stability_reference: self.stability_reference.clone(),
            box_bounds: self.box_bounds.clone(),
            max_norm: self.max_norm,
            spi_tau: self.spi_tau,
            spi_weights: self.spi_weights,
            strategy: self.strategy,
        }
    }
}
