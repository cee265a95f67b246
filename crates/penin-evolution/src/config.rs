//! Tunable parameters for one [`crate::cycle::EvolutionLoop`] (the
//! configuration list): gate thresholds, ethics thresholds, the scoring
//! constants C1 needs to derive `linf`/`phi`/`sr`/`alpha_eff`, the
//! Lyapunov reference point, the SPI proxy's tau/weights, and the
//! mutation batch strategy.

use penin_ethics::EthicsThresholds;
use penin_guard::GuardThresholds;
use penin_mutate::BatchStrategy;

use crate::spi::SpiWeights;

#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    pub guard_thresholds: GuardThresholds,
    pub ethics_thresholds: EthicsThresholds,
    /// `lambda_c`, L-infinity's cost-penalty coefficient.
    pub lambda_c: f64,
    /// Epsilon guarding L-infinity's harmonic-mean denominator.
    pub epsilon: f64,
    /// `alpha_0`, the unsaturated step-size ceiling `alpha_effective` scales.
    pub alpha_0: f64,
    /// `gamma` in `phi(z) = tanh(gamma * z)`.
    pub gamma: f64,
    /// Tolerance admitted by the Lyapunov stability check.
    pub lyapunov_tolerance: f64,
    /// The fixed reference point `I*` the Lyapunov potential measures
    /// distance to. `None` skips the Lyapunov check entirely — a host
    /// with no natural "ideal state" to offer still gets every other
    /// gate.
    pub stability_reference: Option<Vec<f64>>,
    /// Optional coordinate-wise bounds (`H`) applied before the ethical
    /// projection (`S`) in the master-equation step.
    pub box_bounds: Option<(Vec<f64>, Vec<f64>)>,
    /// Optional max-norm constraint (`H`), applied after `box_bounds`.
    pub max_norm: Option<f64>,
    pub spi_tau: f64,
    pub spi_weights: SpiWeights,
    pub strategy: BatchStrategy,
}

impl Default for EvolutionConfig {
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
            spi_tau: crate::spi::DEFAULT_SPI_TAU,
            spi_weights: SpiWeights::default(),
            strategy: BatchStrategy::Conservative,
        }
    }
}
