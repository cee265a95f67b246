//! IR->IC lapidation: the contractive risk-entropy operator.
//!
//! A `RiskProfile` is repeatedly shrunk category-by-category; each step
//! must reduce the Shannon entropy of the (normalized) risk vector by at
//! least a factor `rho < 1`, or the item is rejected outright.

use crate::error::{ensure_finite, KernelError, KernelResult};

/// The nine risk categories the lapidation operator tracks, in the order
/// `RiskProfile::as_array`/`from_array` use.
pub const RISK_CATEGORIES: [&str; 9] = [
    "idolatry",
    "occultism",
    "physical_harm",
    "emotional_harm",
    "spiritual_harm",
    "privacy",
    "bias",
    "fairness",
    "transparency",
];

/// Nine-category risk vector, each component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskProfile {
    pub idolatry: f64,
    pub occultism: f64,
    pub physical_harm: f64,
    pub emotional_harm: f64,
    pub spiritual_harm: f64,
    pub privacy: f64,
    pub bias: f64,
    pub fairness: f64,
    pub transparency: f64,
}

impl RiskProfile {
    pub fn as_array(&self) -> [f64; 9] {
        [
            self.idolatry,
            self.occultism,
            self.physical_harm,
            self.emotional_harm,
            self.spiritual_harm,
            self.privacy,
            self.bias,
            self.fairness,
            self.transparency,
        ]
    }

    pub fn from_array(values: [f64; 9]) -> Self {
        Self {
            idolatry: values[0],
            occultism: values[1],
            physical_harm: values[2],
            emotional_harm: values[3],
            spiritual_harm: values[4],
            privacy: values[5],
            bias: values[6],
            fairness: values[7],
            transparency: values[8],
        }
    }

    /// Shannon entropy (base e) of the vector normalized to a probability
    /// distribution. A degenerate all-zero vector has entropy `0.0`.
    pub fn entropy(&self) -> f64 {
        let values = self.as_array();
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        values
            .iter()
            .filter(|v| **v > 0.0)
            .map(|v| {
                let p = v / total;
                -p * p.ln()
            })
            .sum()
    }
}

/// Per-category shrinkage factors, each strictly inside `(0, 1)`.
#[derive(Debug, Clone, Copy)]
pub struct ShrinkageFactors {
    pub factors: [f64; 9],
}

impl ShrinkageFactors {
    pub fn uniform(rho: f64) -> Self {
        Self { factors: [rho; 9] }
    }
}

/// Configuration for the iterative lapidation loop.
#[derive(Debug, Clone, Copy)]
pub struct LapidationConfig {
    pub max_iterations: u32,
    pub convergence_threshold: f64,
    /// The required per-step entropy contraction factor `rho < 1`.
    pub rho_target: f64,
}

impl Default for LapidationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            convergence_threshold: 1e-6,
            rho_target: 0.95,
        }
    }
}

/// Outcome of running lapidation to convergence (or failure).
#[derive(Debug, Clone)]
pub struct LapidationOutcome {
    pub profile: RiskProfile,
    pub iterations: u32,
    pub converged: bool,
}

/// Applies one shrinkage step: `k'_i = k_i * rho_i` for every category.
pub fn apply_step(profile: &RiskProfile, shrinkage: &ShrinkageFactors) -> KernelResult<RiskProfile> {
    for (i, rho_i) in shrinkage.factors.iter().enumerate() {
        ensure_finite("shrinkage_factor", *rho_i)?;
        if !(0.0 < *rho_i && *rho_i < 1.0) {
            return Err(KernelError::InvalidInput {
                field: "shrinkage_factor",
                reason: format!("factors[{i}] = {rho_i} must lie in (0, 1)"),
            });
        }
    }

    let shrunk = {
        let mut values = profile.as_array();
        for (v, rho_i) in values.iter_mut().zip(shrinkage.factors.iter()) {
            *v *= rho_i;
        }
        RiskProfile::from_array(values)
    };
    Ok(shrunk)
}

/// Checks the per-step contractivity invariant `H(shrunk) <= rho * H(k)`.
pub fn step_is_contractive(before: &RiskProfile, after: &RiskProfile, rho: f64) -> bool {
    after.entropy() <= rho * before.entropy() + 1e-12
}

/// Iterates shrinkage until convergence (aggregate risk change below
/// `convergence_threshold`) or `max_iterations`. Rejects (returns `Ok(None)`)
/// if any step fails the contractivity invariant or the loop never
/// converges within the iteration budget.
pub fn lapidate(
    initial: RiskProfile,
    shrinkage: &ShrinkageFactors,
    config: &LapidationConfig,
) -> KernelResult<Option<LapidationOutcome>> {
    let mut current = initial;
    let mut iterations = 0;

    for _ in 0..config.max_iterations {
        let next = apply_step(&current, shrinkage)?;
        if !step_is_contractive(&current, &next, config.rho_target) {
            return Ok(None);
        }

        let aggregate_change: f64 = current
            .as_array()
            .iter()
            .zip(next.as_array().iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        iterations += 1;
        current = next;

        if aggregate_change < config.convergence_threshold {
            return Ok(Some(LapidationOutcome {
                profile: current,
                iterations,
                converged: true,
            }));
        }
    }

    Ok(Some(LapidationOutcome {
        profile: current,
        iterations,
        converged: false,
    }))
}
