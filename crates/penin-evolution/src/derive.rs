//! Derives `linf`/`phi`/`sr` from a raw measurement bundle (the scoring step:
//! "C1 then derives linf, phi, sr").

use penin_kernel::{
    caos_plus, l_infinity, phi, sr_omega_infinity, CaosInputs, KernelResult, LInfInputs, SrInputs,
    WeightedMetric,
};
use penin_runtime::{MetricVector, RawMetricInputs};

use crate::config::EvolutionConfig;

/// Resolves L-infinity's generic `metrics[1..n]` dimensions to the four
/// measurements the cycle takes that aren't already individually gated by
/// one of Sigma-Guard's other nine gates: the reflexive score, global
/// coherence, calibration quality (`1 - ece`), and bias quality (`1 /
/// rho_bias`), weighted uniformly.
///
/// Returns the populated `MetricVector` plus the raw (pre-tanh) CAOS+
/// amplifier value, which `PcagProofs::caos_plus` carries verbatim.
pub fn derive_metric_vector(raw: RawMetricInputs, config: &EvolutionConfig) -> KernelResult<(MetricVector, f64)> {
    let caos = caos_plus(CaosInputs::new(raw.c, raw.a, raw.o, raw.s), raw.kappa)?;
    let phi_val = phi(caos, config.gamma);

    let sr = sr_omega_infinity(SrInputs {
        awareness: raw.awareness,
        ethics_ok: raw.ethics_ok,
        autocorrection: raw.autocorrection,
        metacognition: raw.metacognition,
    })?;

    let contractivity_ok = raw.rho < config.guard_thresholds.rho_max && raw.rho < 1.0;
    let bias_quality = (1.0 / raw.rho_bias.max(1e-6)).clamp(0.0, 1.0);
    let calibration_quality = (1.0 - raw.ece).clamp(0.0, 1.0);

    let metrics = [
        WeightedMetric { value: sr, weight: 0.25 },
        WeightedMetric { value: raw.g.clamp(0.0, 1.0), weight: 0.25 },
        WeightedMetric { value: calibration_quality, weight: 0.25 },
        WeightedMetric { value: bias_quality, weight: 0.25 },
    ];

    let linf_inputs = LInfInputs::new(&metrics, raw.cost_increase.max(0.0), config.lambda_c)
        .ethical_ok(raw.ethics_ok)
        .contractivity_ok(contractivity_ok)
        .epsilon(config.epsilon);
    let linf = l_infinity(&linf_inputs)?;

    Ok((MetricVector::new(raw, linf, phi_val, sr), caos))
}
