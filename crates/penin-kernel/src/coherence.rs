//! Equation 9: Omega-SEA global coherence over the eight top-level module
//! scores.

use std::collections::BTreeMap;

use crate::error::{ensure_finite, KernelError, KernelResult};

/// Default epsilon guarding the harmonic denominator.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// `G = (sum_m w_m / max(eps, s_m))^-1`, harmonic-weighted coherence over
/// named module scores. Weights are looked up by name; a module present in
/// `scores` but missing from `weights` is ignored (so callers can pass a
/// superset), but a module named in `weights` missing from `scores` is an
/// error — the coherence score cannot silently drop a required module.
pub fn omega_sea_coherence(
    scores: &BTreeMap<String, f64>,
    weights: &BTreeMap<String, f64>,
    epsilon: f64,
) -> KernelResult<f64> {
    for module in weights.keys() {
        if !scores.contains_key(module) {
            return Err(KernelError::MissingModule {
                module: module.clone(),
            });
        }
    }

    let mut denom = 0.0;
    for (module, weight) in weights {
        let score = scores[module];
        ensure_finite("module_score", score)?;
        denom += weight / score.max(epsilon);
    }

    if denom <= epsilon {
        return Ok(0.0);
    }

    Ok((1.0 / denom).clamp(0.0, 1.0))
}

/// Identifies the bottleneck module: the one with the lowest
/// weight-scaled score, i.e. the dimension to attribute a coherence
/// failure to.
pub fn diagnose_bottleneck<'a>(
    scores: &'a BTreeMap<String, f64>,
    weights: &BTreeMap<String, f64>,
) -> Option<(&'a str, f64)> {
    scores
        .iter()
        .map(|(name, score)| {
            let weight = weights.get(name).copied().unwrap_or(1.0);
            (name.as_str(), *score, score * weight)
        })
        .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, score, _)| (name, score))
}

/// Uniform weights over the eight canonical PENIN-Omega modules.
pub fn default_module_weights() -> BTreeMap<String, f64> {
    let modules = [
        "ethics_sea",
        "contractivity_iric",
        "acfa_league",
        "caos_plus",
        "sr_omega",
        "omega_meta",
        "auto_tuning",
        "apis_router",
    ];
    modules
        .iter()
        .map(|m| (m.to_string(), 1.0 / modules.len() as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn uniform_high_scores_pass_default_threshold() {
        let weights = default_module_weights();
        let s = scores(&[
            ("ethics_sea", 0.95),
            ("contractivity_iric", 0.92),
            ("acfa_league", 0.88),
            ("caos_plus", 0.90),
            ("sr_omega", 0.87),
            ("omega_meta", 0.85),
            ("auto_tuning", 0.89),
            ("apis_router", 0.91),
        ]);
        let g = omega_sea_coherence(&s, &weights, DEFAULT_EPSILON).unwrap();
        assert!(g >= 0.85);
    }

    #[test]
    fn missing_module_errors() {
        let weights = default_module_weights();
        let s = scores(&[("ethics_sea", 0.9)]);
        let err = omega_sea_coherence(&s, &weights, DEFAULT_EPSILON).unwrap_err();
        assert!(matches!(err, KernelError::MissingModule { .. }));
    }

    #[test]
    fn bottleneck_is_lowest_module() {
        let weights = default_module_weights();
        let s = scores(&[
            ("ethics_sea", 0.95),
            ("caos_plus", 0.60),
            ("sr_omega", 0.90),
        ]);
        let (name, score) = diagnose_bottleneck(&s, &weights).unwrap();
        assert_eq!(name, "caos_plus");
        assert_eq!(score, 0.60);
    }
}
