//! The combined Σ-Guard verdict: the ten gates plus the ethics
//! verdict folded into one non-compensatory pass/fail, with an attestation
//! hash over the canonicalized verdict body.

use serde::{Deserialize, Serialize};

use penin_ethics::EthicsValidationResult;
use penin_kernel::harmonic_mean_weighted;
use penin_kernel::WeightedMetric;
use penin_ledger::hash_json;

use crate::gate::{evaluate_all, GateResult};
use crate::input::GateInputs;
use crate::thresholds::GuardThresholds;

/// Action Σ-Guard recommends for the evolution loop. `Promote`/`Rollback`
/// are the only two C3 computes unaided; `Canary`/`Quarantine` are never
/// chosen by the non-compensatory rule itself — they're the job of an
/// [`ActionPolicy`], which defaults to never overriding the base verdict
/// (the SPI proxy quarantine decision lives one layer up, in the
/// evolution loop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Promote,
    Rollback,
    Canary,
    Quarantine,
}

/// The bundled outcome of one Σ-Guard pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardVerdict {
    pub passed: bool,
    pub action: Action,
    pub gates: Vec<GateResult>,
    pub ethics_passed: bool,
    pub aggregate_score: f64,
    pub reason: String,
    pub hash_proof: String,
}

/// A gate result shorn of its wall-clock `timestamp`, so that two
/// verdicts built from identical inputs hash identically regardless of
/// when they were computed.
#[derive(Serialize)]
struct GateHashBody<'a> {
    name: &'a str,
    passed: bool,
    value: f64,
    threshold: f64,
    reason: &'a str,
}

impl<'a> From<&'a GateResult> for GateHashBody<'a> {
    fn from(g: &'a GateResult) -> Self {
        Self {
            name: &g.name,
            passed: g.passed,
            value: g.value,
            threshold: g.threshold,
            reason: &g.reason,
        }
    }
}

/// The fields hashed to produce [`GuardVerdict::hash_proof`] — every field
/// of the verdict except the hash itself and the gates' timestamps.
#[derive(Serialize)]
struct VerdictHashBody<'a> {
    passed: bool,
    action: Action,
    gates: Vec<GateHashBody<'a>>,
    ethics_passed: bool,
    aggregate_score: f64,
    reason: &'a str,
}

/// Decides `Canary`/`Quarantine` overrides of an otherwise-computed
/// verdict. The default policy never overrides: a pattern-based canary or
/// quarantine call is a host decision, not something the non-compensatory
/// rule infers on its own.
pub trait ActionPolicy {
    fn refine(&self, gates: &[GateResult], ethics_passed: bool, base_action: Action) -> Action;
}

/// The default policy: `Promote`/`Rollback` as computed, never refined.
pub struct DefaultActionPolicy;

impl ActionPolicy for DefaultActionPolicy {
    fn refine(&self, _gates: &[GateResult], _ethics_passed: bool, base_action: Action) -> Action {
        base_action
    }
}

/// Evaluates all ten gates plus `ethics` and builds the combined
/// [`GuardVerdict`] using the default [`ActionPolicy`].
pub fn evaluate(
    inputs: &GateInputs,
    ethics: &EthicsValidationResult,
    thresholds: &GuardThresholds,
) -> GuardVerdict {
    evaluate_with_policy(inputs, ethics, thresholds, &DefaultActionPolicy)
}

/// Evaluates all ten gates plus `ethics`, applying `policy` to choose
/// between the base `Promote`/`Rollback` action and a `Canary`/`Quarantine`
/// override.
///
/// Non-compensatory rule: `verdict.passed = AND(gate.passed) AND
/// ethics.passed`. `aggregate_score` is the harmonic mean of
/// `gate.value / gate.threshold` over passing gates when every gate and
/// ethics both pass, else `0.0` — a single failing dimension zeroes the
/// score, it never averages it down.
pub fn evaluate_with_policy(
    inputs: &GateInputs,
    ethics: &EthicsValidationResult,
    thresholds: &GuardThresholds,
    policy: &dyn ActionPolicy,
) -> GuardVerdict {
    let gates = evaluate_all(inputs, thresholds);
    let gates_passed = gates.iter().all(|g| g.passed);
    let ethics_passed = ethics.passed;
    let passed = gates_passed && ethics_passed;

    let aggregate_score = if passed {
        let metrics: Vec<WeightedMetric> = gates
            .iter()
            .map(|g| WeightedMetric {
                value: if g.threshold.abs() > 1e-12 {
                    (g.value / g.threshold).max(0.0)
                } else {
                    1.0
                },
                weight: 1.0,
            })
            .collect();
        harmonic_mean_weighted(&metrics, 1e-6).unwrap_or(0.0)
    } else {
        0.0
    };

    let base_action = if passed { Action::Promote } else { Action::Rollback };
    let action = policy.refine(&gates, ethics_passed, base_action);

    let reason = if passed {
        "all ten gates and the ethics verdict passed".to_string()
    } else {
        let mut failing: Vec<String> = gates
            .iter()
            .filter(|g| !g.passed)
            .map(|g| g.name.clone())
            .collect();
        if !ethics_passed {
            failing.push("ethics".to_string());
        }
        format!("failing: {}", failing.join(", "))
    };

    let body = VerdictHashBody {
        passed,
        action,
        gates: gates.iter().map(GateHashBody::from).collect(),
        ethics_passed,
        aggregate_score,
        reason: &reason,
    };
    let hash_proof = hash_json(&body).unwrap_or_default();

    GuardVerdict {
        passed,
        action,
        gates,
        ethics_passed,
        aggregate_score,
        reason,
        hash_proof,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use penin_ethics::{validate, DecisionContext, EthicsThresholds};

    fn clean_inputs() -> GateInputs {
        GateInputs {
            rho: 0.95,
            ece: 0.005,
            rho_bias: 1.02,
            sr: 0.85,
            coherence_g: 0.90,
            delta_linf: 0.025,
            cost_increase: 0.05,
            kappa: 25.0,
            consent: true,
            eco_ok: true,
        }
    }

    fn clean_ethics() -> EthicsValidationResult {
        let ctx = DecisionContext::new("d1", "promotion");
        validate(&ctx, &EthicsThresholds::default())
    }

    #[test]
    fn clean_promotion_passes_and_promotes() {
        let verdict = evaluate(&clean_inputs(), &clean_ethics(), &GuardThresholds::default());
        assert!(verdict.passed);
        assert_eq!(verdict.action, Action::Promote);
        assert!(verdict.aggregate_score > 0.0);
        assert!(!verdict.hash_proof.is_empty());
    }

    #[test]
    fn rho_over_one_rolls_back() {
        let mut inputs = clean_inputs();
        inputs.rho = 1.05;
        let verdict = evaluate(&inputs, &clean_ethics(), &GuardThresholds::default());
        assert!(!verdict.passed);
        assert_eq!(verdict.action, Action::Rollback);
        assert_eq!(verdict.aggregate_score, 0.0);
    }

    #[test]
    fn ethics_failure_rolls_back_even_with_clean_gates() {
        let mut ctx = DecisionContext::new("d1", "promotion");
        ctx.claims_consciousness = true;
        let ethics = validate(&ctx, &EthicsThresholds::default());
        let verdict = evaluate(&clean_inputs(), &ethics, &GuardThresholds::default());
        assert!(!verdict.passed);
        assert_eq!(verdict.action, Action::Rollback);
    }

    #[test]
    fn single_failing_gate_zeroes_aggregate_score() {
        let mut inputs = clean_inputs();
        inputs.rho_bias = 1.15;
        let verdict = evaluate(&inputs, &clean_ethics(), &GuardThresholds::default());
        assert!(!verdict.passed);
        assert_eq!(verdict.aggregate_score, 0.0);
    }

    #[test]
    fn non_compensation_holds_across_the_combined_verdict() {
        let thresholds = GuardThresholds::default();
        let mut inputs = clean_inputs();
        inputs.rho_bias = 1.15;
        let before = evaluate(&inputs, &clean_ethics(), &thresholds);
        assert!(!before.passed);

        inputs.delta_linf *= 2.0;
        inputs.sr = 0.99;
        let after = evaluate(&inputs, &clean_ethics(), &thresholds);
        assert!(!after.passed);
        let failing_gate = after.gates.iter().find(|g| !g.passed).unwrap();
        assert_eq!(failing_gate.name, "bias");
    }

    #[test]
    fn hash_proof_is_deterministic_for_identical_verdicts() {
        let v1 = evaluate(&clean_inputs(), &clean_ethics(), &GuardThresholds::default());
        let v2 = evaluate(&clean_inputs(), &clean_ethics(), &GuardThresholds::default());
        assert_eq!(v1.hash_proof, v2.hash_proof);
    }
}
