//! The stateless mutation factory and its three batch strategies.

use uuid::Uuid;

use crate::mutation::{ArchitectureChange, Mutation, MutationKind, ParameterTune, PolicyThreshold, RiskLevel};
use crate::safety::{check_safety, SafetyViolation};

/// Bounds the kinds and magnitudes of mutation a batch may contain.
/// `Conservative` only tunes parameters with small perturbations;
/// `Moderate` adds policy updates; `Aggressive` allows architecture
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BatchStrategy {
    Conservative,
    Moderate,
    Aggressive,
}

/// Stateless factory producing [`Mutation`] values. Holds no fields: every
/// method is a pure constructor, keeping this a "stateless factory"
/// framing of C4.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationGenerator;

impl MutationGenerator {
    pub fn new() -> Self {
        Self
    }

    /// A low-risk parameter perturbation: `new = current * (1 +
    /// perturbation_pct)`.
    pub fn parameter_tune(&self, path: impl Into<String>, current_value: f64, perturbation_pct: f64) -> Mutation {
        let new_value = current_value + current_value * perturbation_pct;
        Mutation {
            id: format!("param-{}", Uuid::new_v4()),
            kind: MutationKind::ParameterTune(ParameterTune {
                path: path.into(),
                old: current_value,
                new: new_value,
            }),
            requires_approval: false,
            expected_delta_linf: 0.01,
        }
    }

    /// A low-risk policy-threshold update, carrying `justification` for
    /// audit review.
    pub fn policy_threshold(
        &self,
        name: impl Into<String>,
        current_value: f64,
        proposed_value: f64,
        justification: impl Into<String>,
    ) -> Mutation {
        Mutation {
            id: format!("policy-{}", Uuid::new_v4()),
            kind: MutationKind::PolicyThreshold(PolicyThreshold {
                name: name.into(),
                old: current_value,
                new: proposed_value,
                justification: justification.into(),
            }),
            requires_approval: false,
            expected_delta_linf: 0.005,
        }
    }

    /// A medium/high-risk structural edit. Always `requires_approval`.
    pub fn architecture_change(
        &self,
        kind: impl Into<String>,
        details: serde_json::Value,
        risk: RiskLevel,
    ) -> Mutation {
        Mutation {
            id: format!("arch-{}", Uuid::new_v4()),
            kind: MutationKind::ArchitectureChange(ArchitectureChange {
                kind: kind.into(),
                details,
                risk,
            }),
            requires_approval: true,
            expected_delta_linf: 0.02,
        }
    }

    /// Produces up to `max_mutations` candidates for `strategy`, each
    /// already past the syntactic safety check — a mutation that fails it
    /// is dropped before it ever reaches the evolution loop.
    pub fn generate_batch(&self, strategy: BatchStrategy, max_mutations: usize) -> Vec<Mutation> {
        let candidates = match strategy {
            BatchStrategy::Conservative => vec![
                self.parameter_tune("caos.kappa", 20.0, 0.05),
                self.parameter_tune("linf.lambda_c", 0.5, 0.10),
            ],
            BatchStrategy::Moderate => vec![
                self.parameter_tune("caos.kappa", 20.0, 0.15),
                self.policy_threshold(
                    "beta_min",
                    0.01,
                    0.012,
                    "increase quality threshold for promotion",
                ),
            ],
            BatchStrategy::Aggressive => vec![self.architecture_change(
                "add_layer",
                serde_json::json!({"layer_type": "dense", "units": 128}),
                RiskLevel::Medium,
            )],
        };

        candidates
            .into_iter()
            .filter(|m| check_safety(m).is_ok())
            .take(max_mutations)
            .collect()
    }

    /// Validates `mutation` against the syntactic safety checklist,
    /// surfacing the typed [`SafetyViolation`] reason on rejection.
    pub fn validate(&self, mutation: &Mutation) -> Result<(), SafetyViolation> {
        check_safety(mutation)
    }
}
