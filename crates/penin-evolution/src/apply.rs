//! Shadow-apply: turns a proposed [`Mutation`] into a
//! candidate state, without ever touching the live champion. The mapping
//! from a named parameter tune to the opaque parameter vector is
//! necessarily host-specific (the vector's layout is owned by the host),
//! so it is a pluggable contract, the same way [`crate::scoring::ScoringFunction`]
//! is.

use penin_mutate::{Mutation, MutationKind};
use penin_runtime::ChampionState;

/// The result of shadow-applying a mutation: a new parameter vector and
/// policy blob, neither yet committed.
#[derive(Debug, Clone)]
pub struct ShadowCandidate {
    pub parameters: Vec<f64>,
    pub policy: serde_json::Value,
}

/// Host contract: given the current champion and a proposed mutation,
/// produce the candidate it would become. Never mutates `champion`.
pub trait MutationApplier {
    fn apply(&self, champion: &ChampionState, mutation: &Mutation) -> ShadowCandidate;
}

/// A reasonable default for hosts that don't need a bespoke mapping:
/// - `ParameterTune` scales every parameter coordinate uniformly by the
///   tune's `(new - old) / old` fraction (a stand-in for "the named
///   scalar lives somewhere in this vector" when the core has no
///   knowledge of the host's parameter layout).
/// - `PolicyThreshold` merges `{name: new}` into the policy object.
/// - `ArchitectureChange` merges `{"architecture": {kind, details}}` into
///   the policy object; the parameter vector is left unchanged, since a
///   structural edit is not a numeric perturbation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformScaleApplier;

impl MutationApplier for UniformScaleApplier {
    fn apply(&self, champion: &ChampionState, mutation: &Mutation) -> ShadowCandidate {
        match &mutation.kind {
            MutationKind::ParameterTune(tune) => {
                let fraction = if tune.old.abs() > f64::EPSILON {
                    (tune.new - tune.old) / tune.old
                } else {
                    0.0
                };
                let parameters = champion
                    .parameters
                    .iter()
                    .map(|p| p + p * fraction)
                    .collect();
                ShadowCandidate {
                    parameters,
                    policy: champion.policy.clone(),
                }
            }
            MutationKind::PolicyThreshold(threshold) => {
                let mut policy = champion.policy.clone();
                if let Some(obj) = policy.as_object_mut() {
                    obj.insert(threshold.name.clone(), serde_json::json!(threshold.new));
                }
                ShadowCandidate {
                    parameters: champion.parameters.clone(),
                    policy,
                }
            }
            MutationKind::ArchitectureChange(change) => {
                let mut policy = champion.policy.clone();
                if let Some(obj) = policy.as_object_mut() {
                    obj.insert(
                        "architecture".to_string(),
                        serde_json::json!({ "kind": change.kind, "details": change.details }),
                    );
                }
                ShadowCandidate {
                    parameters: champion.parameters.clone(),
                    policy,
                }
            }
        }
    }
}
