//! `Mutation`: a proposed delta against the champion state.
//!
//! Three kinds, increasing in risk and decreasing in how freely they may be
//! auto-applied: parameter tuning and policy-threshold updates are low
//! risk and machine-applicable, architecture changes always
//! `requires_approval`.

use serde::{Deserialize, Serialize};

/// Risk tier of a mutation, used to decide whether it can be
/// auto-applied or needs human sign-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Perturbs a named scalar hyperparameter by a bounded percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterTune {
    pub path: String,
    pub old: f64,
    pub new: f64,
}

/// Changes a named threshold or policy constant, with a justification
/// recorded alongside the delta (e.g. for audit review).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyThreshold {
    pub name: String,
    pub old: f64,
    pub new: f64,
    pub justification: String,
}

/// A structural edit: add/remove a layer, swap an operator, and the like.
/// Always medium or high risk, always `requires_approval`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitectureChange {
    pub kind: String,
    pub details: serde_json::Value,
    pub risk: RiskLevel,
}

/// The three mutation variants C4 can produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationKind {
    ParameterTune(ParameterTune),
    PolicyThreshold(PolicyThreshold),
    ArchitectureChange(ArchitectureChange),
}

impl MutationKind {
    /// The inherent risk of this mutation kind, independent of any
    /// caller-supplied `risk` field on architecture changes (which may
    /// raise it further).
    pub fn base_risk(&self) -> RiskLevel {
        match self {
            MutationKind::ParameterTune(_) => RiskLevel::Low,
            MutationKind::PolicyThreshold(_) => RiskLevel::Low,
            MutationKind::ArchitectureChange(change) => change.risk,
        }
    }

    /// A string representation of every user-authored text field this
    /// mutation carries, concatenated for the syntactic safety scan.
    pub fn scannable_text(&self) -> String {
        match self {
            MutationKind::ParameterTune(p) => p.path.clone(),
            MutationKind::PolicyThreshold(p) => format!("{} {}", p.name, p.justification),
            MutationKind::ArchitectureChange(a) => format!("{} {}", a.kind, a.details),
        }
    }
}

/// A proposed delta against the live champion state. Cycle-lifetime
/// ownership: created by C4, consumed by C5, destroyed at the end of the
/// cycle if rejected (never touches the live champion directly).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mutation {
    pub id: String,
    pub kind: MutationKind,
    pub requires_approval: bool,
    pub expected_delta_linf: f64,
}

impl Mutation {
    pub fn risk_level(&self) -> RiskLevel {
        self.kind.base_risk()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn architecture_change_always_requires_approval() {
        let m = Mutation {
            id: "m1".into(),
            kind: MutationKind::ArchitectureChange(ArchitectureChange {
                kind: "add_layer".into(),
                details: serde_json::json!({"units": 128}),
                risk: RiskLevel::Medium,
            }),
            requires_approval: true,
            expected_delta_linf: 0.02,
        };
        assert!(m.requires_approval);
        assert_eq!(m.risk_level(), RiskLevel::Medium);
    }

    #[test]
    fn parameter_tune_is_low_risk() {
        let m = Mutation {
            id: "m2".into(),
            kind: MutationKind::ParameterTune(ParameterTune {
                path: "caos.kappa".into(),
                old: 20.0,
                new: 21.0,
            }),
            requires_approval: false,
            expected_delta_linf: 0.01,
        };
        assert_eq!(m.risk_level(), RiskLevel::Low);
    }
}
