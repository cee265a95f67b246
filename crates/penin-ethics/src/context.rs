//! `DecisionContext`: the input a host builds from a candidate's observable
//! outputs and hands to the ethics validator.

use serde::{Deserialize, Serialize};

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Context for ethical validation of one decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionContext {
    pub decision_id: String,
    pub decision_type: String,

    pub privacy_score: f64,
    pub fairness_score: f64,
    pub transparency_score: f64,
    pub physical_risk: f64,
    pub emotional_risk: f64,
    pub consent_obtained: bool,

    pub contains_religious_claims: bool,
    pub contains_occult_content: bool,
    pub claims_consciousness: bool,
}

impl DecisionContext {
    pub fn new(decision_id: impl Into<String>, decision_type: impl Into<String>) -> Self {
        Self {
            decision_id: decision_id.into(),
            decision_type: decision_type.into(),
            privacy_score: 1.0,
            fairness_score: 1.0,
            transparency_score: 1.0,
            physical_risk: 0.0,
            emotional_risk: 0.0,
            consent_obtained: true,
            contains_religious_claims: false,
            contains_occult_content: false,
            claims_consciousness: false,
        }
    }

    /// Clamps every `[0, 1]`-typed field at ingestion, per this type's
    /// invariant that such fields are always clamped before use.
    pub fn clamped(mut self) -> Self {
        self.privacy_score = clamp01(self.privacy_score);
        self.fairness_score = clamp01(self.fairness_score);
        self.transparency_score = clamp01(self.transparency_score);
        self.physical_risk = clamp01(self.physical_risk);
        self.emotional_risk = clamp01(self.emotional_risk);
        self
    }
}
