//! Builds the [`DecisionContext`] the ethics validator consumes from a
//! candidate's observable outputs. The scoring function's free-form
//! `outputs` object is the only place ethics-observable fields (content
//! flags, privacy/fairness/transparency sub-scores) can come from; absent
//! a reading, the context defaults to clean values plus whatever the
//! metric bundle already pins down (`consent`).

use penin_ethics::DecisionContext;
use penin_runtime::RawMetricInputs;

fn read_f64(outputs: &serde_json::Value, key: &str, default: f64) -> f64 {
    outputs.get(key).and_then(|v| v.as_f64()).unwrap_or(default)
}

fn read_bool(outputs: &serde_json::Value, key: &str, default: bool) -> bool {
    outputs.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
}

/// Builds a `DecisionContext` for `decision_id`/`decision_type`, seeding
/// `consent_obtained` from the metric bundle and overlaying any
/// ethics-observable fields the scoring function reported in `outputs`.
pub fn decision_context_from_outputs(
    decision_id: impl Into<String>,
    decision_type: impl Into<String>,
    metrics: &RawMetricInputs,
    outputs: Option<&serde_json::Value>,
) -> DecisionContext {
    let mut ctx = DecisionContext::new(decision_id, decision_type);
    ctx.consent_obtained = metrics.consent;

    if let Some(outputs) = outputs {
        ctx.privacy_score = read_f64(outputs, "privacy_score", ctx.privacy_score);
        ctx.fairness_score = read_f64(outputs, "fairness_score", ctx.fairness_score);
        ctx.transparency_score = read_f64(outputs, "transparency_score", ctx.transparency_score);
        ctx.physical_risk = read_f64(outputs, "physical_risk", ctx.physical_risk);
        ctx.emotional_risk = read_f64(outputs, "emotional_risk", ctx.emotional_risk);
        ctx.consent_obtained = read_bool(outputs, "consent_obtained", ctx.consent_obtained);
        ctx.contains_religious_claims = read_bool(outputs, "contains_religious_claims", false);
        ctx.contains_occult_content = read_bool(outputs, "contains_occult_content", false);
        ctx.claims_consciousness = read_bool(outputs, "claims_consciousness", false);
    }

    ctx.clamped()
}
