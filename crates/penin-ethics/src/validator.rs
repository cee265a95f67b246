//! The comprehensive validator: evaluates a [`DecisionContext`] against all
//! 14 Origin Laws and produces a fail-closed [`EthicsValidationResult`].

use serde::{Deserialize, Serialize};

use penin_kernel::{harmonic_mean_weighted, WeightedMetric};

use crate::context::DecisionContext;
use crate::laws::LawId;

/// Severity of an ethical violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// One recorded violation of an Origin Law.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthicsViolation {
    pub law: LawId,
    pub severity: ViolationSeverity,
    pub description: String,
    pub suggested_fix: Option<String>,
    pub evidence: serde_json::Value,
}

/// The validator's recommended disposition for the decision under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Promote,
    Review,
    Block,
    Rollback,
}

/// Result of validating a [`DecisionContext`] against all 14 laws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthicsValidationResult {
    pub passed: bool,
    pub violations: Vec<EthicsViolation>,
    pub warnings: Vec<String>,
    pub score: f64,
    pub recommendation: Recommendation,
}

/// Configurable thresholds for the six non-content-flag gates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EthicsThresholds {
    pub privacy_min: f64,
    pub fairness_min: f64,
    pub transparency_min: f64,
    pub physical_risk_max: f64,
    pub emotional_risk_max: f64,
}

impl Default for EthicsThresholds {
    fn default() -> Self {
        Self {
            privacy_min: 0.95,
            fairness_min: 0.95,
            transparency_min: 0.90,
            physical_risk_max: 0.01,
            emotional_risk_max: 0.05,
        }
    }
}

fn violation(
    law: LawId,
    severity: ViolationSeverity,
    description: impl Into<String>,
    suggested_fix: impl Into<String>,
    evidence: serde_json::Value,
) -> EthicsViolation {
    EthicsViolation {
        law,
        severity,
        description: description.into(),
        suggested_fix: Some(suggested_fix.into()),
        evidence,
    }
}

/// Validates `context` (clamped first) against all 14 Origin Laws.
/// Fail-closed: any `Critical` violation forces `passed = false` and
/// `recommendation = Rollback` regardless of every other sub-score.
pub fn validate(context: &DecisionContext, thresholds: &EthicsThresholds) -> EthicsValidationResult {
    let context = context.clone().clamped();
    let mut violations = Vec::new();
    let warnings = Vec::new();

    if context.claims_consciousness || context.contains_religious_claims {
        violations.push(violation(
            LawId::Lo01,
            ViolationSeverity::Critical,
            "decision output asserts consciousness or divinity",
            "remove any claim of sentience or divine status",
            serde_json::json!({
                "claims_consciousness": context.claims_consciousness,
                "contains_religious_claims": context.contains_religious_claims,
            }),
        ));
    }

    if context.contains_occult_content {
        violations.push(violation(
            LawId::Lo02,
            ViolationSeverity::Critical,
            "decision output contains occult or esoteric content",
            "remove occult framing from the output",
            serde_json::json!({ "contains_occult_content": true }),
        ));
    }

    if context.physical_risk > thresholds.physical_risk_max {
        violations.push(violation(
            LawId::Lo03,
            ViolationSeverity::Critical,
            format!("physical risk {:.3} exceeds {:.3}", context.physical_risk, thresholds.physical_risk_max),
            "eliminate the possibility of physical harm",
            serde_json::json!({ "physical_risk": context.physical_risk }),
        ));
    }

    if context.emotional_risk > thresholds.emotional_risk_max {
        violations.push(violation(
            LawId::Lo04,
            ViolationSeverity::Critical,
            format!("emotional risk {:.3} exceeds {:.3}", context.emotional_risk, thresholds.emotional_risk_max),
            "remove emotionally manipulative or coercive content",
            serde_json::json!({ "emotional_risk": context.emotional_risk }),
        ));
    }

    if context.privacy_score < thresholds.privacy_min {
        violations.push(violation(
            LawId::Lo05,
            ViolationSeverity::Critical,
            format!("privacy score {:.3} below {:.3}", context.privacy_score, thresholds.privacy_min),
            "strengthen data-privacy protections",
            serde_json::json!({ "privacy_score": context.privacy_score }),
        ));
    }

    if context.transparency_score < thresholds.transparency_min {
        violations.push(violation(
            LawId::Lo06,
            ViolationSeverity::High,
            format!(
                "transparency score {:.3} below {:.3}",
                context.transparency_score, thresholds.transparency_min
            ),
            "make the decision path auditable and explainable",
            serde_json::json!({ "transparency_score": context.transparency_score }),
        ));
    }

    if !context.consent_obtained {
        violations.push(violation(
            LawId::Lo07,
            ViolationSeverity::Critical,
            "explicit informed consent was not obtained",
            "obtain explicit consent before proceeding",
            serde_json::json!({ "consent_obtained": false }),
        ));
    }

    if context.fairness_score < thresholds.fairness_min {
        violations.push(violation(
            LawId::Lo09,
            ViolationSeverity::High,
            format!("fairness score {:.3} below {:.3}", context.fairness_score, thresholds.fairness_min),
            "correct discriminatory bias",
            serde_json::json!({ "fairness_score": context.fairness_score }),
        ));
    }

    let sub_scores = [
        WeightedMetric { value: context.privacy_score, weight: 0.2 },
        WeightedMetric { value: context.fairness_score, weight: 0.2 },
        WeightedMetric { value: context.transparency_score, weight: 0.2 },
        WeightedMetric { value: 1.0 - context.physical_risk, weight: 0.2 },
        WeightedMetric { value: 1.0 - context.emotional_risk, weight: 0.2 },
    ];
    let score = harmonic_mean_weighted(&sub_scores, 1e-6).unwrap_or(0.0);

    let has_critical = violations
        .iter()
        .any(|v| v.severity == ViolationSeverity::Critical);

    let recommendation = if has_critical {
        Recommendation::Rollback
    } else if !violations.is_empty() {
        Recommendation::Block
    } else if !warnings.is_empty() {
        Recommendation::Review
    } else {
        Recommendation::Promote
    };

    EthicsValidationResult {
        passed: violations.is_empty(),
        violations,
        warnings,
        score,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_context_promotes() {
        let ctx = DecisionContext::new("d1", "promotion");
        let result = validate(&ctx, &EthicsThresholds::default());
        assert!(result.passed);
        assert_eq!(result.recommendation, Recommendation::Promote);
    }

    #[test]
    fn consciousness_claim_is_critical_rollback() {
        let mut ctx = DecisionContext::new("d1", "promotion");
        ctx.claims_consciousness = true;
        let result = validate(&ctx, &EthicsThresholds::default());
        assert!(!result.passed);
        assert_eq!(result.recommendation, Recommendation::Rollback);
        assert!(result
            .violations
            .iter()
            .any(|v| v.law == LawId::Lo01 && v.severity == ViolationSeverity::Critical));
    }

    #[test]
    fn low_fairness_is_high_not_critical() {
        let mut ctx = DecisionContext::new("d1", "promotion");
        ctx.fairness_score = 0.80;
        let result = validate(&ctx, &EthicsThresholds::default());
        assert!(!result.passed);
        assert_eq!(result.recommendation, Recommendation::Block);
        let v = result.violations.iter().find(|v| v.law == LawId::Lo09).unwrap();
        assert_eq!(v.severity, ViolationSeverity::High);
    }

    #[test]
    fn missing_consent_is_critical() {
        let mut ctx = DecisionContext::new("d1", "promotion");
        ctx.consent_obtained = false;
        let result = validate(&ctx, &EthicsThresholds::default());
        assert_eq!(result.recommendation, Recommendation::Rollback);
    }

    #[test]
    fn score_is_dominated_by_worst_dimension() {
        let mut ctx = DecisionContext::new("d1", "promotion");
        ctx.privacy_score = 0.01;
        let result = validate(&ctx, &EthicsThresholds::default());
        assert!(result.score < 0.1);
    }
}
