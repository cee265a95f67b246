//! `ProofCarryingArtifact` (PCAg): the structured decision proof embedded as
//! an event payload, chained independently of the event hash chain.

use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::hash::hash_json;

/// The numeric proof bundle carried by every PCAg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcagProofs {
    pub linf: f64,
    pub caos_plus: f64,
    pub sr: f64,
    pub omega_g: f64,
    pub rho: f64,
    pub ece: f64,
    pub rho_bias: f64,
    pub delta_linf: f64,
    pub ethics_passed: bool,
    pub violations_count: u32,
    pub cost_usd: f64,
    pub cost_increase_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigmaVerdict {
    Promote,
    Rollback,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EthicsVerdict {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofCarryingArtifact {
    pub artifact_id: String,
    pub decision_id: String,
    pub timestamp_ns: u128,
    pub decision_type: String,
    pub decision_output: serde_json::Value,
    pub proofs: PcagProofs,
    pub sigma_verdict: SigmaVerdict,
    pub ethics_verdict: EthicsVerdict,
    pub prev_artifact_hash: Option<String>,
    pub current_hash: String,
    pub metadata: serde_json::Value,
}

/// Every field of [`ProofCarryingArtifact`] except `current_hash` itself,
/// the canonical form hashed to produce it.
#[derive(Serialize)]
struct PcagHashBody<'a> {
    artifact_id: &'a str,
    decision_id: &'a str,
    timestamp_ns: u128,
    decision_type: &'a str,
    decision_output: &'a serde_json::Value,
    proofs: &'a PcagProofs,
    sigma_verdict: SigmaVerdict,
    ethics_verdict: EthicsVerdict,
    prev_artifact_hash: &'a Option<String>,
    metadata: &'a serde_json::Value,
}

impl ProofCarryingArtifact {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        artifact_id: impl Into<String>,
        decision_id: impl Into<String>,
        timestamp_ns: u128,
        decision_type: impl Into<String>,
        decision_output: serde_json::Value,
        proofs: PcagProofs,
        sigma_verdict: SigmaVerdict,
        ethics_verdict: EthicsVerdict,
        prev_artifact_hash: Option<String>,
        metadata: serde_json::Value,
    ) -> LedgerResult<Self> {
        let artifact_id = artifact_id.into();
        let decision_id = decision_id.into();
        let decision_type = decision_type.into();

        let body = PcagHashBody {
            artifact_id: &artifact_id,
            decision_id: &decision_id,
            timestamp_ns,
            decision_type: &decision_type,
            decision_output: &decision_output,
            proofs: &proofs,
            sigma_verdict,
            ethics_verdict,
            prev_artifact_hash: &prev_artifact_hash,
            metadata: &metadata,
        };
        let current_hash = hash_json(&body)?;

        Ok(Self {
            artifact_id,
            decision_id,
            timestamp_ns,
            decision_type,
            decision_output,
            proofs,
            sigma_verdict,
            ethics_verdict,
            prev_artifact_hash,
            current_hash,
            metadata,
        })
    }

    pub fn recompute_hash(&self) -> LedgerResult<String> {
        let body = PcagHashBody {
            artifact_id: &self.artifact_id,
            decision_id: &self.decision_id,
            timestamp_ns: self.timestamp_ns,
            decision_type: &self.decision_type,
            decision_output: &self.decision_output,
            proofs: &self.proofs,
            sigma_verdict: self.sigma_verdict,
            ethics_verdict: self.ethics_verdict,
            prev_artifact_hash: &self.prev_artifact_hash,
            metadata: &self.metadata,
        };
        hash_json(&body)
    }
}
