//! The host contract the evolution loop consumes: a scoring function
//! that turns a candidate state plus an opaque workload into a raw
//! measurement bundle and a reported cost.

use thiserror::Error;

use penin_runtime::{ChampionState, RawMetricInputs};

/// An opaque workload descriptor. The core never inspects its contents;
/// it is handed back unchanged to [`ScoringFunction::score`].
pub type Workload = serde_json::Value;

/// What a scoring call reports back for one candidate.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub metrics: RawMetricInputs,
    pub cost_usd: f64,
    pub outputs: Option<serde_json::Value>,
}

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("scoring failed: {0}")]
    Failed(String),

    #[error("scoring timed out")]
    Timeout,

    #[error("scoring cancelled")]
    Cancelled,
}

/// Host-supplied measurement function. Implementors may
/// internally parallelize however they like; the core only ever sees one
/// [`ScoreReport`] per call.
pub trait ScoringFunction {
    fn score(&self, state: &ChampionState, workload: &Workload) -> Result<ScoreReport, ScoringError>;
}
