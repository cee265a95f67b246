//! `ChampionState`: the currently promoted state. Exclusively owned
//! by C8; only the evolution loop mutates it, and only after a PASS
//! verdict, via [`crate::runtime::PeninRuntime::commit_champion`].

use serde::{Deserialize, Serialize};

use crate::metric::MetricVector;

/// The currently-promoted champion: an opaque parameter vector, a policy
/// configuration blob, the metrics that won it promotion, a generation
/// counter, and the hash of the ledger event that promoted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionState {
    pub parameters: Vec<f64>,
    pub policy: serde_json::Value,
    pub last_metrics: Option<MetricVector>,
    pub generation: u64,
    pub promoted_by_hash: Option<String>,
}

impl ChampionState {
    /// The generation-0 champion: no promotion history yet.
    pub fn genesis(parameters: Vec<f64>, policy: serde_json::Value) -> Self {
        Self {
            parameters,
            policy,
            last_metrics: None,
            generation: 0,
            promoted_by_hash: None,
        }
    }

    /// Builds the generation-`n+1` champion: the candidate's parameters
    /// and metrics, generation incremented, stamped with the hash of the
    /// ledger event that promoted it.
    pub fn promoted(&self, new_parameters: Vec<f64>, new_policy: serde_json::Value, metrics: MetricVector, promoting_event_hash: String) -> Self {
        Self {
            parameters: new_parameters,
            policy: new_policy,
            last_metrics: Some(metrics),
            generation: self.generation + 1,
            promoted_by_hash: Some(promoting_event_hash),
        }
    }
}
