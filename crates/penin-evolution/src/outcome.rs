//! `CycleOutcome`: the typed result of one cycle, so a
//! host never pattern-matches loose strings out of a ledger payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CycleOutcome {
    /// The candidate passed every gate and was committed as the new
    /// champion.
    Promoted { generation: u64, event_hash: String },
    /// The candidate failed one or more gates; discarded.
    RolledBack { reason: String, event_hash: String },
    /// The SPI proxy tripped; candidate parked, neither promoted nor
    /// discarded.
    Quarantined { reason: String, event_hash: String },
    /// Two consecutive sub-`beta_min` cycles with otherwise clean metrics;
    /// the champion itself is quarantined and the loop should pause.
    ChampionQuarantined { event_hash: String },
    /// Residual budget fell below the floor; the loop halted at this
    /// cycle boundary without attempting a candidate.
    BudgetExhausted { event_hash: String },
    /// The cycle's deadline passed, or its cancellation token was set,
    /// before a verdict was produced. Champion state is untouched.
    Cancelled { event_hash: String },
    /// A pure-kernel invalid input (NaN, out-of-range with no clamp)
    /// aborted the cycle before any candidate was measured.
    Aborted { reason: String, event_hash: String },
}

impl CycleOutcome {
    pub fn event_hash(&self) -> Option<&str> {
        match self {
            CycleOutcome::Promoted { event_hash, .. }
            | CycleOutcome::RolledBack { event_hash, .. }
            | CycleOutcome::Quarantined { event_hash, .. }
            | CycleOutcome::ChampionQuarantined { event_hash }
            | CycleOutcome::BudgetExhausted { event_hash }
            | CycleOutcome::Cancelled { event_hash }
            | CycleOutcome::Aborted { event_hash, .. } => Some(event_hash),
        }
    }

    pub fn is_terminal_for_loop(&self) -> bool {
        matches!(
            self,
            CycleOutcome::ChampionQuarantined { .. } | CycleOutcome::BudgetExhausted { .. }
        )
    }
}
