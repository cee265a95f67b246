//! `PeninRuntime` (C8): the single owner of champion state, the metric
//! window, the budget tracker, and the checkpoint store.
//!
//! All champion mutation flows through [`PeninRuntime::commit_champion`],
//! a single-writer swap that installs a new champion and its promoting
//! hash atomically, or not at all.

use parking_lot::Mutex;
use tracing::info;

use crate::budget::BudgetTracker;
use crate::champion::ChampionState;
use crate::checkpoint::{Checkpoint, CheckpointStore};
use crate::error::{RuntimeError, RuntimeResult};
use crate::metric::MetricVector;
use crate::window::MetricWindow;

/// Exclusively-owned runtime state: champion, metric window, budget,
/// checkpoints. The champion lives behind a [`parking_lot::Mutex`] — the
/// single lock the runtime holds — so every read sees a fully-installed
/// champion, never a torn write.
pub struct PeninRuntime {
    champion: Mutex<ChampionState>,
    window: Mutex<MetricWindow>,
    budget: Mutex<BudgetTracker>,
    checkpoints: Mutex<CheckpointStore>,
}

impl PeninRuntime {
    pub fn new(
        genesis: ChampionState,
        window_capacity: usize,
        daily_budget_usd: f64,
        budget_floor_usd: f64,
        checkpoint_retention: usize,
    ) -> Self {
        Self {
            champion: Mutex::new(genesis),
            window: Mutex::new(MetricWindow::new(window_capacity)),
            budget: Mutex::new(BudgetTracker::new(daily_budget_usd, budget_floor_usd)),
            checkpoints: Mutex::new(CheckpointStore::new(checkpoint_retention)),
        }
    }

    /// A consistent snapshot of the current champion.
    pub fn champion(&self) -> ChampionState {
        self.champion.lock().clone()
    }

    pub fn generation(&self) -> u64 {
        self.champion.lock().generation
    }

    /// Takes a checkpoint of the current champion, for restoration later
    /// if the cycle about to run degrades it.
    pub fn checkpoint(&self, reason: impl Into<String>) -> Checkpoint {
        let snapshot = self.champion.lock().clone();
        let checkpoint = Checkpoint::new(snapshot, reason);
        self.checkpoints.lock().push(checkpoint.clone());
        checkpoint
    }

    /// Restores the champion from the most recent checkpoint. Fails if
    /// none has been taken yet.
    pub fn restore_latest_checkpoint(&self) -> RuntimeResult<ChampionState> {
        let restored = self
            .checkpoints
            .lock()
            .latest()
            .cloned()
            .ok_or(RuntimeError::NoCheckpointAvailable)?
            .state;
        *self.champion.lock() = restored.clone();
        info!(generation = restored.generation, "champion restored from checkpoint");
        Ok(restored)
    }

    /// Takes a checkpoint tagged as the state just after a promotion, so a
    /// later champion-drift check has a known-good point to restore to.
    pub fn checkpoint_promoted(&self, generation: u64) -> Checkpoint {
        self.checkpoint(format!("promoted_gen_{generation}"))
    }

    /// A snapshot of every retained checkpoint, most recent last.
    pub fn checkpoints_snapshot(&self) -> Vec<Checkpoint> {
        self.checkpoints.lock().iter().cloned().collect()
    }

    /// Restores the champion from a specific checkpoint id.
    pub fn restore_checkpoint(&self, id: &str) -> RuntimeResult<ChampionState> {
        let restored = self
            .checkpoints
            .lock()
            .find(id)
            .cloned()
            .ok_or_else(|| RuntimeError::CheckpointNotFound(id.to_string()))?
            .state;
        *self.champion.lock() = restored.clone();
        Ok(restored)
    }

    /// The atomic "commit champion" operation: installs
    /// `new_state` (already stamped with `promoting_event_hash` via
    /// [`ChampionState::promoted`]) as the live champion. Installs both
    /// the new parameters and the promoting hash, or neither — there is
    /// no partially-updated state observable by a concurrent reader.
    pub fn commit_champion(&self, new_state: ChampionState) {
        let generation = new_state.generation;
        *self.champion.lock() = new_state;
        info!(generation, "champion promoted");
    }

    /// Records a cycle's metrics into the rolling window.
    pub fn record_metrics(&self, metrics: MetricVector) {
        self.window.lock().push(metrics);
    }

    pub fn mean_recent_delta_linf(&self) -> f64 {
        self.window.lock().mean_delta_linf()
    }

    pub fn record_spend(&self, cost_usd: f64) {
        self.budget.lock().record_spend(cost_usd);
    }

    pub fn budget_residual(&self) -> f64 {
        self.budget.lock().residual()
    }

    pub fn budget_exhausted(&self) -> bool {
        self.budget.lock().is_exhausted()
    }
}
