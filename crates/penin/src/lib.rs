//! PENIN-Ω: a self-evolving model/policy orchestrator core.
//!
//! This facade crate re-exports the public API of every component crate
//! (`penin-kernel`, `penin-ethics`, `penin-guard`, `penin-mutate`,
//! `penin-ledger`, `penin-runtime`, `penin-evolution`) and wires them
//! together behind [`PeninCore`] — the one value a host constructs and
//! threads through every cycle. The core does no network I/O; the only
//! filesystem I/O is the ledger append and checkpoint read/write.

pub mod config;
pub mod error;
pub mod observability;

pub use config::PeninConfig;
pub use error::{Error, Result};

pub use penin_ethics::{
    validate, DecisionContext, EthicsThresholds, EthicsValidationResult, EthicsViolation,
    Recommendation, ViolationSeverity,
};
pub use penin_evolution::{
    decision_context_from_outputs, derive_metric_vector, restore_champion_if_degraded,
    CancellationToken, CycleError, CycleOutcome, CycleResult, Deadline, EthicalProjection,
    EvolutionConfig, EvolutionLoop, MutationApplier, ScoreReport, ScoringError, ScoringFunction,
    ShadowCandidate, SpiInputs, SpiWeights, UniformScaleApplier, Workload,
};
pub use penin_guard::{evaluate, Action, GateInputs, GateResult, GuardThresholds, GuardVerdict};
pub use penin_kernel::{
    alpha_effective, caos_plus, delta_linf, diagnose_bottleneck, l_infinity, lapidate, phi,
    sr_omega_infinity, CaosInputs, KernelError, LInfInputs, LapidationConfig, LapidationOutcome,
    RiskProfile, SrInputs,
};
pub use penin_ledger::{
    compute_hash, hash_json, keyed_hash, merkle_root, verify_hash, EthicsVerdict, HashAlgorithm,
    LedgerError, LedgerEvent, LedgerStatistics, PcagProofs, ProofCarryingArtifact, SigmaVerdict,
    WormLedger,
};
pub use penin_mutate::{
    check_safety, ArchitectureChange, BatchStrategy, Mutation, MutationGenerator, MutationKind,
    ParameterTune, PolicyThreshold, RiskLevel, SafetyViolation,
};
pub use penin_runtime::{
    BudgetTracker, Checkpoint, CheckpointStore, ChampionState, MetricVector, MetricWindow,
    PeninRuntime, RawMetricInputs, RuntimeError,
};

use std::path::Path;
use std::sync::Arc;

/// The assembled core: a [`PeninRuntime`] (champion/budget/checkpoints) and
/// a [`WormLedger`] opened at a host-chosen path, ready to drive
/// [`EvolutionLoop`] cycles once the host supplies a [`ScoringFunction`]
/// and a [`MutationApplier`].
///
/// `PeninCore` owns no global state: every field is an explicit value the
/// host constructs and can drop, clone (via `Arc`), or rebuild, matching
/// the design rule that nothing in this crate is a process-wide singleton.
pub struct PeninCore {
    pub runtime: Arc<PeninRuntime>,
    pub ledger: Arc<WormLedger>,
    pub config: PeninConfig,
}

impl PeninCore {
    /// Opens (or creates) the ledger at `ledger_path` and seeds the
    /// runtime with `genesis` as the generation-0 champion.
    pub fn new(ledger_path: impl AsRef<Path>, genesis: ChampionState, config: PeninConfig) -> Result<Self> {
        let ledger = WormLedger::open(ledger_path)?;
        let runtime = PeninRuntime::new(
            genesis,
            config.window_capacity,
            config.daily_budget_usd,
            config.budget_floor_usd,
            config.checkpoint_retention,
        );
        Ok(Self {
            runtime: Arc::new(runtime),
            ledger: Arc::new(ledger),
            config,
        })
    }

    /// Builds an [`EvolutionLoop`] bound to this core's runtime and
    /// ledger, given a host-supplied scoring function and mutation
    /// applier. Each call produces an independent loop; the runtime and
    /// ledger are shared (via `Arc`) so a host may run successive loops
    /// (e.g. after swapping strategies) against the same champion
    /// history.
    pub fn evolution_loop<S: ScoringFunction, A: MutationApplier>(&self, applier: A, scoring: S) -> EvolutionLoop<S, A> {
        EvolutionLoop::new(
            Arc::clone(&self.runtime),
            Arc::clone(&self.ledger),
            applier,
            scoring,
            self.config.evolution_config(),
        )
    }

    /// The currently promoted champion's opaque handle plus the hash that
    /// promoted it.
    pub fn champion(&self) -> ChampionState {
        self.runtime.champion()
    }

    pub fn verify_chain(&self) -> Result<()> {
        Ok(self.ledger.verify_chain()?)
    }

    pub fn merkle_root(&self) -> Result<Option<String>> {
        Ok(self.ledger.merkle_root()?)
    }

    pub fn statistics(&self) -> Result<LedgerStatistics> {
        Ok(self.ledger.statistics()?)
    }

    pub fn export_audit_report(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(self.ledger.export_audit_report(path, 50)?)
    }
}
