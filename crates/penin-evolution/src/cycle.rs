//! The champion-challenger evolution loop: one [`EvolutionLoop::run_cycle`]
//! call runs the full snapshot -> propose -> shadow-apply -> measure ->
//! ethics -> gate -> decide -> log sequence, including the master-equation
//! commit (C6), the SPI quarantine override (step 9), and the champion
//! death gate (two consecutive sub-`beta_min` cycles with otherwise clean
//! metrics).

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};
use uuid::Uuid;

use penin_ethics::validate;
use penin_guard::{evaluate, GateInputs};
use penin_kernel::{
    alpha_effective, is_stable, master_equation_step, squared_distance_potential, BoxBounds, MaxNorm,
    Pipeline, Projection, StepOutcome,
};
use penin_ledger::{EthicsVerdict as PcagEthicsVerdict, PcagProofs, ProofCarryingArtifact, SigmaVerdict, WormLedger};
use penin_mutate::MutationGenerator;
use penin_runtime::{ChampionState, PeninRuntime};

use crate::apply::{MutationApplier, ShadowCandidate};
use crate::clock::{CancellationToken, Deadline};
use crate::config::EvolutionConfig;
use crate::context::decision_context_from_outputs;
use crate::derive::derive_metric_vector;
use crate::error::{CycleError, CycleResult};
use crate::outcome::CycleOutcome;
use crate::projection::EthicalProjection;
use crate::scoring::{ScoringError, ScoringFunction, Workload};
use crate::spi::{spi_score, trips_quarantine, SpiInputs};

fn now_ns() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos()
}

fn read_f64(outputs: Option<&serde_json::Value>, key: &str) -> f64 {
    outputs.and_then(|o| o.get(key)).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// Builds the candidate's host-facing view: the shadow-applied parameters
/// and policy wrapped in a `ChampionState`, so it can be handed to
/// [`ScoringFunction::score`] (which speaks `ChampionState`, not
/// `ShadowCandidate`). This is never itself promoted — generation and
/// promotion history carry over from the live champion unchanged.
fn candidate_as_champion_view(champion: &ChampionState, candidate: &ShadowCandidate) -> ChampionState {
    ChampionState {
        parameters: candidate.parameters.clone(),
        policy: candidate.policy.clone(),
        last_metrics: champion.last_metrics,
        generation: champion.generation,
        promoted_by_hash: champion.promoted_by_hash.clone(),
    }
}

/// Restores the champion from its most recent post-promotion checkpoint
/// if its own Lyapunov potential (against `reference`) has drifted past
/// `tolerance` relative to that checkpoint (the rollback
/// branch: "if the champion itself degraded, restore from the most
/// recent checkpoint whose PCAg shows PASS"). Returns the restored state,
/// or `None` if the champion is stable or no promoted checkpoint exists
/// yet.
pub fn restore_champion_if_degraded(runtime: &PeninRuntime, reference: &[f64], tolerance: f64) -> Option<ChampionState> {
    let champion = runtime.champion();
    let last_good = runtime
        .checkpoints_snapshot()
        .into_iter()
        .rev()
        .find(|c| c.reason.starts_with("promoted_gen_"))?;

    let v_checkpoint = squared_distance_potential(&last_good.state.parameters, reference);
    let v_champion = squared_distance_potential(&champion.parameters, reference);

    if is_stable(v_champion, v_checkpoint, tolerance) {
        None
    } else {
        warn!(generation = champion.generation, "champion drifted past its last promotion checkpoint, restoring");
        runtime.restore_checkpoint(&last_good.id).ok()
    }
}

/// Owns one evolution loop's moving parts: the shared runtime and ledger,
/// the mutation generator, the host-supplied applier and scoring
/// function, the loop's configuration, and the consecutive-death-gate
/// counter the champion death gate needs across cycles.
pub struct EvolutionLoop<S: ScoringFunction, A: MutationApplier> {
    runtime: Arc<PeninRuntime>,
    ledger: Arc<WormLedger>,
    generator: MutationGenerator,
    applier: A,
    scoring: S,
    config: EvolutionConfig,
    consecutive_death_gate_hits: u32,
}

impl<S: ScoringFunction, A: MutationApplier> EvolutionLoop<S, A> {
    pub fn new(runtime: Arc<PeninRuntime>, ledger: Arc<WormLedger>, applier: A, scoring: S, config: EvolutionConfig) -> Self {
        Self {
            runtime,
            ledger,
            generator: MutationGenerator::new(),
            applier,
            scoring,
            config,
            consecutive_death_gate_hits: 0,
        }
    }

    pub fn runtime(&self) -> &PeninRuntime {
        &self.runtime
    }

    pub fn ledger(&self) -> &WormLedger {
        &self.ledger
    }

    pub fn consecutive_death_gate_hits(&self) -> u32 {
        self.consecutive_death_gate_hits
    }

    /// Runs exactly one champion-challenger cycle to completion, logging
    /// exactly one ledger event per terminal outcome.
    pub fn run_cycle(&mut self, workload: &Workload, deadline: &Deadline, cancel: &CancellationToken) -> CycleResult<CycleOutcome> {
        if self.runtime.budget_exhausted() {
            let event = self.ledger.append(
                "budget_exhausted",
                Uuid::new_v4().to_string(),
                serde_json::json!({ "residual_usd": self.runtime.budget_residual() }),
            )?;
            return Ok(CycleOutcome::BudgetExhausted { event_hash: event.event_hash });
        }

        if cancel.is_cancelled() || deadline.is_expired() {
            return self.record_cancelled("pre_cycle", None);
        }

        let champion = self.runtime.champion();
        self.runtime.checkpoint(format!("pre_cycle_gen_{}", champion.generation));

        let mutation = match self.generator.generate_batch(self.config.strategy, 1).pop() {
            Some(m) => m,
            None => {
                let event = self.ledger.append(
                    "cycle_aborted",
                    Uuid::new_v4().to_string(),
                    serde_json::json!({ "reason": "mutation generator produced no safe candidate" }),
                )?;
                return Ok(CycleOutcome::Aborted {
                    reason: "no safe mutation proposed".into(),
                    event_hash: event.event_hash,
                });
            }
        };

        let candidate = self.applier.apply(&champion, &mutation);
        let shadow_view = candidate_as_champion_view(&champion, &candidate);

        if cancel.is_cancelled() || deadline.is_expired() {
            return self.record_cancelled("pre_measurement", Some(&mutation.id));
        }

        let score_report = match self.scoring.score(&shadow_view, workload) {
            Ok(report) => report,
            Err(ScoringError::Timeout) => {
                let event = self.ledger.append(
                    "timeout",
                    Uuid::new_v4().to_string(),
                    serde_json::json!({ "mutation_id": mutation.id }),
                )?;
                return Ok(CycleOutcome::Cancelled { event_hash: event.event_hash });
            }
            Err(ScoringError::Cancelled) => return self.record_cancelled("measurement", Some(&mutation.id)),
            Err(failed @ ScoringError::Failed(_)) => return Err(CycleError::Scoring(failed)),
        };
        self.runtime.record_spend(score_report.cost_usd);

        let raw = score_report.metrics;
        let (metrics, caos_plus) = match derive_metric_vector(raw, &self.config) {
            Ok(derived) => derived,
            Err(kernel_err) => {
                let event = self.ledger.append(
                    "cycle_aborted",
                    Uuid::new_v4().to_string(),
                    serde_json::json!({ "reason": kernel_err.to_string(), "mutation_id": mutation.id }),
                )?;
                return Ok(CycleOutcome::Aborted { reason: kernel_err.to_string(), event_hash: event.event_hash });
            }
        };

        let decision_id = Uuid::new_v4().to_string();
        let decision_context =
            decision_context_from_outputs(&decision_id, "evolution_cycle", &raw, score_report.outputs.as_ref());
        let ethics_result = validate(&decision_context, &self.config.ethics_thresholds);

        let gate_inputs = GateInputs {
            rho: metrics.rho,
            ece: metrics.ece,
            rho_bias: metrics.rho_bias,
            sr: metrics.sr,
            coherence_g: metrics.g,
            delta_linf: metrics.delta_linf,
            cost_increase: metrics.cost_increase,
            kappa: metrics.kappa,
            consent: metrics.consent,
            eco_ok: metrics.eco_ok,
        };
        let guard_verdict = evaluate(&gate_inputs, &ethics_result, &self.config.guard_thresholds);

        let lyapunov_ok = match &self.config.stability_reference {
            Some(reference) => {
                let v_n = squared_distance_potential(&champion.parameters, reference);
                let v_next = squared_distance_potential(&candidate.parameters, reference);
                is_stable(v_next, v_n, self.config.lyapunov_tolerance)
            }
            None => true,
        };

        let alpha_eff = match alpha_effective(self.config.alpha_0, caos_plus, self.config.gamma, metrics.sr) {
            Ok(a) => a,
            Err(kernel_err) => {
                let event = self.ledger.append(
                    "cycle_aborted",
                    Uuid::new_v4().to_string(),
                    serde_json::json!({ "reason": kernel_err.to_string(), "mutation_id": mutation.id }),
                )?;
                return Ok(CycleOutcome::Aborted { reason: kernel_err.to_string(), event_hash: event.event_hash });
            }
        };

        // C6: I_{n+1} = Pi_{H ∩ S}(I_n + alpha_eff * direction). The
        // challenger delta is the improvement direction; H is whatever
        // box/norm bounds the host configured, S is this cycle's own
        // ethics verdict.
        let direction: Vec<f64> = candidate
            .parameters
            .iter()
            .zip(champion.parameters.iter())
            .map(|(c, ch)| c - ch)
            .collect();
        let box_bounds = self
            .config
            .box_bounds
            .as_ref()
            .map(|(min, max)| BoxBounds { min: min.clone(), max: max.clone() });
        let max_norm = self.config.max_norm.map(|m| MaxNorm { max_norm: m });
        let ethical_projection = EthicalProjection {
            ethics_passed: ethics_result.passed,
            reason: if ethics_result.passed {
                String::new()
            } else {
                "ethics verdict failed".to_string()
            },
        };
        let mut stages: Vec<&dyn Projection> = Vec::new();
        if let Some(b) = &box_bounds {
            stages.push(b);
        }
        if let Some(m) = &max_norm {
            stages.push(m);
        }
        stages.push(&ethical_projection);
        let pipeline = Pipeline { stages };
        let step_outcome = master_equation_step(&champion.parameters, &direction, alpha_eff, &pipeline);
        let (stepped_parameters, projection_ok) = match step_outcome {
            StepOutcome::Stepped(params) => (params, true),
            StepOutcome::Unchanged { previous, .. } => (previous, false),
        };

        let promote = guard_verdict.passed && lyapunov_ok && projection_ok;

        let spi_inputs = SpiInputs {
            ece: metrics.ece,
            introspection_leak: read_f64(score_report.outputs.as_ref(), "introspection_leak"),
            randomness: read_f64(score_report.outputs.as_ref(), "randomness"),
        };
        let spi_value = spi_score(spi_inputs, self.config.spi_weights);
        let spi_tripped = trips_quarantine(spi_inputs, self.config.spi_weights, self.config.spi_tau);

        let sigma_verdict = if spi_tripped {
            SigmaVerdict::Block
        } else if promote {
            SigmaVerdict::Promote
        } else {
            SigmaVerdict::Rollback
        };
        let ethics_verdict = if ethics_result.passed { PcagEthicsVerdict::Pass } else { PcagEthicsVerdict::Fail };

        let proofs = PcagProofs {
            linf: metrics.linf,
            caos_plus,
            sr: metrics.sr,
            omega_g: metrics.g,
            rho: metrics.rho,
            ece: metrics.ece,
            rho_bias: metrics.rho_bias,
            delta_linf: metrics.delta_linf,
            ethics_passed: ethics_result.passed,
            violations_count: ethics_result.violations.len() as u32,
            cost_usd: score_report.cost_usd,
            cost_increase_pct: metrics.cost_increase,
        };

        let prev_artifact_hash = self.ledger.last_pcag()?.map(|a| a.current_hash);
        let artifact = ProofCarryingArtifact::new(
            format!("artifact-{}", Uuid::new_v4()),
            decision_id,
            now_ns(),
            "evolution_cycle",
            score_report.outputs.clone().unwrap_or_else(|| serde_json::json!({})),
            proofs,
            sigma_verdict,
            ethics_verdict,
            prev_artifact_hash,
            serde_json::json!({
                "mutation_id": mutation.id,
                "spi": spi_value,
                "guard_reason": guard_verdict.reason,
            }),
        )?;
        let pcag_event = self.ledger.append_pcag(artifact)?;
        self.runtime.record_metrics(metrics);

        if spi_tripped {
            info!(decision = %pcag_event.event_id, spi = spi_value, "candidate quarantined by the SPI proxy");
            return Ok(CycleOutcome::Quarantined {
                reason: format!("SPI proxy {:.4} exceeded tau {:.4}", spi_value, self.config.spi_tau),
                event_hash: pcag_event.event_hash,
            });
        }

        if promote {
            self.consecutive_death_gate_hits = 0;
            let promoted = champion.promoted(stepped_parameters, candidate.policy, metrics, pcag_event.event_hash.clone());
            let generation = promoted.generation;
            self.runtime.commit_champion(promoted);
            self.runtime.checkpoint_promoted(generation);
            return Ok(CycleOutcome::Promoted { generation, event_hash: pcag_event.event_hash });
        }

        let only_death_gate_failed = ethics_result.passed
            && projection_ok
            && guard_verdict.gates.iter().filter(|g| !g.passed).count() == 1
            && guard_verdict.gates.iter().any(|g| !g.passed && g.name == "improvement");

        if only_death_gate_failed {
            self.consecutive_death_gate_hits += 1;
        } else {
            self.consecutive_death_gate_hits = 0;
        }

        if let Some(reference) = &self.config.stability_reference {
            restore_champion_if_degraded(&self.runtime, reference, self.config.lyapunov_tolerance);
        }

        if self.consecutive_death_gate_hits >= 2 {
            self.consecutive_death_gate_hits = 0;
            let cq_event = self.ledger.append(
                "champion_quarantined",
                Uuid::new_v4().to_string(),
                serde_json::json!({ "generation": champion.generation }),
            )?;
            return Ok(CycleOutcome::ChampionQuarantined { event_hash: cq_event.event_hash });
        }

        Ok(CycleOutcome::RolledBack { reason: guard_verdict.reason, event_hash: pcag_event.event_hash })
    }

    fn record_cancelled(&self, stage: &str, mutation_id: Option<&str>) -> CycleResult<CycleOutcome> {
        let event = self.ledger.append(
            "cycle_cancelled",
            Uuid::new_v4().to_string(),
            serde_json::json!({ "stage": stage, "mutation_id": mutation_id }),
        )?;
        Ok(CycleOutcome::Cancelled { event_hash: event.event_hash })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use penin_runtime::RawMetricInputs;

    use super::*;
    use crate::apply::UniformScaleApplier;
    use crate::scoring::ScoreReport;

    struct FixedScoring {
        raw: RawMetricInputs,
        outputs: Option<serde_json::Value>,
    }

    impl ScoringFunction for FixedScoring {
        fn score(&self, _state: &ChampionState, _workload: &Workload) -> Result<ScoreReport, ScoringError> {
            Ok(ScoreReport {
                metrics: self.raw,
                cost_usd: 0.01,
                outputs: self.outputs.clone(),
            })
        }
    }

    fn clean_raw() -> RawMetricInputs {
        RawMetricInputs {
            c: 0.88,
            a: 0.40,
            o: 0.35,
            s: 0.82,
            awareness: 0.92,
            autocorrection: 0.88,
            metacognition: 0.67,
            ethics_ok: true,
            rho: 0.95,
            ece: 0.005,
            rho_bias: 1.02,
            g: 0.90,
            delta_linf: 0.025,
            kappa: 25.0,
            cost_increase: 0.05,
            consent: true,
            eco_ok: true,
        }
    }

    fn build_loop(
        raw: RawMetricInputs,
        outputs: Option<serde_json::Value>,
    ) -> (EvolutionLoop<FixedScoring, UniformScaleApplier>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(WormLedger::open(dir.path().join("ledger.jsonl")).unwrap());
        let runtime = Arc::new(PeninRuntime::new(
            ChampionState::genesis(vec![10.0, 20.0], serde_json::json!({})),
            16,
            100.0,
            1.0,
            8,
        ));
        let scoring = FixedScoring { raw, outputs };
        let evo = EvolutionLoop::new(runtime, ledger, UniformScaleApplier, scoring, EvolutionConfig::default());
        (evo, dir)
    }

    fn no_deadline() -> Deadline {
        Deadline::starting_now(Duration::from_secs(5))
    }

    #[test]
    fn clean_metrics_promote_the_champion() {
        let (mut evo, _dir) = build_loop(clean_raw(), None);
        let outcome = evo
            .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
        match outcome {
            CycleOutcome::Promoted { generation, .. } => assert_eq!(generation, 1),
            other => panic!("expected Promoted, got {other:?}"),
        }
        assert_eq!(evo.runtime().generation(), 1);
        assert!(evo.ledger().verify_chain().is_ok());
    }

    #[test]
    fn contractivity_failure_rolls_back() {
        let mut raw = clean_raw();
        raw.rho = 1.05;
        let (mut evo, _dir) = build_loop(raw, None);
        let outcome = evo
            .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
        assert!(matches!(outcome, CycleOutcome::RolledBack { .. }));
        assert_eq!(evo.runtime().generation(), 0);
    }

    #[test]
    fn consciousness_claim_blocks_via_ethics() {
        let (mut evo, _dir) = build_loop(clean_raw(), Some(serde_json::json!({"claims_consciousness": true})));
        let outcome = evo
            .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
        assert!(matches!(outcome, CycleOutcome::RolledBack { .. }));
        assert_eq!(evo.runtime().generation(), 0);
    }

    #[test]
    fn two_consecutive_death_gate_hits_quarantine_the_champion() {
        let mut raw = clean_raw();
        raw.delta_linf = 0.005; // below the default beta_min of 0.01, everything else clean
        let (mut evo, _dir) = build_loop(raw, None);

        let first = evo
            .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
        assert!(matches!(first, CycleOutcome::RolledBack { .. }));
        assert_eq!(evo.consecutive_death_gate_hits(), 1);

        let second = evo
            .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
        assert!(matches!(second, CycleOutcome::ChampionQuarantined { .. }));
        assert_eq!(evo.consecutive_death_gate_hits(), 0);
    }

    #[test]
    fn single_failing_gate_is_not_compensated_by_stronger_others() {
        let mut raw = clean_raw();
        raw.rho_bias = 1.15;
        raw.delta_linf *= 2.0;
        raw.awareness = 0.99;
        let (mut evo, _dir) = build_loop(raw, None);
        let outcome = evo
            .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
        match outcome {
            CycleOutcome::RolledBack { reason, .. } => assert!(reason.contains("bias")),
            other => panic!("expected RolledBack naming the bias gate, got {other:?}"),
        }
    }

    #[test]
    fn spi_trip_quarantines_the_candidate_without_touching_generation() {
        let (mut evo, _dir) = build_loop(clean_raw(), Some(serde_json::json!({"introspection_leak": 0.5})));
        let outcome = evo
            .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
        assert!(matches!(outcome, CycleOutcome::Quarantined { .. }));
        assert_eq!(evo.runtime().generation(), 0);
    }

    #[test]
    fn budget_exhaustion_halts_before_any_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(WormLedger::open(dir.path().join("ledger.jsonl")).unwrap());
        let runtime = Arc::new(PeninRuntime::new(
            ChampionState::genesis(vec![10.0, 20.0], serde_json::json!({})),
            16,
            1.0,
            1.0,
            8,
        ));
        let mut evo = EvolutionLoop::new(
            runtime,
            ledger,
            UniformScaleApplier,
            FixedScoring { raw: clean_raw(), outputs: None },
            EvolutionConfig::default(),
        );
        let outcome = evo
            .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
        assert!(matches!(outcome, CycleOutcome::BudgetExhausted { .. }));
    }

    #[test]
    fn cancellation_token_set_before_the_cycle_halts_it() {
        let (mut evo, _dir) = build_loop(clean_raw(), None);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = evo.run_cycle(&serde_json::json!({}), &no_deadline(), &cancel).unwrap();
        assert!(matches!(outcome, CycleOutcome::Cancelled { .. }));
        assert_eq!(evo.runtime().generation(), 0);
    }
}
