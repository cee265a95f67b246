//! End-to-end scenarios covering the orchestrator's testable properties,
//! driven through [`PeninCore`] / [`EvolutionLoop`] exactly as a host
//! would: one `ScoringFunction` reporting fixed metrics per cycle, the
//! default [`UniformScaleApplier`], a fresh ledger per test.

use std::sync::Arc;
use std::time::Duration;

use penin::{
    CancellationToken, ChampionState, CycleOutcome, Deadline, PeninConfig, PeninCore, RawMetricInputs,
    ScoreReport, ScoringError, ScoringFunction, UniformScaleApplier,
};

struct FixedScoring {
    raw: RawMetricInputs,
    outputs: Option<serde_json::Value>,
}

impl ScoringFunction for FixedScoring {
    fn score(&self, _state: &ChampionState, _workload: &penin::Workload) -> Result<ScoreReport, ScoringError> {
        Ok(ScoreReport {
            metrics: self.raw,
            cost_usd: 0.02,
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

fn new_core(dir: &tempfile::TempDir) -> PeninCore {
    PeninCore::new(
        dir.path().join("ledger.jsonl"),
        ChampionState::genesis(vec![10.0, 20.0], serde_json::json!({})),
        PeninConfig::default(),
    )
    .unwrap()
}

fn no_deadline() -> Deadline {
    Deadline::starting_now(Duration::from_secs(10))
}

/// Scenario 1: clean promotion. All ten gates and ethics pass; the
/// champion advances to generation 1 and the ledger's PCAg carries
/// `sigma_verdict = "promote"`.
#[test]
fn scenario_1_clean_promotion() {
    let dir = tempfile::tempdir().unwrap();
    let core = new_core(&dir);
    let mut evo = core.evolution_loop(UniformScaleApplier, FixedScoring { raw: clean_raw(), outputs: None });

    let outcome = evo
        .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
        .unwrap();

    match outcome {
        CycleOutcome::Promoted { generation, .. } => assert_eq!(generation, 1),
        other => panic!("expected Promoted, got {other:?}"),
    }
    assert_eq!(core.champion().generation, 1);
    core.verify_chain().unwrap();

    let last_pcag = core.ledger.last_pcag().unwrap().unwrap();
    assert!(matches!(last_pcag.sigma_verdict, penin::SigmaVerdict::Promote));
    assert!(matches!(last_pcag.ethics_verdict, penin::EthicsVerdict::Pass));
}

/// Scenario 2: contractivity failure (`rho = 1.05`). Gate 1 fails, the
/// verdict rolls back, and the champion is left untouched at generation 0.
#[test]
fn scenario_2_contractivity_failure_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let core = new_core(&dir);
    let mut raw = clean_raw();
    raw.rho = 1.05;
    let mut evo = core.evolution_loop(UniformScaleApplier, FixedScoring { raw, outputs: None });

    let outcome = evo
        .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
        .unwrap();

    assert!(matches!(outcome, CycleOutcome::RolledBack { .. }));
    assert_eq!(core.champion().generation, 0);

    let last_pcag = core.ledger.last_pcag().unwrap().unwrap();
    assert!(matches!(last_pcag.sigma_verdict, penin::SigmaVerdict::Rollback));
}

/// Scenario 3: ethics block. A consciousness claim in the candidate's
/// observable outputs trips a critical LO-01 violation; the verdict rolls
/// back and the PCAg's ethics verdict is "fail" regardless of every other
/// metric being clean.
#[test]
fn scenario_3_consciousness_claim_blocks_via_ethics() {
    let dir = tempfile::tempdir().unwrap();
    let core = new_core(&dir);
    let outputs = Some(serde_json::json!({ "claims_consciousness": true }));
    let mut evo = core.evolution_loop(UniformScaleApplier, FixedScoring { raw: clean_raw(), outputs });

    let outcome = evo
        .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
        .unwrap();

    assert!(matches!(outcome, CycleOutcome::RolledBack { .. }));
    assert_eq!(core.champion().generation, 0);

    let last_pcag = core.ledger.last_pcag().unwrap().unwrap();
    assert!(matches!(last_pcag.ethics_verdict, penin::EthicsVerdict::Fail));
}

/// Scenario 4: the champion death gate. `delta_linf = 0.005` (below the
/// default `beta_min = 0.01`) fails only the improvement gate; recurring
/// twice in a row with otherwise clean metrics quarantines the champion.
#[test]
fn scenario_4_two_consecutive_death_gate_hits_quarantine_the_champion() {
    let dir = tempfile::tempdir().unwrap();
    let core = new_core(&dir);
    let mut raw = clean_raw();
    raw.delta_linf = 0.005;
    let mut evo = core.evolution_loop(UniformScaleApplier, FixedScoring { raw, outputs: None });

    let first = evo
        .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
        .unwrap();
    assert!(matches!(first, CycleOutcome::RolledBack { .. }));

    let second = evo
        .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
        .unwrap();
    assert!(matches!(second, CycleOutcome::ChampionQuarantined { .. }));

    let events = core.ledger.read_all().unwrap();
    assert!(events.iter().any(|e| e.event_type == "champion_quarantined"));
}

/// Scenario 5: ledger tamper detection. Five events in, flip one bit of
/// the third event's payload on disk; `verify_chain()` must fail at that
/// event and no later one.
#[test]
fn scenario_5_ledger_tamper_detection_points_at_the_tampered_event() {
    let dir = tempfile::tempdir().unwrap();
    let ledger_path = dir.path().join("ledger.jsonl");
    let ledger = penin::WormLedger::open(&ledger_path).unwrap();
    for i in 0..5u32 {
        ledger
            .append("note", format!("id-{i}"), serde_json::json!({ "v": i }))
            .unwrap();
    }
    assert!(ledger.verify_chain().is_ok());

    let contents = std::fs::read_to_string(&ledger_path).unwrap();
    let tampered = contents.replace("\"v\":2", "\"v\":999");
    assert_ne!(contents, tampered, "the replacement must actually change the file");
    std::fs::write(&ledger_path, tampered).unwrap();

    let err = ledger.verify_chain().unwrap_err();
    match err {
        penin::LedgerError::HashMismatch { sequence, .. } => assert_eq!(sequence, 3),
        other => panic!("expected a hash mismatch at sequence 3, got {other:?}"),
    }
}

/// Scenario 6: non-compensation. Every gate passes except bias
/// (`rho_bias = 1.15`); doubling `delta_linf` and raising `sr`'s inputs
/// toward 1.0 must still roll back, with bias as the sole failing gate.
#[test]
fn scenario_6_non_compensation_bias_alone_blocks_promotion() {
    let dir = tempfile::tempdir().unwrap();
    let core = new_core(&dir);
    let mut raw = clean_raw();
    raw.rho_bias = 1.15;
    raw.delta_linf *= 2.0;
    raw.awareness = 0.99;
    raw.autocorrection = 0.99;
    raw.metacognition = 0.99;
    let mut evo = core.evolution_loop(UniformScaleApplier, FixedScoring { raw, outputs: None });

    let outcome = evo
        .run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
        .unwrap();

    match outcome {
        CycleOutcome::RolledBack { reason, .. } => assert!(reason.contains("bias")),
        other => panic!("expected RolledBack naming the bias gate, got {other:?}"),
    }
    assert_eq!(core.champion().generation, 0);
}

/// The evolution loop shares its runtime and ledger across independent
/// `evolution_loop()` calls — a host swapping scoring functions mid-run
/// (e.g. after a strategy change) still observes one continuous champion
/// history and one ledger chain.
#[test]
fn shared_core_state_persists_across_separate_loop_instances() {
    let dir = tempfile::tempdir().unwrap();
    let core = new_core(&dir);

    {
        let mut evo = core.evolution_loop(UniformScaleApplier, FixedScoring { raw: clean_raw(), outputs: None });
        evo.run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
    }
    assert_eq!(core.champion().generation, 1);

    {
        let mut evo = core.evolution_loop(UniformScaleApplier, FixedScoring { raw: clean_raw(), outputs: None });
        evo.run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
            .unwrap();
    }
    assert_eq!(core.champion().generation, 2);
    core.verify_chain().unwrap();

    let stats = core.statistics().unwrap();
    assert_eq!(stats.total_events, 2);
}

#[test]
fn export_audit_report_summarizes_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let core = new_core(&dir);
    let mut evo = core.evolution_loop(UniformScaleApplier, FixedScoring { raw: clean_raw(), outputs: None });
    evo.run_cycle(&serde_json::json!({}), &no_deadline(), &CancellationToken::new())
        .unwrap();

    let report_path = dir.path().join("report.md");
    core.export_audit_report(&report_path).unwrap();
    let contents = std::fs::read_to_string(&report_path).unwrap();
    assert!(contents.contains("total_events: 1"));

    let _ = Arc::new(core);
}
