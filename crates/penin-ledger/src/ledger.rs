//! The WORM ledger itself (C7): append-only, line-delimited JSON, one file
//! per instance. Appends are linearized by a single-writer lock; readers may
//! read concurrently by reopening the file.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::event::LedgerEvent;
use crate::hash::{compute_hash, HashAlgorithm};
use crate::merkle::merkle_root;
use crate::pcag::ProofCarryingArtifact;
use crate::statistics::LedgerStatistics;

const PCAG_EVENT_TYPE: &str = "pcag";

fn now_ns() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

/// An append-only hash-chained event log.
pub struct WormLedger {
    path: PathBuf,
    writer: Mutex<File>,
}

impl WormLedger {
    /// Opens (creating if absent) the ledger file at `path`.
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(file),
        })
    }

    fn read_lines(&self) -> LedgerResult<Vec<String>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    /// Reads and deserializes every event, in append order.
    pub fn read_all(&self) -> LedgerResult<Vec<LedgerEvent>> {
        self.read_lines()?
            .iter()
            .map(|line| serde_json::from_str(line).map_err(LedgerError::from))
            .collect()
    }

    /// The most recently appended event, if any.
    pub fn last_event(&self) -> LedgerResult<Option<LedgerEvent>> {
        Ok(self.read_all()?.into_iter().last())
    }

    /// The most recently appended PCAg event's artifact, if any.
    pub fn last_pcag(&self) -> LedgerResult<Option<ProofCarryingArtifact>> {
        for event in self.read_all()?.into_iter().rev() {
            if event.event_type == PCAG_EVENT_TYPE {
                let artifact: ProofCarryingArtifact = serde_json::from_value(event.payload)?;
                return Ok(Some(artifact));
            }
        }
        Ok(None)
    }

    /// Appends a new event. Linearized by the writer lock; the file is
    /// fsynced before this returns success. Any error leaves the file
    /// unchanged and the caller must treat the cycle as ledger-unwritten.
    pub fn append(
        &self,
        event_type: impl Into<String>,
        event_id: impl Into<String>,
        payload: serde_json::Value,
    ) -> LedgerResult<LedgerEvent> {
        let mut guard = self.writer.lock();

        let previous = self.last_event()?;
        let sequence = previous.as_ref().map_or(1, |e| e.sequence + 1);
        let previous_hash = previous.map(|e| e.event_hash);

        let event = LedgerEvent::new(sequence, now_ns(), event_type, event_id, payload, previous_hash)?;

        let mut line = serde_json::to_string(&event)?;
        line.push('\n');
        guard.write_all(line.as_bytes())?;
        guard.sync_all()?;

        info!(sequence = event.sequence, event_type = %event.event_type, "ledger event appended");
        Ok(event)
    }

    /// Convenience: serializes `artifact` (chaining `prev_artifact_hash` from
    /// the most recent PCAg event) and appends it as an `event_type = "pcag"`
    /// event.
    pub fn append_pcag(&self, artifact: ProofCarryingArtifact) -> LedgerResult<LedgerEvent> {
        let payload = serde_json::to_value(&artifact)?;
        self.append(PCAG_EVENT_TYPE, artifact.artifact_id.clone(), payload)
    }

    /// Walks events in order, recomputing each hash and checking linkage.
    /// Returns the first mismatch found, if any.
    pub fn verify_chain(&self) -> LedgerResult<()> {
        let events = self.read_all()?;
        let mut previous_hash: Option<String> = None;

        for event in &events {
            if event.previous_hash != previous_hash {
                return Err(LedgerError::ChainBroken {
                    sequence: event.sequence,
                    expected: previous_hash,
                    actual: event.previous_hash.clone(),
                });
            }
            let recomputed = event.recompute_hash()?;
            if recomputed != event.event_hash {
                return Err(LedgerError::HashMismatch {
                    sequence: event.sequence,
                    recorded: event.event_hash.clone(),
                    recomputed,
                });
            }
            previous_hash = Some(event.event_hash.clone());
        }
        Ok(())
    }

    /// Merkle root over per-event hashes, `None` for an empty ledger.
    pub fn merkle_root(&self) -> LedgerResult<Option<String>> {
        let hashes: Vec<String> = self.read_all()?.into_iter().map(|e| e.event_hash).collect();
        Ok(merkle_root(&hashes))
    }

    /// Aggregate ledger health: totals, last sequence/hash, Merkle root,
    /// chain-valid flag, size in bytes.
    pub fn statistics(&self) -> LedgerResult<LedgerStatistics> {
        let events = self.read_all()?;
        let total_events = events.len() as u64;
        let last_sequence = events.last().map_or(0, |e| e.sequence);
        let last_hash = events.last().map(|e| e.event_hash.clone());
        let root = merkle_root(&events.iter().map(|e| e.event_hash.clone()).collect::<Vec<_>>());
        let chain_valid = self.verify_chain().is_ok();
        let size_bytes = std::fs::metadata(&self.path)?.len();

        Ok(LedgerStatistics {
            total_events,
            last_sequence,
            last_hash,
            merkle_root: root,
            chain_valid,
            size_bytes,
        })
    }

    /// Writes a human-readable Markdown audit report (statistics plus the
    /// last `tail` PCAgs) to `path`.
    pub fn export_audit_report(&self, path: impl AsRef<Path>, tail: usize) -> LedgerResult<()> {
        let stats = self.statistics()?;
        let events = self.read_all()?;

        let mut report = String::new();
        report.push_str("# Ledger Audit Report\n\n");
        report.push_str(&format!("- total_events: {}\n", stats.total_events));
        report.push_str(&format!("- last_sequence: {}\n", stats.last_sequence));
        report.push_str(&format!("- last_hash: {}\n", stats.last_hash.as_deref().unwrap_or("null")));
        report.push_str(&format!("- merkle_root: {}\n", stats.merkle_root.as_deref().unwrap_or("null")));
        report.push_str(&format!("- chain_valid: {}\n", stats.chain_valid));
        report.push_str(&format!("- size_bytes: {}\n\n", stats.size_bytes));

        report.push_str("## Recent PCAgs\n\n");
        let pcag_events: Vec<&LedgerEvent> = events
            .iter()
            .filter(|e| e.event_type == PCAG_EVENT_TYPE)
            .collect();
        for event in pcag_events.iter().rev().take(tail) {
            if let Ok(artifact) = serde_json::from_value::<ProofCarryingArtifact>(event.payload.clone()) {
                report.push_str(&format!(
                    "- sequence={} decision_id={} sigma_verdict={:?} ethics_verdict={:?}\n",
                    event.sequence, artifact.decision_id, artifact.sigma_verdict, artifact.ethics_verdict
                ));
            }
        }

        if !stats.chain_valid {
            warn!("exporting audit report for a ledger with a broken chain");
        }

        std::fs::write(path, report)?;
        Ok(())
    }

    /// The digest algorithm used to read an event's recorded hash back, for
    /// ledgers written before BLAKE2b-256 adoption. New appends always use
    /// [`HashAlgorithm::Blake2b256`].
    pub fn detect_hash_algorithm(hex_digest: &str) -> HashAlgorithm {
        if hex_digest.len() == compute_hash(b"", HashAlgorithm::Sha256).len()
            && hex_digest.len() != compute_hash(b"", HashAlgorithm::Blake2b256).len()
        {
            HashAlgorithm::Sha256
        } else {
            HashAlgorithm::Blake2b256
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcag::{EthicsVerdict, PcagProofs, ProofCarryingArtifact, SigmaVerdict};

    fn temp_ledger() -> (WormLedger, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        (WormLedger::open(&path).unwrap(), dir)
    }

    fn sample_proofs() -> PcagProofs {
        PcagProofs {
            linf: 0.7,
            caos_plus: 1.4,
            sr: 0.85,
            omega_g: 0.9,
            rho: 0.95,
            ece: 0.005,
            rho_bias: 1.02,
            delta_linf: 0.025,
            ethics_passed: true,
            violations_count: 0,
            cost_usd: 0.01,
            cost_increase_pct: 0.05,
        }
    }

    #[test]
    fn append_sets_sequence_and_chains_hash() {
        let (ledger, _dir) = temp_ledger();
        let e1 = ledger.append("note", "id-1", serde_json::json!({"v": 1})).unwrap();
        let e2 = ledger.append("note", "id-2", serde_json::json!({"v": 2})).unwrap();
        assert_eq!(e1.sequence, 1);
        assert_eq!(e2.sequence, 2);
        assert_eq!(e2.previous_hash, Some(e1.event_hash));
    }

    #[test]
    fn empty_ledger_has_no_root_and_valid_chain() {
        let (ledger, _dir) = temp_ledger();
        assert!(ledger.merkle_root().unwrap().is_none());
        assert!(ledger.verify_chain().is_ok());
    }

    #[test]
    fn verify_chain_detects_tampering() {
        let (ledger, dir) = temp_ledger();
        ledger.append("note", "id-1", serde_json::json!({"v": 1})).unwrap();
        ledger.append("note", "id-2", serde_json::json!({"v": 2})).unwrap();

        let path = dir.path().join("ledger.jsonl");
        let contents = std::fs::read_to_string(&path).unwrap();
        let tampered = contents.replace("\"v\":1", "\"v\":999");
        std::fs::write(&path, tampered).unwrap();

        assert!(ledger.verify_chain().is_err());
    }

    #[test]
    fn pcag_chain_tracks_prev_artifact_hash() {
        let (ledger, _dir) = temp_ledger();
        let first = ProofCarryingArtifact::new(
            "artifact-1", "decision-1", 1, "promotion", serde_json::json!({}),
            sample_proofs(), SigmaVerdict::Promote, EthicsVerdict::Pass, None, serde_json::json!({}),
        ).unwrap();
        ledger.append_pcag(first.clone()).unwrap();

        let last = ledger.last_pcag().unwrap().unwrap();
        assert_eq!(last.artifact_id, first.artifact_id);

        let second = ProofCarryingArtifact::new(
            "artifact-2", "decision-2", 2, "promotion", serde_json::json!({}),
            sample_proofs(), SigmaVerdict::Promote, EthicsVerdict::Pass,
            Some(last.current_hash.clone()), serde_json::json!({}),
        ).unwrap();
        ledger.append_pcag(second).unwrap();

        let final_pcag = ledger.last_pcag().unwrap().unwrap();
        assert_eq!(final_pcag.prev_artifact_hash, Some(last.current_hash));
    }

    #[test]
    fn statistics_report_matches_appended_events() {
        let (ledger, _dir) = temp_ledger();
        ledger.append("note", "id-1", serde_json::json!({"v": 1})).unwrap();
        ledger.append("note", "id-2", serde_json::json!({"v": 2})).unwrap();
        let stats = ledger.statistics().unwrap();
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.last_sequence, 2);
        assert!(stats.chain_valid);
        assert!(stats.merkle_root.is_some());
    }

    #[test]
    fn export_audit_report_writes_markdown() {
        let (ledger, dir) = temp_ledger();
        let artifact = ProofCarryingArtifact::new(
            "artifact-1", "decision-1", 1, "promotion", serde_json::json!({}),
            sample_proofs(), SigmaVerdict::Promote, EthicsVerdict::Pass, None, serde_json::json!({}),
        ).unwrap();
        ledger.append_pcag(artifact).unwrap();

        let report_path = dir.path().join("report.md");
        ledger.export_audit_report(&report_path, 10).unwrap();
        let contents = std::fs::read_to_string(&report_path).unwrap();
        assert!(contents.contains("total_events: 1"));
        assert!(contents.contains("decision-1"));
    }
}
