use serde::{Deserialize, Serialize};

/// Summary returned by [`crate::ledger::WormLedger::statistics`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerStatistics {
    pub total_events: u64,
    pub last_sequence: u64,
    pub last_hash: Option<String>,
    pub merkle_root: Option<String>,
    pub chain_valid: bool,
    pub size_bytes: u64,
}
