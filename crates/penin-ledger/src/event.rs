//! `LedgerEvent`: one line of the append-only WORM log.

use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::hash::hash_json;

/// A single committed record in the ledger's hash chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub sequence: u64,
    pub timestamp_ns: u128,
    pub event_type: String,
    pub event_id: String,
    pub payload: serde_json::Value,
    pub previous_hash: Option<String>,
    pub event_hash: String,
}

/// The fields that feed `event_hash`; never serialized on their own, only
/// used as the canonicalization input.
#[derive(Serialize)]
struct EventHashBody<'a> {
    sequence: u64,
    timestamp_ns: u128,
    event_type: &'a str,
    event_id: &'a str,
    payload: &'a serde_json::Value,
    previous_hash: &'a Option<String>,
}

impl LedgerEvent {
    pub fn new(
        sequence: u64,
        timestamp_ns: u128,
        event_type: impl Into<String>,
        event_id: impl Into<String>,
        payload: serde_json::Value,
        previous_hash: Option<String>,
    ) -> LedgerResult<Self> {
        let event_type = event_type.into();
        let event_id = event_id.into();
        let body = EventHashBody {
            sequence,
            timestamp_ns,
            event_type: &event_type,
            event_id: &event_id,
            payload: &payload,
            previous_hash: &previous_hash,
        };
        let event_hash = hash_json(&body)?;
        Ok(Self {
            sequence,
            timestamp_ns,
            event_type,
            event_id,
            payload,
            previous_hash,
            event_hash,
        })
    }

    /// Recomputes `event_hash` from the event's own fields, for verification.
    pub fn recompute_hash(&self) -> LedgerResult<String> {
        let body = EventHashBody {
            sequence: self.sequence,
            timestamp_ns: self.timestamp_ns,
            event_type: &self.event_type,
            event_id: &self.event_id,
            payload: &self.payload,
            previous_hash: &self.previous_hash,
        };
        hash_json(&body)
    }
}
