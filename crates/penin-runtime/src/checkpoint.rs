//! Periodic snapshots of [`ChampionState`], with rolling retention.
//! Used by C5 on rollback when the live champion has degraded and the
//! most recent one whose PCAg shows PASS needs restoring.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::champion::ChampionState;

/// A snapshot of [`ChampionState`] taken before a cycle's mutation is
/// applied, so the cycle can be undone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub state: ChampionState,
    pub reason: String,
}

impl Checkpoint {
    pub fn new(state: ChampionState, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            state,
            reason: reason.into(),
        }
    }
}

/// Rolling-retention store: the oldest checkpoint is evicted once
/// `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    capacity: usize,
    entries: VecDeque<Checkpoint>,
}

impl CheckpointStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, checkpoint: Checkpoint) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(checkpoint);
    }

    pub fn latest(&self) -> Option<&Checkpoint> {
        self.entries.back()
    }

    pub fn find(&self, id: &str) -> Option<&Checkpoint> {
        self.entries.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.entries.iter()
    }
}
