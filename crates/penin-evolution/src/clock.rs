//! Deadline and cancellation primitives for the concurrency model: the
//! loop is single-threaded and synchronous, so a small `Instant`-based
//! deadline plus an `Arc<AtomicBool>` token cover cooperative cancellation
//! without pulling in an async runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative cancellation signal, cheap to clone and share across the
/// host's own threads if its scoring function spawns any.
#[derive(Debug, Clone)]
pub struct CancellationToken(Arc<AtomicBool>);

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A cycle's wall-clock budget. A missed deadline aborts the cycle at the
/// next yield point.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    timeout: Duration,
}

impl Deadline {
    pub fn starting_now(timeout: Duration) -> Self {
        Self {
            started: Instant::now(),
            timeout,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.started.elapsed() >= self.timeout
    }

    pub fn remaining(&self) -> Duration {
        self.timeout.saturating_sub(self.started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_uncancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn shared_token_sees_cancellation_from_clone() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn zero_timeout_deadline_is_immediately_expired() {
        let deadline = Deadline::starting_now(Duration::from_secs(0));
        assert!(deadline.is_expired());
    }

    #[test]
    fn long_deadline_is_not_expired() {
        let deadline = Deadline::starting_now(Duration::from_secs(3600));
        assert!(!deadline.is_expired());
    }
}
