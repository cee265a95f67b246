//! The per-day monetary budget tracker: each scoring call reports a
//! cost; when residual budget falls below a floor, the evolution loop
//! halts gracefully at the next cycle boundary.

use serde::{Deserialize, Serialize};

/// Tracks a daily spend envelope. Grounded in the source pipeline's
/// `budget_remaining`/`BudgetTracker` fields (`penin/pipelines/
/// basic_pipeline.py`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BudgetTracker {
    pub daily_budget_usd: f64,
    pub spent_usd: f64,
    pub floor_usd: f64,
}

impl BudgetTracker {
    pub fn new(daily_budget_usd: f64, floor_usd: f64) -> Self {
        Self {
            daily_budget_usd,
            spent_usd: 0.0,
            floor_usd,
        }
    }

    pub fn residual(&self) -> f64 {
        (self.daily_budget_usd - self.spent_usd).max(0.0)
    }

    /// Records a scoring call's reported cost.
    pub fn record_spend(&mut self, cost_usd: f64) {
        self.spent_usd += cost_usd.max(0.0);
    }

    /// `true` once residual budget has fallen below the floor; the loop
    /// halts at the next cycle boundary rather than mid-cycle.
    pub fn is_exhausted(&self) -> bool {
        self.residual() < self.floor_usd
    }

    /// Resets the tracker for a new budget period, keeping the same
    /// envelope and floor.
    pub fn reset_period(&mut self) {
        self.spent_usd = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unexhausted() {
        let tracker = BudgetTracker::new(10.0, 0.5);
        assert!(!tracker.is_exhausted());
        assert_eq!(tracker.residual(), 10.0);
    }

    #[test]
    fn spending_reduces_residual() {
        let mut tracker = BudgetTracker::new(10.0, 0.5);
        tracker.record_spend(3.0);
        assert_eq!(tracker.residual(), 7.0);
    }

    #[test]
    fn crossing_the_floor_marks_exhausted() {
        let mut tracker = BudgetTracker::new(10.0, 1.0);
        tracker.record_spend(9.5);
        assert!(tracker.is_exhausted());
    }

    #[test]
    fn reset_restores_full_budget() {
        let mut tracker = BudgetTracker::new(10.0, 1.0);
        tracker.record_spend(9.5);
        tracker.reset_period();
        assert!(!tracker.is_exhausted());
        assert_eq!(tracker.residual(), 10.0);
    }
}
