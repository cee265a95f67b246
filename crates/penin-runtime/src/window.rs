//! A bounded rolling window of recent [`MetricVector`]s, held by C8
//! alongside the champion.

use std::collections::VecDeque;

use crate::metric::MetricVector;

/// Fixed-capacity ring buffer: pushing past capacity drops the oldest
/// entry. Capacity `0` means nothing is ever retained.
#[derive(Debug, Clone)]
pub struct MetricWindow {
    capacity: usize,
    entries: VecDeque<MetricVector>,
}

impl MetricWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, metrics: MetricVector) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(metrics);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricVector> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&MetricVector> {
        self.entries.back()
    }

    /// Mean `delta_linf` over the window, `0.0` when empty.
    pub fn mean_delta_linf(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().map(|m| m.delta_linf).sum::<f64>() / self.entries.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::RawMetricInputs;

    fn metrics(delta_linf: f64) -> MetricVector {
        MetricVector::new(
            RawMetricInputs {
                c: 0.8,
                a: 0.5,
                o: 0.5,
                s: 0.5,
                awareness: 0.8,
                autocorrection: 0.8,
                metacognition: 0.8,
                ethics_ok: true,
                rho: 0.9,
                ece: 0.01,
                rho_bias: 1.0,
                g: 0.9,
                delta_linf,
                kappa: 25.0,
                cost_increase: 0.05,
                consent: true,
                eco_ok: true,
            },
            0.7,
            1.3,
            0.8,
        )
    }

    #[test]
    fn drops_oldest_past_capacity() {
        let mut window = MetricWindow::new(2);
        window.push(metrics(0.01));
        window.push(metrics(0.02));
        window.push(metrics(0.03));
        assert_eq!(window.len(), 2);
        assert_eq!(window.iter().next().unwrap().delta_linf, 0.02);
    }

    #[test]
    fn mean_delta_linf_over_window() {
        let mut window = MetricWindow::new(3);
        window.push(metrics(0.01));
        window.push(metrics(0.03));
        assert!((window.mean_delta_linf() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let mut window = MetricWindow::new(0);
        window.push(metrics(0.01));
        assert!(window.is_empty());
    }
}
