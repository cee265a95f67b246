//! Lyapunov stability check used to gate champion promotions and to detect
//! champion-state drift on rollback.

/// Default squared-Euclidean-distance potential `V(I) = ||I - I*||^2`.
pub fn squared_distance_potential(state: &[f64], reference: &[f64]) -> f64 {
    state
        .iter()
        .zip(reference.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum()
}

/// `V(I_{n+1}) < V(I_n)` within `tolerance`. `true` means the step is
/// stable; `false` means rollback is required.
pub fn is_stable(v_next: f64, v_current: f64, tolerance: f64) -> bool {
    v_next < v_current + tolerance.abs()
}
