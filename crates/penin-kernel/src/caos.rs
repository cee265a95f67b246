//! Equation 3: CAOS+ amplifier.
//!
//! `CAOS+ = (1 + kappa * C * A) ^ (O * S)`. Only this base form is
//! implemented at the kernel level. A tempting but wrong shortcut is to
//! fold `phi`'s tanh saturation into this computation directly: `phi`
//! normalization belongs strictly at the composition boundary, never
//! inside the kernel's own CAOS+ computation.

use crate::error::{ensure_finite, KernelError, KernelResult};

/// Default minimum amplifier gain (Sigma-Guard's gate 8 floor).
pub const DEFAULT_KAPPA_MIN: f64 = 20.0;

/// Consistency, Autoevolution, unknowable (Omega), Silence inputs, each
/// clamped to `[0, 1]` before use.
#[derive(Debug, Clone, Copy)]
pub struct CaosInputs {
    pub c: f64,
    pub a: f64,
    pub o: f64,
    pub s: f64,
}

impl CaosInputs {
    pub fn new(c: f64, a: f64, o: f64, s: f64) -> Self {
        Self {
            c: c.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
            o: o.clamp(0.0, 1.0),
            s: s.clamp(0.0, 1.0),
        }
    }
}

/// Computes the raw CAOS+ amplifier: `(1 + kappa * C * A) ^ (O * S)`.
///
/// Always `>= 1.0`. `kappa` is clamped to `>= 1.0` defensively; callers
/// enforcing the Sigma-Guard amplifier floor should separately reject
/// `kappa < kappa_min` rather than rely on this clamp.
pub fn caos_plus(inputs: CaosInputs, kappa: f64) -> KernelResult<f64> {
    ensure_finite("kappa", kappa)?;
    let kappa = kappa.max(1.0);
    let base = 1.0 + kappa * inputs.c * inputs.a;
    let exponent = inputs.o * inputs.s;
    Ok(base.powf(exponent))
}

/// Saturating composition function `phi(z) = tanh(gamma * z)`, used only at
/// the boundary where CAOS+ is combined with other `[0, 1]`-scaled scores
/// (e.g. inside `alpha_eff`). Never applied inside `caos_plus` itself.
pub fn phi(z: f64, gamma: f64) -> f64 {
    (gamma * z).tanh()
}

/// Exponential moving average smoothing state for CAOS+ sub-metrics,
/// configured by half-life (number of samples for a weight to decay to
/// 50%) rather than a raw alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmaState {
    value: Option<f64>,
}

impl EmaState {
    pub fn new() -> Self {
        Self { value: None }
    }

    /// `alpha = 1 - exp(-ln(2) / half_life)`; `half_life <= 0` disables
    /// smoothing (alpha = 1, i.e. the new sample fully replaces the EMA).
    pub fn alpha_for_half_life(half_life: u32) -> f64 {
        if half_life == 0 {
            return 1.0;
        }
        1.0 - (-std::f64::consts::LN_2 / f64::from(half_life)).exp()
    }

    /// Folds in a new observation and returns the updated smoothed value.
    /// The first observation initializes the EMA directly.
    pub fn update(&mut self, new_value: f64, alpha: f64) -> f64 {
        let updated = match self.value {
            None => new_value,
            Some(prev) => alpha * new_value + (1.0 - alpha) * prev,
        };
        self.value = Some(updated);
        updated
    }

    pub fn current(&self) -> Option<f64> {
        self.value
    }
}

/// `CAOS+` inputs smoothed independently via [`EmaState`] before feeding
/// [`caos_plus`], damping per-cycle thrash.
#[derive(Debug, Clone, Default)]
pub struct CaosEma {
    pub c: EmaState,
    pub a: EmaState,
    pub o: EmaState,
    pub s: EmaState,
}

impl CaosEma {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smooths `inputs` in place over this state's history and returns the
    /// smoothed `CAOS+` value for the given `kappa` and `half_life`.
    pub fn smoothed_caos_plus(
        &mut self,
        inputs: CaosInputs,
        kappa: f64,
        half_life: u32,
    ) -> KernelResult<f64> {
        let alpha = EmaState::alpha_for_half_life(half_life);
        let smoothed = CaosInputs {
            c: self.c.update(inputs.c, alpha),
            a: self.a.update(inputs.a, alpha),
            o: self.o.update(inputs.o, alpha),
            s: self.s.update(inputs.s, alpha),
        };
        caos_plus(smoothed, kappa)
    }
}

/// Validates `kappa >= kappa_min` for Sigma-Guard's amplifier-floor gate.
pub fn amplifier_floor_ok(kappa: f64, kappa_min: f64) -> KernelResult<bool> {
    ensure_finite("kappa", kappa)?;
    if kappa_min <= 0.0 {
        return Err(KernelError::InvalidInput {
            field: "kappa_min",
            reason: "must be positive".into(),
        });
    }
    Ok(kappa >= kappa_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caos_plus_always_at_least_one() {
        let inputs = CaosInputs::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(caos_plus(inputs, 20.0).unwrap(), 1.0);
    }

    #[test]
    fn caos_plus_monotonic_in_consistency() {
        let low = CaosInputs::new(0.2, 0.5, 0.5, 0.5);
        let high = CaosInputs::new(0.8, 0.5, 0.5, 0.5);
        assert!(caos_plus(high, 25.0).unwrap() >= caos_plus(low, 25.0).unwrap());
    }

    #[test]
    fn caos_plus_monotonic_in_exponent_dims() {
        let low_os = CaosInputs::new(0.9, 0.9, 0.1, 0.1);
        let high_os = CaosInputs::new(0.9, 0.9, 0.9, 0.9);
        assert!(caos_plus(high_os, 25.0).unwrap() >= caos_plus(low_os, 25.0).unwrap());
    }

    #[test]
    fn ema_first_sample_initializes() {
        let mut ema = EmaState::new();
        let alpha = EmaState::alpha_for_half_life(5);
        let first = ema.update(0.7, alpha);
        assert_eq!(first, 0.7);
    }

    #[test]
    fn ema_smooths_toward_new_value() {
        let mut ema = EmaState::new();
        let alpha = EmaState::alpha_for_half_life(5);
        ema.update(0.5, alpha);
        let second = ema.update(0.9, alpha);
        assert!(second > 0.5 && second < 0.9);
    }

    #[test]
    fn amplifier_floor_gate() {
        assert!(amplifier_floor_ok(25.0, DEFAULT_KAPPA_MIN).unwrap());
        assert!(!amplifier_floor_ok(15.0, DEFAULT_KAPPA_MIN).unwrap());
    }

    #[test]
    fn phi_saturates() {
        assert!(phi(100.0, 1.0) <= 1.0);
        assert!(phi(-100.0, 1.0) >= -1.0);
    }
}
