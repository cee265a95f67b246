//! Equation 1: the master-equation stepper.
//!
//! `I_{n+1} = Pi_{H intersect S}(I_n + alpha_eff * G_dir)`. `G_dir` (the
//! improvement direction) is supplied by the caller — the kernel has no
//! opinion on how it was estimated (analytic gradient, policy difference,
//! challenger delta, ...). `Pi_{H intersect S}` is any [`Projection`]; ethical
//! constraints (`S`) are composed in by a caller-supplied projection rather
//! than by this crate, since ethics validation lives in a separate crate
//! and the kernel must stay free of that dependency.

/// A rejected projection carries a reason; the step is then a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionFailure {
    pub reason: String,
}

/// `H intersect S`: anything that can veto or reshape a candidate state.
pub trait Projection {
    fn project(&self, candidate: &[f64]) -> Result<Vec<f64>, ProjectionFailure>;
}

/// Coordinate-wise box constraints (the `H` technical bound).
#[derive(Debug, Clone)]
pub struct BoxBounds {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl Projection for BoxBounds {
    fn project(&self, candidate: &[f64]) -> Result<Vec<f64>, ProjectionFailure> {
        if candidate.len() != self.min.len() || candidate.len() != self.max.len() {
            return Err(ProjectionFailure {
                reason: format!(
                    "dimension mismatch: candidate has {} coords, bounds have {}",
                    candidate.len(),
                    self.min.len()
                ),
            });
        }
        Ok(candidate
            .iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .map(|(v, (lo, hi))| v.clamp(*lo, *hi))
            .collect())
    }
}

/// Enforces `||I|| <= max_norm` by uniform rescaling.
#[derive(Debug, Clone, Copy)]
pub struct MaxNorm {
    pub max_norm: f64,
}

impl Projection for MaxNorm {
    fn project(&self, candidate: &[f64]) -> Result<Vec<f64>, ProjectionFailure> {
        if self.max_norm <= 0.0 {
            return Err(ProjectionFailure {
                reason: "max_norm must be positive".into(),
            });
        }
        let norm = candidate.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm <= self.max_norm || norm == 0.0 {
            return Ok(candidate.to_vec());
        }
        let scale = self.max_norm / norm;
        Ok(candidate.iter().map(|v| v * scale).collect())
    }
}

/// Applies a sequence of projections left-to-right; the first failure
/// short-circuits the pipeline.
pub struct Pipeline<'a> {
    pub stages: Vec<&'a dyn Projection>,
}

impl<'a> Projection for Pipeline<'a> {
    fn project(&self, candidate: &[f64]) -> Result<Vec<f64>, ProjectionFailure> {
        let mut current = candidate.to_vec();
        for stage in &self.stages {
            current = stage.project(&current)?;
        }
        Ok(current)
    }
}

/// Outcome of one master-equation step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The projected `I_{n+1}`.
    Stepped(Vec<f64>),
    /// Projection failed; `I_n` is returned unchanged along with why.
    Unchanged { previous: Vec<f64>, reason: String },
}

/// Performs one master-equation update. A failed projection is a no-op:
/// the returned state equals `i_n`.
pub fn master_equation_step(
    i_n: &[f64],
    direction: &[f64],
    alpha_eff: f64,
    projection: &dyn Projection,
) -> StepOutcome {
    if i_n.len() != direction.len() {
        return StepOutcome::Unchanged {
            previous: i_n.to_vec(),
            reason: format!(
                "state/direction dimension mismatch: {} != {}",
                i_n.len(),
                direction.len()
            ),
        };
    }

    let candidate: Vec<f64> = i_n
        .iter()
        .zip(direction.iter())
        .map(|(x, g)| x + alpha_eff * g)
        .collect();

    match projection.project(&candidate) {
        Ok(projected) => StepOutcome::Stepped(projected),
        Err(failure) => StepOutcome::Unchanged {
            previous: i_n.to_vec(),
            reason: failure.reason,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_bounds_clamp_coordinates() {
        let bounds = BoxBounds {
            min: vec![0.0, 0.0],
            max: vec![1.0, 1.0],
        };
        let out = bounds.project(&[-0.5, 1.5]).unwrap();
        assert_eq!(out, vec![0.0, 1.0]);
    }

    #[test]
    fn max_norm_rescales_when_exceeded() {
        let max_norm = MaxNorm { max_norm: 1.0 };
        let out = max_norm.project(&[3.0, 4.0]).unwrap();
        let norm = (out[0] * out[0] + out[1] * out[1]).sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn max_norm_leaves_small_vectors_untouched() {
        let max_norm = MaxNorm { max_norm: 10.0 };
        let out = max_norm.project(&[1.0, 1.0]).unwrap();
        assert_eq!(out, vec![1.0, 1.0]);
    }

    #[test]
    fn step_applies_projection() {
        let bounds = BoxBounds {
            min: vec![0.0],
            max: vec![1.0],
        };
        let outcome = master_equation_step(&[0.5], &[1.0], 1.0, &bounds);
        assert_eq!(outcome, StepOutcome::Stepped(vec![1.0]));
    }

    #[test]
    fn failed_projection_is_a_no_op() {
        struct AlwaysReject;
        impl Projection for AlwaysReject {
            fn project(&self, _candidate: &[f64]) -> Result<Vec<f64>, ProjectionFailure> {
                Err(ProjectionFailure {
                    reason: "ethics veto".into(),
                })
            }
        }

        let outcome = master_equation_step(&[0.5], &[1.0], 1.0, &AlwaysReject);
        match outcome {
            StepOutcome::Unchanged { previous, reason } => {
                assert_eq!(previous, vec![0.5]);
                assert_eq!(reason, "ethics veto");
            }
            _ => panic!("expected unchanged outcome"),
        }
    }

    #[test]
    fn pipeline_applies_stages_in_order() {
        let bounds = BoxBounds {
            min: vec![0.0],
            max: vec![2.0],
        };
        let max_norm = MaxNorm { max_norm: 1.0 };
        let pipeline = Pipeline {
            stages: vec![&bounds, &max_norm],
        };
        let out = pipeline.project(&[5.0]).unwrap();
        assert_eq!(out, vec![1.0]);
    }
}
