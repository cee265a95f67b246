//! The ethical last-mile safety net: the master-equation step
//! runs through `H ∩ S`. `H` (box bounds, max-norm) is composed by the
//! caller using `penin_kernel`'s projections directly; this module
//! supplies `S`, which `penin-kernel` cannot depend on itself (it must
//! stay free of the ethics crate). It re-asserts the cycle's already
//! computed ethics verdict at the point of commit, rather than attempting
//! to re-derive ethics from an opaque numeric vector the core has no
//! semantic knowledge of.

use penin_kernel::{Projection, ProjectionFailure};

/// Vetoes a step outright when the cycle's ethics verdict did not pass;
/// otherwise passes the candidate through unchanged.
pub struct EthicalProjection {
    pub ethics_passed: bool,
    pub reason: String,
}

impl Projection for EthicalProjection {
    fn project(&self, candidate: &[f64]) -> Result<Vec<f64>, ProjectionFailure> {
        if self.ethics_passed {
            Ok(candidate.to_vec())
        } else {
            Err(ProjectionFailure {
                reason: self.reason.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_when_ethics_passed() {
        let projection = EthicalProjection {
            ethics_passed: true,
            reason: String::new(),
        };
        assert_eq!(projection.project(&[1.0, 2.0]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn vetoes_when_ethics_failed() {
        let projection = EthicalProjection {
            ethics_passed: false,
            reason: "consciousness claim".into(),
        };
        assert!(projection.project(&[1.0, 2.0]).is_err());
    }
}
