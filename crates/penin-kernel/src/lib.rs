//! Pure scoring kernel for PENIN-Omega.
//!
//! Every function here is deterministic in its inputs, performs no I/O, and
//! holds no hidden state beyond what is explicitly threaded through (e.g.
//! [`caos::CaosEma`]). Numeric semantics are 64-bit floating point
//! throughout.

pub mod caos;
pub mod coherence;
pub mod error;
pub mod lapidation;
pub mod linf;
pub mod lyapunov;
pub mod sr;
pub mod stepper;

pub use caos::{amplifier_floor_ok, caos_plus, phi, CaosEma, CaosInputs, EmaState};
pub use coherence::{default_module_weights, diagnose_bottleneck, omega_sea_coherence};
pub use error::{KernelError, KernelResult};
pub use lapidation::{lapidate, LapidationConfig, LapidationOutcome, RiskProfile, ShrinkageFactors};
pub use linf::{delta_linf, harmonic_mean_weighted, l_infinity, LInfInputs, WeightedMetric};
pub use lyapunov::{is_stable, squared_distance_potential};
pub use sr::{alpha_effective, sr_omega_infinity, SrInputs};
pub use stepper::{master_equation_step, BoxBounds, MaxNorm, Pipeline, Projection, ProjectionFailure, StepOutcome};
