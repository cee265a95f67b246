//! Champion-challenger evolution loop for PENIN-Omega (C5): propose a
//! mutation, shadow-apply it, measure the candidate, validate it against
//! the ethics and Sigma-Guard gates, commit or discard via the
//! master-equation stepper, and append exactly one proof-carrying ledger
//! event per decision.

pub mod apply;
pub mod clock;
pub mod config;
pub mod context;
pub mod cycle;
pub mod derive;
pub mod error;
pub mod outcome;
pub mod projection;
pub mod scoring;
pub mod spi;

pub use apply::{MutationApplier, ShadowCandidate, UniformScaleApplier};
pub use clock::{CancellationToken, Deadline};
pub use config::EvolutionConfig;
pub use context::decision_context_from_outputs;
pub use cycle::{restore_champion_if_degraded, EvolutionLoop};
pub use derive::derive_metric_vector;
pub use error::{CycleError, CycleResult};
pub use outcome::CycleOutcome;
pub use projection::EthicalProjection;
pub use scoring::{ScoreReport, ScoringError, ScoringFunction, Workload};
pub use spi::{spi_score, trips_quarantine, SpiInputs, SpiWeights, DEFAULT_SPI_TAU};
