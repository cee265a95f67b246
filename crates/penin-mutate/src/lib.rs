//! Ω-META mutation generator (C4): produces candidate parameter/policy/
//! architecture deltas and validates their syntactic safety before they
//! ever reach the evolution loop.

pub mod generator;
pub mod mutation;
pub mod safety;

pub use generator::{BatchStrategy, MutationGenerator};
pub use mutation::{ArchitectureChange, Mutation, MutationKind, ParameterTune, PolicyThreshold, RiskLevel};
pub use safety::{check_safety, SafetyViolation};
