//! Ethics validator for PENIN-Omega: the 14 Origin Laws, fail-closed.
//!
//! A [`context::DecisionContext`] describes the observable properties of one
//! candidate decision; [`validator::validate`] checks it against every law
//! and returns a recommendation that never degrades silently — any critical
//! violation forces a rollback recommendation regardless of every other
//! sub-score.

pub mod context;
pub mod laws;
pub mod validator;

pub use context::DecisionContext;
pub use laws::{all_laws, laws_by_category, LawCategory, LawDefinition, LawId, ALL_LAWS};
pub use validator::{
    validate, EthicsThresholds, EthicsViolation, EthicsValidationResult, Recommendation,
    ViolationSeverity,
};
