//! Errors raised by the evolution loop. Ethics and gate
//! failures are never errors here — they surface as [`crate::outcome::CycleOutcome`]
//! values. `CycleError` is reserved for the plumbing failures this crate
//! says must abort the cycle without promoting: unwritable ledgers,
//! unserializable payloads, and mutations that never should have reached
//! the loop.

use thiserror::Error;

use penin_kernel::KernelError;
use penin_ledger::LedgerError;
use penin_mutate::SafetyViolation;

use crate::scoring::ScoringError;

#[derive(Error, Debug)]
pub enum CycleError {
    #[error("mutation rejected by the syntactic safety check: {0}")]
    MutationRejected(#[from] SafetyViolation),

    #[error("scoring function failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("scoring kernel rejected an input: {0}")]
    Kernel(#[from] KernelError),

    #[error("ledger append failed, cycle left uncommitted: {0}")]
    Ledger(#[from] LedgerError),
}

pub type CycleResult<T> = Result<T, CycleError>;
