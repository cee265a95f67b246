//! `penin::Error`: the facade's umbrella error, aggregating every
//! component crate's error kind behind `#[from]`.
//!
//! Ethics and Sigma-Guard rejections are never wrapped here — they are
//! [`penin_guard::GuardVerdict`] values returned from a successful call.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("ledger error: {0}")]
    Ledger(#[from] penin_ledger::LedgerError),

    #[error("runtime error: {0}")]
    Runtime(#[from] penin_runtime::RuntimeError),

    #[error("evolution cycle error: {0}")]
    Cycle(#[from] penin_evolution::CycleError),

    #[error("scoring kernel error: {0}")]
    Kernel(#[from] penin_kernel::KernelError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
