use thiserror::Error;

/// Errors raised by the WORM ledger and its hash utilities.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("hash chain broken at sequence {sequence}: expected previous_hash {expected:?}, found {actual:?}")]
    ChainBroken {
        sequence: u64,
        expected: Option<String>,
        actual: Option<String>,
    },

    #[error("event hash mismatch at sequence {sequence}: recorded {recorded}, recomputed {recomputed}")]
    HashMismatch {
        sequence: u64,
        recorded: String,
        recomputed: String,
    },

    #[error("no prior PCAg event found to chain from")]
    NoPcagChain,

    #[error("invalid key length for keyed hash: {0}")]
    InvalidKeyLength(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
