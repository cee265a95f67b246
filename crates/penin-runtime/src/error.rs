use thiserror::Error;

/// Errors raised by the runtime-state layer.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("checkpoint {0} not found")]
    CheckpointNotFound(String),

    #[error("no checkpoint available to restore from")]
    NoCheckpointAvailable,
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
