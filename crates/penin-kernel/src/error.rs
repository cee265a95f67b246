use thiserror::Error;

/// Errors raised by the pure scoring kernel.
///
/// The kernel never performs I/O; every variant here corresponds to an
/// invalid-input condition (NaN, infinity, out-of-range value with no
/// applicable clamp) rather than a fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("metric vector and weight vector lengths differ: {metrics} != {weights}")]
    LengthMismatch { metrics: usize, weights: usize },

    #[error("empty metric set")]
    EmptyMetrics,

    #[error("missing module score for `{module}`")]
    MissingModule { module: String },
}

pub type KernelResult<T> = Result<T, KernelError>;

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> KernelResult<f64> {
    if value.is_nan() || value.is_infinite() {
        return Err(KernelError::InvalidInput {
            field,
            reason: format!("non-finite value {value}"),
        });
    }
    Ok(value)
}
