use skewlie_tensor_ops::TensorOpsError;
use thiserror::Error;

/// An error type for the skew-symmetric matrix algebra.
#[derive(Error, Debug, PartialEq)]
pub enum SkewAlgebraError {
    /// The matrix size does not admit a non-trivial algebra.
    #[error("Invalid dimension: n must be at least 2, got {0}")]
    InvalidDimension(usize),

    /// The trailing shape of an input does not match `[dim]` or `[n, n]`.
    #[error("Shape mismatch: expected trailing shape {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape of the input
        actual: Vec<usize>,
    },

    /// The Baker-Campbell-Hausdorff series is only available up to order 4.
    #[error("Unsupported BCH order {0}, expected 1, 2, 3 or 4")]
    UnsupportedOrder(usize),

    /// A batch of samples must contain at least one element.
    #[error("The number of samples must be at least 1")]
    InvalidSampleCount,

    /// The membership tolerance must be finite and non-negative.
    #[error("Invalid tolerance {0}")]
    InvalidTolerance(f64),

    /// The sampling bound must be finite and positive.
    #[error("Invalid sampling bound {0}")]
    InvalidBound(f64),

    /// Error raised by the array backend.
    #[error(transparent)]
    TensorOps(#[from] TensorOpsError),
}

impl SkewAlgebraError {
    pub(crate) fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

impl From<skewlie_tensor::TensorError> for SkewAlgebraError {
    fn from(e: skewlie_tensor::TensorError) -> Self {
        Self::TensorOps(TensorOpsError::TensorError(e))
    }
}
