//! Backend abstraction for the array operations consumed by the algebra.
//!
//! The algebra never touches tensor buffers for arithmetic directly; it goes through a
//! [`Backend`], so a different array-math implementation can be swapped in without
//! changing any algebra code.

use num_traits::Float;
use rand::distr::uniform::SampleUniform;
use skewlie_tensor::{Tensor, Tensor3};

use crate::{error::TensorOpsError, ops};

/// Backend trait defining the numeric operations on dense tensors.
///
/// Matrix operations work on batches: a rank-3 tensor of shape `[batch, rows, cols]`.
/// Every method is a pure function of its inputs, apart from the random state consumed
/// by [`Backend::random_uniform`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow safe usage across threads.
pub trait Backend: Send + Sync {
    /// Element-wise `a + b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ.
    fn add<T: Float, const N: usize>(
        &self,
        a: &Tensor<T, N>,
        b: &Tensor<T, N>,
    ) -> Result<Tensor<T, N>, TensorOpsError>;

    /// Element-wise `a - b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ.
    fn sub<T: Float, const N: usize>(
        &self,
        a: &Tensor<T, N>,
        b: &Tensor<T, N>,
    ) -> Result<Tensor<T, N>, TensorOpsError>;

    /// Element-wise `s * a`.
    fn scale<T: Float, const N: usize>(&self, a: &Tensor<T, N>, s: T) -> Tensor<T, N>;

    /// Batched matrix product `a[k] · b[k]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch sizes or inner dimensions differ.
    fn matmul<T: Float>(&self, a: &Tensor3<T>, b: &Tensor3<T>)
        -> Result<Tensor3<T>, TensorOpsError>;

    /// Batched transpose of the last two axes.
    fn transpose<T: Float>(&self, a: &Tensor3<T>) -> Tensor3<T>;

    /// Batched all-reduce of `|a[k] - b[k]| <= atol`, one boolean per batch element.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ.
    fn all_close<T: Float>(
        &self,
        a: &Tensor3<T>,
        b: &Tensor3<T>,
        atol: T,
    ) -> Result<Vec<bool>, TensorOpsError>;

    /// Tensor of independent uniform samples in `[low, high)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is empty or not finite.
    fn random_uniform<T: Float + SampleUniform, const N: usize>(
        &self,
        shape: [usize; N],
        low: T,
        high: T,
    ) -> Result<Tensor<T, N>, TensorOpsError>;
}

/// CPU backend implementation.
///
/// Runs every operation synchronously on the calling thread and draws random numbers from
/// the thread-local generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    /// Creates a new CPU backend.
    pub fn new() -> Self {
        Self
    }
}

impl Backend for CpuBackend {
    fn add<T: Float, const N: usize>(
        &self,
        a: &Tensor<T, N>,
        b: &Tensor<T, N>,
    ) -> Result<Tensor<T, N>, TensorOpsError> {
        ops::add(a, b)
    }

    fn sub<T: Float, const N: usize>(
        &self,
        a: &Tensor<T, N>,
        b: &Tensor<T, N>,
    ) -> Result<Tensor<T, N>, TensorOpsError> {
        ops::sub(a, b)
    }

    fn scale<T: Float, const N: usize>(&self, a: &Tensor<T, N>, s: T) -> Tensor<T, N> {
        ops::mul_scalar(a, s)
    }

    fn matmul<T: Float>(
        &self,
        a: &Tensor3<T>,
        b: &Tensor3<T>,
    ) -> Result<Tensor3<T>, TensorOpsError> {
        ops::matmul(a, b)
    }

    fn transpose<T: Float>(&self, a: &Tensor3<T>) -> Tensor3<T> {
        ops::transpose(a)
    }

    fn all_close<T: Float>(
        &self,
        a: &Tensor3<T>,
        b: &Tensor3<T>,
        atol: T,
    ) -> Result<Vec<bool>, TensorOpsError> {
        ops::all_close(a, b, atol)
    }

    fn random_uniform<T: Float + SampleUniform, const N: usize>(
        &self,
        shape: [usize; N],
        low: T,
        high: T,
    ) -> Result<Tensor<T, N>, TensorOpsError> {
        ops::random_uniform(shape, low, high, &mut rand::rng())
    }
}
