#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Backend abstraction over the numeric operations the algebra needs.
///
/// Provides the [`Backend`] trait and the [`CpuBackend`] implementation.
pub mod backend;

/// Error types for tensor operations.
///
/// Defines [`TensorOpsError`] for handling failures during tensor computations.
pub mod error;

/// Free functions implementing elementwise arithmetic, batched matrix products,
/// batched reductions and random sampling on CPU tensors.
pub mod ops;

pub use backend::{Backend, CpuBackend};
pub use error::TensorOpsError;
