#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `skewlie-tensor` provides [`Tensor`], an owned multi-dimensional array whose rank is a
//! const generic. Data is always stored contiguously in row-major order, so the strides are
//! a pure function of the shape.
//!
//! A stack of matrices is represented as a rank-3 tensor whose leading axis is the batch axis.
//!
//! ```rust
//! use skewlie_tensor::Tensor3;
//!
//! let batch = Tensor3::<f64>::from_shape_fn([4, 3, 3], |[b, i, j]| (b + i + j) as f64);
//! assert_eq!(batch.shape, [4, 3, 3]);
//! assert_eq!(batch.get([3, 2, 2]), Some(&7.0));
//! ```

/// Serde module for JSON/other format serialization and deserialization.
#[cfg(feature = "serde")]
pub mod serde;

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::tensor::{Tensor, TensorError};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;
