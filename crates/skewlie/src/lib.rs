#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # skewlie
//!
//! The Lie algebra so(n) of real `n x n` skew-symmetric matrices, the tangent space at the
//! identity of the rotation group SO(n).
//!
//! [`SkewSymmetricMatrices`] provides:
//!
//! - the canonical basis of `n(n-1)/2` elementary generators,
//! - conversion between coordinate vectors and matrices ([`IndexPairs`] fixes the ordering),
//! - the membership predicate and the projection onto the algebra,
//! - the Lie bracket `[A, B] = AB - BA`,
//! - the Baker-Campbell-Hausdorff series up to order 4,
//! - uniform random sampling.
//!
//! Arithmetic goes through a [`skewlie_tensor_ops::Backend`]; [`skewlie_tensor_ops::CpuBackend`]
//! is used by default.
//!
//! ## Example
//!
//! ```rust
//! use skewlie::SkewSymmetricMatrices;
//!
//! let so3 = SkewSymmetricMatrices::new(3).unwrap();
//! let a = so3.random_point().unwrap();
//! let b = so3.random_point().unwrap();
//!
//! // second order approximation of log(exp(a) exp(b))
//! let z = so3.baker_campbell_hausdorff(&a, &b, 2).unwrap();
//! assert!(so3.belongs(&z));
//!
//! let coords = so3.basis_representation(&z).unwrap();
//! assert_eq!(coords.shape, [3]);
//! ```

/// Baker-Campbell-Hausdorff series.
pub mod bch;

/// Canonical index pairs and basis construction.
pub mod basis;

/// Numerical configuration.
pub mod config;

/// Error types for the algebra.
pub mod error;

mod representation;

/// The algebra of skew-symmetric matrices.
pub mod skew;

pub use basis::{dimension, IndexPairs};
pub use bch::BchOrder;
pub use config::SkewConfig;
pub use error::SkewAlgebraError;
pub use skew::SkewSymmetricMatrices;
