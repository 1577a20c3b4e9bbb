use skewlie_tensor::{Tensor2, Tensor3};
use skewlie_tensor_ops::{Backend, CpuBackend};

use crate::{
    basis::{build_basis, dimension, IndexPairs},
    config::SkewConfig,
    error::SkewAlgebraError,
};

/// The Lie algebra so(n) of real `n x n` skew-symmetric matrices.
///
/// The instance owns the canonical index table and the stacked basis, both built once at
/// construction and never mutated afterwards, so a shared reference can be used from
/// several threads at once.
///
/// Every operation comes in two forms: a single-instance form on rank-1 vectors and rank-2
/// matrices, and a `*_batch` form where the leading axis is the batch axis.
///
/// # Example
///
/// ```
/// use skewlie::SkewSymmetricMatrices;
/// use skewlie_tensor::Tensor1;
///
/// let so3 = SkewSymmetricMatrices::new(3).unwrap();
/// assert_eq!(so3.dim(), 3);
///
/// let v = Tensor1::from_shape_vec([3], vec![1.0, 2.0, 3.0]).unwrap();
/// let m = so3.matrix_representation(&v).unwrap();
/// assert!(so3.belongs(&m));
/// assert_eq!(so3.basis_representation(&m).unwrap(), v);
/// ```
#[derive(Debug, Clone)]
pub struct SkewSymmetricMatrices<B: Backend = CpuBackend> {
    pub(crate) n: usize,
    pub(crate) pairs: IndexPairs,
    pub(crate) basis: Tensor3<f64>,
    pub(crate) config: SkewConfig,
    pub(crate) backend: B,
}

impl SkewSymmetricMatrices<CpuBackend> {
    /// Creates the algebra of `n x n` skew-symmetric matrices with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::InvalidDimension`] when `n < 2`.
    pub fn new(n: usize) -> Result<Self, SkewAlgebraError> {
        Self::with_config(n, SkewConfig::default())
    }

    /// Creates the algebra with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when `n < 2` or the configuration is invalid.
    pub fn with_config(n: usize, config: SkewConfig) -> Result<Self, SkewAlgebraError> {
        Self::with_backend(n, config, CpuBackend)
    }
}

impl<B: Backend> SkewSymmetricMatrices<B> {
    /// Creates the algebra with an explicit configuration and array backend.
    ///
    /// # Errors
    ///
    /// Returns an error when `n < 2` or the configuration is invalid.
    pub fn with_backend(n: usize, config: SkewConfig, backend: B) -> Result<Self, SkewAlgebraError> {
        if n < 2 {
            return Err(SkewAlgebraError::InvalidDimension(n));
        }
        config.validate()?;

        let pairs = IndexPairs::new(n);
        let basis = build_basis(&pairs);
        log::debug!(
            "so({}) algebra: dim = {}, atol = {:e}, sample bound = {}",
            n,
            pairs.len(),
            config.atol,
            config.sample_bound
        );

        Ok(Self {
            n,
            pairs,
            basis,
            config,
            backend,
        })
    }

    /// Size `n` of the matrices.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Dimension `n(n-1)/2` of the algebra.
    pub fn dim(&self) -> usize {
        dimension(self.n)
    }

    /// The basis as a `[dim, n, n]` tensor, in canonical order.
    pub fn basis(&self) -> &Tensor3<f64> {
        &self.basis
    }

    /// The `k`-th basis matrix, or `None` if `k >= dim`.
    pub fn basis_element(&self, k: usize) -> Option<Tensor2<f64>> {
        if k >= self.dim() {
            return None;
        }
        let len = self.n * self.n;
        Tensor2::from_shape_slice([self.n, self.n], &self.basis.as_slice()[k * len..(k + 1) * len])
            .ok()
    }

    /// The canonical index table shared by the basis and both representation converters.
    pub fn index_pairs(&self) -> &IndexPairs {
        &self.pairs
    }

    /// Coordinate associated with the off-diagonal entry `(i, j)`.
    pub fn pair_index(&self, i: usize, j: usize) -> Option<usize> {
        self.pairs.index_of(i, j)
    }

    /// Numerical configuration of the algebra.
    pub fn config(&self) -> &SkewConfig {
        &self.config
    }

    /// The array backend used for arithmetic.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn check_matrix_shape(&self, shape: [usize; 2]) -> Result<(), SkewAlgebraError> {
        if shape != [self.n, self.n] {
            return Err(SkewAlgebraError::shape_mismatch(&[self.n, self.n], &shape));
        }
        Ok(())
    }

    /// Whether `mat` is an `n x n` skew-symmetric matrix.
    ///
    /// This is a total predicate: any other shape yields `false`.
    pub fn belongs(&self, mat: &Tensor2<f64>) -> bool {
        let [rows, cols] = mat.shape;
        match lift(mat) {
            Ok(batch) => self.belongs_batch(&batch).first().copied().unwrap_or(false),
            Err(e) => {
                log::warn!("belongs: cannot lift [{}, {}] matrix: {}", rows, cols, e);
                false
            }
        }
    }

    /// Membership test for every matrix of a `[batch, rows, cols]` tensor.
    ///
    /// Returns one boolean per batch element. If the trailing shape is not `[n, n]` every
    /// element is reported as not belonging.
    pub fn belongs_batch(&self, mats: &Tensor3<f64>) -> Vec<bool> {
        let [batch, rows, cols] = mats.shape;
        if rows != self.n || cols != self.n {
            return vec![false; batch];
        }

        let neg_transposed = self.backend.scale(&self.backend.transpose(mats), -1.0);
        match self.backend.all_close(mats, &neg_transposed, self.config.atol) {
            Ok(flags) => flags,
            Err(e) => {
                log::warn!("belongs: {}", e);
                vec![false; batch]
            }
        }
    }

    /// Orthogonal projection `(M - Mᵀ) / 2` onto the skew-symmetric matrices.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if `mat` is not `n x n`.
    pub fn projection(&self, mat: &Tensor2<f64>) -> Result<Tensor2<f64>, SkewAlgebraError> {
        self.check_matrix_shape(mat.shape)?;
        unlift(self.projection_batch(&lift(mat)?)?)
    }

    /// Batched form of [`Self::projection`].
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if the trailing shape is not `[n, n]`.
    pub fn projection_batch(&self, mats: &Tensor3<f64>) -> Result<Tensor3<f64>, SkewAlgebraError> {
        let [_, rows, cols] = mats.shape;
        self.check_matrix_shape([rows, cols])?;
        let diff = self.backend.sub(mats, &self.backend.transpose(mats))?;
        Ok(self.backend.scale(&diff, 0.5))
    }

    /// Lie bracket `[A, B] = AB - BA`.
    ///
    /// Defined for any pair of square matrices of equal size; the result is skew-symmetric
    /// whenever both inputs are.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if the inputs are not square or differ in shape.
    pub fn bracket(
        &self,
        a: &Tensor2<f64>,
        b: &Tensor2<f64>,
    ) -> Result<Tensor2<f64>, SkewAlgebraError> {
        unlift(self.bracket_batch(&lift(a)?, &lift(b)?)?)
    }

    /// Batched form of [`Self::bracket`], pairing `a[k]` with `b[k]`.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if the inputs are not square or differ in shape.
    pub fn bracket_batch(
        &self,
        a: &Tensor3<f64>,
        b: &Tensor3<f64>,
    ) -> Result<Tensor3<f64>, SkewAlgebraError> {
        check_bracket_shapes(a, b)?;
        let ab = self.backend.matmul(a, b)?;
        let ba = self.backend.matmul(b, a)?;
        Ok(self.backend.sub(&ab, &ba)?)
    }

    /// Draws one random element of the algebra.
    ///
    /// Coordinates are uniform in `[-sample_bound, sample_bound)`.
    ///
    /// # Errors
    ///
    /// Propagates backend sampling errors.
    pub fn random_point(&self) -> Result<Tensor2<f64>, SkewAlgebraError> {
        unlift(self.random_points(1)?)
    }

    /// Draws `n_samples` independent random elements as a `[n_samples, n, n]` batch.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::InvalidSampleCount`] when `n_samples == 0`.
    pub fn random_points(&self, n_samples: usize) -> Result<Tensor3<f64>, SkewAlgebraError> {
        if n_samples == 0 {
            return Err(SkewAlgebraError::InvalidSampleCount);
        }
        let bound = self.config.sample_bound;
        log::trace!("sampling {} points of so({})", n_samples, self.n);

        let vectors = self
            .backend
            .random_uniform([n_samples, self.dim()], -bound, bound)?;
        self.matrix_representation_batch(&vectors)
    }
}

/// Both operands must be batches of square matrices with identical shapes.
pub(crate) fn check_bracket_shapes(
    a: &Tensor3<f64>,
    b: &Tensor3<f64>,
) -> Result<(), SkewAlgebraError> {
    let [_, rows, cols] = a.shape;
    if rows != cols {
        return Err(SkewAlgebraError::shape_mismatch(&[rows, rows], &[rows, cols]));
    }
    if a.shape != b.shape {
        return Err(SkewAlgebraError::shape_mismatch(&a.shape, &b.shape));
    }
    Ok(())
}

/// Views a matrix as a batch of one.
pub(crate) fn lift(mat: &Tensor2<f64>) -> Result<Tensor3<f64>, SkewAlgebraError> {
    let [rows, cols] = mat.shape;
    Ok(mat.clone().reshape([1, rows, cols])?)
}

/// Inverse of [`lift`].
pub(crate) fn unlift(batch: Tensor3<f64>) -> Result<Tensor2<f64>, SkewAlgebraError> {
    let [_, rows, cols] = batch.shape;
    Ok(batch.reshape([rows, cols])?)
}
