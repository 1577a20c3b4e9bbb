use skewlie_tensor::{Tensor1, Tensor2, Tensor3};
use skewlie_tensor_ops::Backend;

use crate::{error::SkewAlgebraError, skew::SkewSymmetricMatrices};

impl<B: Backend> SkewSymmetricMatrices<B> {
    /// Matrix of the vector `v` in the canonical basis.
    ///
    /// Coordinate `k` with canonical pair `(i, j)` is written to `(i, j)` and its negation
    /// to `(j, i)`; every other entry is zero.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if `v` does not have length `dim`.
    pub fn matrix_representation(&self, v: &Tensor1<f64>) -> Result<Tensor2<f64>, SkewAlgebraError> {
        let [len] = v.shape;
        let batch = v.clone().reshape([1, len])?;
        let mats = self.matrix_representation_batch(&batch)?;
        Ok(mats.reshape([self.n, self.n])?)
    }

    /// Batched form of [`Self::matrix_representation`]: `[batch, dim] -> [batch, n, n]`.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if the trailing length is not `dim`.
    pub fn matrix_representation_batch(
        &self,
        vectors: &Tensor2<f64>,
    ) -> Result<Tensor3<f64>, SkewAlgebraError> {
        let [batch, len] = vectors.shape;
        let dim = self.dim();
        if len != dim {
            return Err(SkewAlgebraError::shape_mismatch(&[dim], &[len]));
        }

        let n = self.n;
        let mut out = Tensor3::<f64>::zeros([batch, n, n]);
        let coords = vectors.as_slice();
        let data = out.as_slice_mut();
        for (v, m) in coords.chunks(dim).zip(data.chunks_mut(n * n)) {
            for (&x, (i, j)) in v.iter().zip(self.pairs.iter()) {
                m[i * n + j] = x;
                m[j * n + i] = -x;
            }
        }
        Ok(out)
    }

    /// Coordinates of the matrix `mat` in the canonical basis.
    ///
    /// Reads the entries above the diagonal in canonical pair order. The input is not
    /// checked for skew-symmetry.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if `mat` is not `n x n`.
    pub fn basis_representation(&self, mat: &Tensor2<f64>) -> Result<Tensor1<f64>, SkewAlgebraError> {
        self.check_matrix_shape(mat.shape)?;
        let batch = mat.clone().reshape([1, self.n, self.n])?;
        let vectors = self.basis_representation_batch(&batch)?;
        Ok(vectors.reshape([self.dim()])?)
    }

    /// Batched form of [`Self::basis_representation`]: `[batch, n, n] -> [batch, dim]`.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if the trailing shape is not `[n, n]`.
    pub fn basis_representation_batch(
        &self,
        mats: &Tensor3<f64>,
    ) -> Result<Tensor2<f64>, SkewAlgebraError> {
        let [batch, rows, cols] = mats.shape;
        self.check_matrix_shape([rows, cols])?;

        let n = self.n;
        let data = mats
            .as_slice()
            .chunks(n * n)
            .flat_map(|m| self.pairs.iter().map(move |(i, j)| m[i * n + j]))
            .collect();
        Ok(Tensor2::from_shape_vec([batch, self.dim()], data)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{SkewAlgebraError, SkewSymmetricMatrices};
    use approx::assert_relative_eq;
    use skewlie_tensor::{Tensor1, Tensor2, Tensor3};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_matrix_representation_so3() -> TestResult {
        let so3 = SkewSymmetricMatrices::new(3)?;
        let v = Tensor1::from_shape_vec([3], vec![1.0, 2.0, 3.0])?;
        let m = so3.matrix_representation(&v)?;
        #[rustfmt::skip]
        let expected = [
             0.0,  1.0,  2.0,
            -1.0,  0.0,  3.0,
            -2.0, -3.0,  0.0,
        ];
        assert_eq!(m.shape, [3, 3]);
        assert_eq!(m.as_slice(), &expected);
        Ok(())
    }

    #[test]
    fn test_basis_representation_reads_upper_triangle() -> TestResult {
        let so3 = SkewSymmetricMatrices::new(3)?;
        // lower triangle is ignored
        let m = Tensor2::from_shape_vec([3, 3], vec![9.0, 4.0, 5.0, 0.0, 9.0, 6.0, 0.0, 0.0, 9.0])?;
        let v = so3.basis_representation(&m)?;
        assert_eq!(v.as_slice(), &[4.0, 5.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_roundtrip_batch() -> TestResult {
        let so5 = SkewSymmetricMatrices::new(5)?;
        let vectors = Tensor2::from_shape_fn([3, so5.dim()], |[b, k]| (b * 10 + k) as f64 - 7.5);
        let mats = so5.matrix_representation_batch(&vectors)?;
        assert_eq!(mats.shape, [3, 5, 5]);
        assert!(so5.belongs_batch(&mats).into_iter().all(|b| b));

        let back = so5.basis_representation_batch(&mats)?;
        assert_eq!(back.shape, vectors.shape);
        for (x, y) in back.iter().zip(vectors.iter()) {
            assert_relative_eq!(*x, *y);
        }
        Ok(())
    }

    #[test]
    fn test_basis_in_own_coordinates_is_identity() -> TestResult {
        let so4 = SkewSymmetricMatrices::new(4)?;
        let coords = so4.basis_representation_batch(so4.basis())?;
        assert_eq!(coords.shape, [6, 6]);
        for ([r, c], x) in (0..36).map(|o| [o / 6, o % 6]).zip(coords.iter()) {
            assert_eq!(*x, if r == c { 1.0 } else { 0.0 });
        }
        Ok(())
    }

    #[test]
    fn test_shape_mismatch() -> TestResult {
        let so3 = SkewSymmetricMatrices::new(3)?;
        let v = Tensor1::from_shape_vec([4], vec![0.0; 4])?;
        assert_eq!(
            so3.matrix_representation(&v).err(),
            Some(SkewAlgebraError::ShapeMismatch {
                expected: vec![3],
                actual: vec![4]
            })
        );

        let m = Tensor2::<f64>::zeros([2, 2]);
        assert_eq!(
            so3.basis_representation(&m).err(),
            Some(SkewAlgebraError::ShapeMismatch {
                expected: vec![3, 3],
                actual: vec![2, 2]
            })
        );

        let batch = Tensor3::<f64>::zeros([2, 3, 4]);
        assert!(so3.basis_representation_batch(&batch).is_err());
        Ok(())
    }
}
