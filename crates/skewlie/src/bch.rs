use skewlie_tensor::{Tensor2, Tensor3};
use skewlie_tensor_ops::Backend;

use crate::{
    error::SkewAlgebraError,
    skew::{check_bracket_shapes, lift, unlift, SkewSymmetricMatrices},
};

/// Truncation order of the Baker-Campbell-Hausdorff series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BchOrder {
    /// `A + B`
    First = 1,
    /// adds `[A, B] / 2`
    Second = 2,
    /// adds `[A, [A, B]] / 12 - [B, [A, B]] / 12`
    Third = 3,
    /// adds `-[B, [A, [A, B]]] / 24`
    Fourth = 4,
}

impl TryFrom<usize> for BchOrder {
    type Error = SkewAlgebraError;

    fn try_from(order: usize) -> Result<Self, Self::Error> {
        match order {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            _ => Err(SkewAlgebraError::UnsupportedOrder(order)),
        }
    }
}

impl From<BchOrder> for usize {
    fn from(order: BchOrder) -> Self {
        order as usize
    }
}

impl<B: Backend> SkewSymmetricMatrices<B> {
    /// Truncated Baker-Campbell-Hausdorff series approximating `log(exp(A) exp(B))`.
    ///
    /// # Arguments
    ///
    /// * `a` - First tangent vector, as an `n x n` matrix.
    /// * `b` - Second tangent vector, as an `n x n` matrix.
    /// * `order` - Truncation order, one of 1, 2, 3 or 4.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::UnsupportedOrder`] for any other order, and
    /// [`SkewAlgebraError::ShapeMismatch`] if the inputs are not square matrices of equal size.
    ///
    /// # Example
    ///
    /// ```
    /// use skewlie::SkewSymmetricMatrices;
    ///
    /// let so3 = SkewSymmetricMatrices::new(3).unwrap();
    /// let a = so3.basis_element(0).unwrap();
    /// let b = so3.basis_element(1).unwrap();
    /// let c = so3.baker_campbell_hausdorff(&a, &b, 4).unwrap();
    /// assert!(so3.belongs(&c));
    /// assert!(so3.baker_campbell_hausdorff(&a, &b, 5).is_err());
    /// ```
    pub fn baker_campbell_hausdorff(
        &self,
        a: &Tensor2<f64>,
        b: &Tensor2<f64>,
        order: usize,
    ) -> Result<Tensor2<f64>, SkewAlgebraError> {
        let order = BchOrder::try_from(order)?;
        unlift(self.bch_batch_with_order(&lift(a)?, &lift(b)?, order)?)
    }

    /// Batched form of [`Self::baker_campbell_hausdorff`], pairing `a[k]` with `b[k]`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::baker_campbell_hausdorff`].
    pub fn baker_campbell_hausdorff_batch(
        &self,
        a: &Tensor3<f64>,
        b: &Tensor3<f64>,
        order: usize,
    ) -> Result<Tensor3<f64>, SkewAlgebraError> {
        self.bch_batch_with_order(a, b, BchOrder::try_from(order)?)
    }

    /// Batched BCH series truncated at `order`.
    ///
    /// Each order adds its own terms to the partial sum of the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SkewAlgebraError::ShapeMismatch`] if the inputs are not square matrices of equal size.
    pub fn bch_batch_with_order(
        &self,
        a: &Tensor3<f64>,
        b: &Tensor3<f64>,
        order: BchOrder,
    ) -> Result<Tensor3<f64>, SkewAlgebraError> {
        log::trace!("bch order {:?} on batch of {}", order, a.shape[0]);
        let backend = &self.backend;
        check_bracket_shapes(a, b)?;

        let mut result = backend.add(a, b)?;
        if order == BchOrder::First {
            return Ok(result);
        }

        let ab = self.bracket_batch(a, b)?;
        result = backend.add(&result, &backend.scale(&ab, 1.0 / 2.0))?;
        if order == BchOrder::Second {
            return Ok(result);
        }

        let a_ab = self.bracket_batch(a, &ab)?;
        let b_ab = self.bracket_batch(b, &ab)?;
        result = backend.add(&result, &backend.scale(&a_ab, 1.0 / 12.0))?;
        result = backend.sub(&result, &backend.scale(&b_ab, 1.0 / 12.0))?;
        if order == BchOrder::Third {
            return Ok(result);
        }

        let b_a_ab = self.bracket_batch(b, &a_ab)?;
        result = backend.sub(&result, &backend.scale(&b_a_ab, 1.0 / 24.0))?;
        Ok(result)
    }
}
