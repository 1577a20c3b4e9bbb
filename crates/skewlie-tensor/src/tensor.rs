use num_traits::Zero;
use thiserror::Error;

/// Error type for tensor operations.
///
/// Covers failures during tensor creation, indexing and reshaping.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements exactly.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Index exceeds tensor bounds.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The size of the dimension being indexed
        size: usize,
    },

    /// Tensor dimensions incompatible for the requested operation.
    ///
    /// # Examples
    /// - Element-wise operations on different-shaped tensors
    /// - Reshaping into a shape with a different number of elements
    #[error("Dimension mismatch: {message}. Expected shape: {expected}, got: {actual}")]
    DimensionMismatch {
        /// Human-readable description of the mismatch
        message: String,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },
}

impl TensorError {
    /// Creates an InvalidShape error.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates an IndexOutOfBounds error.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Creates a DimensionMismatch error with formatted shapes.
    pub fn dimension_mismatch(
        message: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// The rightmost dimension has stride 1, and each dimension's stride is the
/// product of all dimensions to its right.
///
/// # Examples
///
/// ```rust
/// use skewlie_tensor::tensor::get_strides_from_shape;
///
/// let strides = get_strides_from_shape([2, 3, 4]);
/// assert_eq!(strides, [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A multi-dimensional array with owned, contiguous, row-major data.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions, checked at compile time
///
/// A batch of matrices is a `Tensor<T, 3>` whose leading axis is the batch axis.
///
/// # Examples
///
/// ```rust
/// use skewlie_tensor::Tensor2;
///
/// let t = Tensor2::<f64>::from_shape_vec([2, 2], vec![0.0, -1.0, 1.0, 0.0]).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// assert_eq!(t.get([1, 0]), Some(&1.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T, const N: usize> {
    pub(crate) data: Vec<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` with the given shape and slice of data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    pub fn from_shape_slice(shape: [usize; N], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Creates a new `Tensor` with the given shape filled with `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use skewlie_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_val([2, 2], 1);
    /// assert_eq!(t.as_slice(), vec![1, 1, 1, 1]);
    /// ```
    pub fn from_shape_val(shape: [usize; N], value: T) -> Self
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self {
            data: vec![value; numel],
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Creates a new `Tensor` with the given shape and a function to generate the data.
    ///
    /// The function `f` is called with the index of the element to generate, in row-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use skewlie_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_fn([2, 2], |[i, j]| (i * 2 + j) as u8);
    /// assert_eq!(t.as_slice(), vec![0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], f: F) -> Self
    where
        F: Fn([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let data: Vec<T> = (0..numel)
            .map(|i| {
                let mut index = [0; N];
                let mut j = i;
                for k in (0..N).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index)
            })
            .collect();
        Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Creates a new `Tensor` filled with zeros.
    pub fn zeros(shape: [usize; N]) -> Self
    where
        T: Zero + Clone,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns the tensor data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the tensor data as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the tensor and returns its data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns an iterator over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Get the offset of the element at the given index, or `None` if out of bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the index of the element at the given offset.
    ///
    /// # Errors
    ///
    /// If the offset is out of bounds, an error is returned.
    pub fn get_index(&self, offset: usize) -> Result<[usize; N], TensorError> {
        if offset >= self.numel() {
            return Err(TensorError::index_out_of_bounds(offset, self.numel()));
        }
        let mut index = [0; N];
        let mut rem = offset;
        for (dim_index, stride) in index.iter_mut().zip(self.strides) {
            *dim_index = rem / stride;
            rem %= stride;
        }
        Ok(index)
    }

    /// Get the element at the given index.
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index).map(|offset| &self.data[offset])
    }

    /// Get a mutable reference to the element at the given index.
    pub fn get_mut(&mut self, index: [usize; N]) -> Option<&mut T> {
        self.get_iter_offset(index)
            .map(move |offset| &mut self.data[offset])
    }

    /// Reinterpret the tensor with a new shape of possibly different rank.
    ///
    /// The data is moved, not copied.
    ///
    /// # Errors
    ///
    /// If the number of elements in the new shape differs from the current one, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use skewlie_tensor::Tensor1;
    ///
    /// let t = Tensor1::<u8>::from_shape_vec([4], vec![1, 2, 3, 4]).unwrap();
    /// let t = t.reshape([1, 2, 2]).unwrap();
    /// assert_eq!(t.shape, [1, 2, 2]);
    /// assert_eq!(t.strides, [4, 2, 1]);
    /// ```
    pub fn reshape<const M: usize>(self, shape: [usize; M]) -> Result<Tensor<T, M>, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != self.numel() {
            return Err(TensorError::dimension_mismatch(
                "Cannot reshape tensor",
                &shape,
                &self.shape,
            ));
        }
        Ok(Tensor {
            data: self.data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Apply a function to each element of the tensor.
    pub fn map<U, F>(&self, f: F) -> Tensor<U, N>
    where
        F: Fn(&T) -> U,
    {
        Tensor {
            data: self.data.iter().map(f).collect(),
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Perform an element-wise operation on two tensors of identical shape.
    ///
    /// # Errors
    ///
    /// If the shapes differ, a [`TensorError::DimensionMismatch`] is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use skewlie_tensor::Tensor1;
    ///
    /// let t1 = Tensor1::<i32>::from_shape_vec([4], vec![1, 2, 3, 4]).unwrap();
    /// let t2 = Tensor1::<i32>::from_shape_vec([4], vec![1, 2, 3, 4]).unwrap();
    ///
    /// let t3 = t1.element_wise_op(&t2, |a, b| *a + *b).unwrap();
    /// assert_eq!(t3.as_slice(), vec![2, 4, 6, 8]);
    /// ```
    pub fn element_wise_op<F>(&self, other: &Tensor<T, N>, op: F) -> Result<Tensor<T, N>, TensorError>
    where
        F: Fn(&T, &T) -> T,
    {
        if self.shape != other.shape {
            return Err(TensorError::dimension_mismatch(
                "Element-wise operations require identical shapes",
                &self.shape,
                &other.shape,
            ));
        }

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| op(a, b))
            .collect();

        Ok(Tensor {
            data,
            shape: self.shape,
            strides: self.strides,
        })
    }
}

impl<T, const N: usize> std::fmt::Display for Tensor<T, N>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .data
            .iter()
            .map(|v| format!("{v:.4}").len())
            .max()
            .unwrap_or(0);

        // the last axis is printed as a row, everything above it as stacked rows
        let row_len = if N == 0 { 1 } else { self.shape[N - 1].max(1) };
        writeln!(f, "Tensor {:?}", self.shape)?;
        for row in self.data.chunks(row_len) {
            write!(f, "[")?;
            for (i, v) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:>width$}", format!("{v:.4}"))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_1d() -> Result<(), TensorError> {
        let t = Tensor::<u8, 1>::from_shape_vec([1], vec![2])?;
        assert_eq!(t.shape, [1]);
        assert_eq!(t.as_slice(), vec![2]);
        assert_eq!(t.strides, [1]);
        assert_eq!(t.numel(), 1);
        Ok(())
    }

    #[test]
    fn constructor_rejects_bad_length() {
        let res = Tensor::<f64, 2>::from_shape_vec([2, 3], vec![0.0; 5]);
        assert_eq!(res, Err(TensorError::invalid_shape(6, 5)));
    }

    #[test]
    fn from_shape_fn_3d() {
        let t = Tensor::<usize, 3>::from_shape_fn([2, 2, 3], |[b, i, j]| b * 100 + i * 10 + j);
        assert_eq!(t.strides, [6, 3, 1]);
        assert_eq!(t.get([1, 0, 2]), Some(&102));
        assert_eq!(t.get([0, 1, 1]), Some(&11));
        assert_eq!(t.get([2, 0, 0]), None);
    }

    #[test]
    fn get_index_roundtrip() -> Result<(), TensorError> {
        let t = Tensor::<u8, 3>::zeros([2, 3, 4]);
        for offset in 0..t.numel() {
            let index = t.get_index(offset)?;
            assert_eq!(t.get_iter_offset(index), Some(offset));
        }
        assert!(t.get_index(24).is_err());
        Ok(())
    }

    #[test]
    fn get_mut_writes_through() {
        let mut t = Tensor::<f64, 2>::zeros([2, 2]);
        if let Some(v) = t.get_mut([0, 1]) {
            *v = 3.0;
        }
        assert_eq!(t.as_slice(), &[0.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn reshape_changes_rank() -> Result<(), TensorError> {
        let t = Tensor::<u8, 2>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6])?;
        let t = t.reshape([1, 3, 2])?;
        assert_eq!(t.shape, [1, 3, 2]);
        assert_eq!(t.get([0, 2, 1]), Some(&6));

        let err = t.reshape([4]);
        assert!(matches!(err, Err(TensorError::DimensionMismatch { .. })));
        Ok(())
    }

    #[test]
    fn element_wise_shape_mismatch() {
        let a = Tensor::<f64, 2>::zeros([2, 2]);
        let b = Tensor::<f64, 2>::zeros([2, 3]);
        assert!(a.element_wise_op(&b, |x, y| x + y).is_err());
    }

    #[test]
    fn map_preserves_shape() {
        let t = Tensor::<f64, 2>::from_shape_val([2, 3], 2.0);
        let t2 = t.map(|x| x * 0.5);
        assert_eq!(t2.shape, [2, 3]);
        assert!(t2.iter().all(|&x| x == 1.0));
    }

    #[test]
    fn display_prints_rows() -> Result<(), TensorError> {
        let t = Tensor::<f64, 2>::from_shape_vec([2, 2], vec![0.0, -1.0, 1.0, 0.0])?;
        let s = format!("{t}");
        assert!(s.starts_with("Tensor [2, 2]"));
        assert_eq!(s.lines().count(), 3);
        Ok(())
    }
}
