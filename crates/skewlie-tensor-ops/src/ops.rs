use num_traits::Float;
use rand::{distr::uniform::SampleUniform, Rng};
use skewlie_tensor::{Tensor, Tensor3};

use crate::error::TensorOpsError;

fn check_same_shape<T, const N: usize>(
    a: &Tensor<T, N>,
    b: &Tensor<T, N>,
) -> Result<(), TensorOpsError> {
    if a.shape != b.shape {
        return Err(TensorOpsError::ShapeMismatch(
            a.shape.to_vec(),
            b.shape.to_vec(),
        ));
    }
    Ok(())
}

/// Element-wise sum of two tensors with identical shape.
///
/// # Errors
///
/// If the shapes of the tensors don't match, an error is returned.
///
/// # Example
///
/// ```
/// use skewlie_tensor::Tensor1;
/// use skewlie_tensor_ops::ops::add;
///
/// let a = Tensor1::<f64>::from_shape_slice([3], &[1.0, 2.0, 3.0]).unwrap();
/// let b = Tensor1::<f64>::from_shape_slice([3], &[4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(add(&a, &b).unwrap().as_slice(), &[5.0, 7.0, 9.0]);
/// ```
pub fn add<T, const N: usize>(
    a: &Tensor<T, N>,
    b: &Tensor<T, N>,
) -> Result<Tensor<T, N>, TensorOpsError>
where
    T: Float,
{
    check_same_shape(a, b)?;
    Ok(a.element_wise_op(b, |&x, &y| x + y)?)
}

/// Element-wise difference `a - b` of two tensors with identical shape.
///
/// # Errors
///
/// If the shapes of the tensors don't match, an error is returned.
pub fn sub<T, const N: usize>(
    a: &Tensor<T, N>,
    b: &Tensor<T, N>,
) -> Result<Tensor<T, N>, TensorOpsError>
where
    T: Float,
{
    check_same_shape(a, b)?;
    Ok(a.element_wise_op(b, |&x, &y| x - y)?)
}

/// Multiply every element of the tensor by a scalar.
pub fn mul_scalar<T, const N: usize>(tensor: &Tensor<T, N>, n: T) -> Tensor<T, N>
where
    T: Float,
{
    tensor.map(|&x| x * n)
}

/// Batched matrix product.
///
/// Multiplies `a[k]` by `b[k]` for every index `k` of the leading batch axis.
///
/// # Arguments
///
/// * `a` - Tensor of shape `[batch, rows, inner]`.
/// * `b` - Tensor of shape `[batch, inner, cols]`.
///
/// # Returns
///
/// A tensor of shape `[batch, rows, cols]`.
///
/// # Errors
///
/// If the batch sizes or the inner dimensions differ, an error is returned.
///
/// # Example
///
/// ```
/// use skewlie_tensor::Tensor3;
/// use skewlie_tensor_ops::ops::matmul;
///
/// let a = Tensor3::<f64>::from_shape_vec([1, 2, 2], vec![0.0, -1.0, 1.0, 0.0]).unwrap();
/// let aa = matmul(&a, &a).unwrap();
/// assert_eq!(aa.as_slice(), &[-1.0, 0.0, 0.0, -1.0]);
/// ```
pub fn matmul<T>(a: &Tensor3<T>, b: &Tensor3<T>) -> Result<Tensor3<T>, TensorOpsError>
where
    T: Float,
{
    let [batch, rows, inner] = a.shape;
    let [batch_b, inner_b, cols] = b.shape;
    if batch != batch_b || inner != inner_b {
        return Err(TensorOpsError::ShapeMismatch(
            a.shape.to_vec(),
            b.shape.to_vec(),
        ));
    }

    let lhs = a.as_slice();
    let rhs = b.as_slice();
    let mut out = vec![T::zero(); batch * rows * cols];

    for k in 0..batch {
        let lhs_k = &lhs[k * rows * inner..(k + 1) * rows * inner];
        let rhs_k = &rhs[k * inner * cols..(k + 1) * inner * cols];
        let out_k = &mut out[k * rows * cols..(k + 1) * rows * cols];
        for i in 0..rows {
            for p in 0..inner {
                let lhs_ip = lhs_k[i * inner + p];
                if lhs_ip.is_zero() {
                    continue;
                }
                for j in 0..cols {
                    out_k[i * cols + j] = out_k[i * cols + j] + lhs_ip * rhs_k[p * cols + j];
                }
            }
        }
    }

    Ok(Tensor3::from_shape_vec([batch, rows, cols], out)?)
}

/// Swap the last two axes of a batch of matrices.
///
/// # Example
///
/// ```
/// use skewlie_tensor::Tensor3;
/// use skewlie_tensor_ops::ops::transpose;
///
/// let a = Tensor3::<f64>::from_shape_vec([1, 2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let at = transpose(&a);
/// assert_eq!(at.shape, [1, 3, 2]);
/// assert_eq!(at.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
pub fn transpose<T>(a: &Tensor3<T>) -> Tensor3<T>
where
    T: Copy,
{
    let [batch, rows, cols] = a.shape;
    Tensor3::from_shape_fn([batch, cols, rows], |[k, i, j]| {
        a.as_slice()[k * rows * cols + j * cols + i]
    })
}

/// Batched all-reduce of `|a - b| <= atol`.
///
/// # Returns
///
/// One boolean per element of the leading batch axis, `true` when every entry of `a[k]`
/// is within `atol` of the corresponding entry of `b[k]`.
///
/// # Errors
///
/// If the shapes of the tensors don't match, an error is returned.
pub fn all_close<T>(a: &Tensor3<T>, b: &Tensor3<T>, atol: T) -> Result<Vec<bool>, TensorOpsError>
where
    T: Float,
{
    check_same_shape(a, b)?;
    let [batch, rows, cols] = a.shape;
    let per_item = rows * cols;

    if per_item == 0 {
        return Ok(vec![true; batch]);
    }

    Ok(a.as_slice()
        .chunks(per_item)
        .zip(b.as_slice().chunks(per_item))
        .map(|(xs, ys)| xs.iter().zip(ys).all(|(&x, &y)| (x - y).abs() <= atol))
        .collect())
}

/// Fill a tensor with independent samples drawn uniformly from `[low, high)`.
///
/// # Errors
///
/// If the interval is empty or one of its bounds is not finite, an error is returned.
///
/// # Example
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use skewlie_tensor_ops::ops::random_uniform;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let t = random_uniform::<f64, 2, _>([2, 3], -1.0, 1.0, &mut rng).unwrap();
/// assert!(t.iter().all(|&x| (-1.0..1.0).contains(&x)));
/// ```
pub fn random_uniform<T, const N: usize, R>(
    shape: [usize; N],
    low: T,
    high: T,
    rng: &mut R,
) -> Result<Tensor<T, N>, TensorOpsError>
where
    T: Float + SampleUniform,
    R: Rng + ?Sized,
{
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(TensorOpsError::InvalidRange {
            low: low.to_f64().unwrap_or(f64::NAN),
            high: high.to_f64().unwrap_or(f64::NAN),
        });
    }

    let numel = shape.iter().product::<usize>();
    let data = (0..numel).map(|_| rng.random_range(low..high)).collect();
    Ok(Tensor::from_shape_vec(shape, data)?)
}
