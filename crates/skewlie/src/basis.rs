use skewlie_tensor::Tensor3;

/// Dimension `n(n-1)/2` of the algebra of `n x n` skew-symmetric matrices.
pub fn dimension(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Canonical enumeration of the index pairs `(i, j)`, `i < j`, of an `n x n` matrix.
///
/// Pairs are listed in row-major order: `i` ascending in the outer loop, `j` ascending in
/// the inner loop. Coordinate `k` of a vector, basis element `k` and the `k`-th pair of this
/// table always refer to the same matrix entry.
///
/// ```
/// use skewlie::IndexPairs;
///
/// let pairs = IndexPairs::new(3);
/// assert_eq!(pairs.as_slice(), &[(0, 1), (0, 2), (1, 2)]);
/// assert_eq!(pairs.index_of(2, 1), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPairs {
    n: usize,
    pairs: Vec<(usize, usize)>,
}

impl IndexPairs {
    /// Builds the table for `n x n` matrices.
    pub fn new(n: usize) -> Self {
        let pairs = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        Self { n, pairs }
    }

    /// Matrix size the table was built for.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of pairs, equal to the algebra dimension.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs as a slice, in canonical order.
    pub fn as_slice(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Iterator over the pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    /// Pair at coordinate `k`.
    pub fn get(&self, k: usize) -> Option<(usize, usize)> {
        self.pairs.get(k).copied()
    }

    /// Coordinate of the entry `(i, j)`, in either order.
    ///
    /// Returns `None` for diagonal entries and indices outside the matrix.
    pub fn index_of(&self, i: usize, j: usize) -> Option<usize> {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        if i == j || j >= self.n {
            return None;
        }
        // rows above i contribute (n - 1) + (n - 2) + ... + (n - i) pairs
        Some(i * self.n - i * (i + 1) / 2 + (j - i - 1))
    }
}

/// Stacks the elementary basis matrices into a `[dim, n, n]` tensor.
///
/// Element `k` has `+1` at `(i, j)` and `-1` at `(j, i)` for the `k`-th canonical pair.
pub(crate) fn build_basis(pairs: &IndexPairs) -> Tensor3<f64> {
    let n = pairs.n();
    Tensor3::from_shape_fn([pairs.len(), n, n], |[k, r, c]| {
        let (i, j) = pairs.as_slice()[k];
        if (r, c) == (i, j) {
            1.0
        } else if (r, c) == (j, i) {
            -1.0
        } else {
            0.0
        }
    })
}
