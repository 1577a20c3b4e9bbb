use crate::error::SkewAlgebraError;

/// Default absolute tolerance of the membership test.
pub const DEFAULT_ATOL: f64 = 1e-12;

/// Default half-width of the uniform sampling interval.
pub const DEFAULT_SAMPLE_BOUND: f64 = 1.0;

/// Numerical parameters of a [`crate::SkewSymmetricMatrices`] instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkewConfig {
    /// Absolute tolerance used by `belongs`: a matrix is accepted when every entry of
    /// `M + Mᵀ` has magnitude at most `atol`.
    pub atol: f64,
    /// Coordinates of random points are drawn uniformly from `[-sample_bound, sample_bound)`.
    pub sample_bound: f64,
}

impl Default for SkewConfig {
    fn default() -> Self {
        Self {
            atol: DEFAULT_ATOL,
            sample_bound: DEFAULT_SAMPLE_BOUND,
        }
    }
}

impl SkewConfig {
    /// Returns a copy with the given membership tolerance.
    pub fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// Returns a copy with the given sampling bound.
    pub fn with_sample_bound(mut self, sample_bound: f64) -> Self {
        self.sample_bound = sample_bound;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SkewAlgebraError> {
        if !(self.atol.is_finite() && self.atol >= 0.0) {
            return Err(SkewAlgebraError::InvalidTolerance(self.atol));
        }
        if !(self.sample_bound.is_finite() && self.sample_bound > 0.0) {
            return Err(SkewAlgebraError::InvalidBound(self.sample_bound));
        }
        Ok(())
    }
}
