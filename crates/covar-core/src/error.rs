//! Error types for covariance evaluation
//!
//! Provides a unified error type for all covar crates. Numeric degeneracy
//! (near-zero or negative squared distances) is not an error: it is clamped
//! inside the distance primitives and never reaches this type.

use thiserror::Error;

/// Core error type for kernel construction and evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An active-dimension index is out of range, or the set is empty or repeats an index
    #[error("Invalid active dimensions: {0}")]
    InvalidActiveDimensions(String),

    /// Input batches disagree on feature count, rank, or leading batch dimensions
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A parameter's length does not match what the kernel requires
    #[error("Parameter shape mismatch: `{parameter}` of {kernel} expects {expected} value(s), got {actual}")]
    ParameterShapeMismatch {
        kernel: &'static str,
        parameter: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Configuration value outside its domain
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an active-dimension index beyond the feature count
    pub fn dimension_out_of_range(index: usize, n_features: usize) -> Self {
        Self::InvalidActiveDimensions(format!(
            "index {index} is out of range for input with {n_features} feature(s)"
        ))
    }

    /// Create an error for two batches with different feature counts
    pub fn feature_mismatch(d1: usize, d2: usize) -> Self {
        Self::ShapeMismatch(format!(
            "input batches have {d1} and {d2} features"
        ))
    }

    /// Create an error for leading batch dimensions that cannot broadcast
    pub fn incompatible_batches(a: &[usize], b: &[usize]) -> Self {
        Self::ShapeMismatch(format!(
            "leading batch dimensions {a:?} and {b:?} cannot be broadcast"
        ))
    }

    /// Create an error for a parameter tensor of rank above one
    pub fn parameter_rank(ndim: usize) -> Self {
        Self::ParameterShapeMismatch {
            kernel: "tensor",
            parameter: "rank",
            expected: 1,
            actual: ndim,
        }
    }

    /// Create an error for an input of rank below two
    pub fn rank_too_low(shape: &[usize]) -> Self {
        Self::ShapeMismatch(format!(
            "input batch must have shape [..., N, D], got {shape:?}"
        ))
    }
}
