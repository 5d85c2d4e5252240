//! Validity checks for covariance tensors
//!
//! Every square `[N, N]` block of a covariance must be symmetric and
//! positive semi-definite. These helpers measure both, per batch entry, in
//! double precision via `nalgebra`'s symmetric eigendecomposition.

use crate::numeric::KernelFloat;
use crate::{Error, Result};
use nalgebra::DMatrix;
use ndarray::{ArrayView2, ArrayViewD, Axis};

/// Symmetry and definiteness of one covariance matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CovarianceReport {
    /// Largest `|C[i, j] - C[j, i]|`
    pub max_asymmetry: f64,
    /// Smallest eigenvalue of the symmetrised matrix
    pub min_eigenvalue: f64,
    /// Largest eigenvalue of the symmetrised matrix
    pub max_eigenvalue: f64,
}

impl CovarianceReport {
    /// PSD up to a tolerance relative to the spectrum's scale
    pub fn is_psd(&self, tolerance: f64) -> bool {
        let scale = self.max_eigenvalue.abs().max(1.0);
        self.min_eigenvalue >= -tolerance * scale
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.max_asymmetry <= tolerance
    }
}

/// Check every `[N, N]` block of a (batched) covariance
///
/// Returns one report per batch entry, in row-major order of the leading
/// dimensions.
pub fn check_covariance<T: KernelFloat>(
    covariance: &ArrayViewD<'_, T>,
) -> Result<Vec<CovarianceReport>> {
    let shape = covariance.shape();
    let (n, n2) = match shape {
        [.., n, n2] => (*n, *n2),
        _ => return Err(Error::rank_too_low(shape)),
    };
    if n != n2 {
        return Err(Error::ShapeMismatch(format!(
            "covariance blocks must be square, got [{n}, {n2}]"
        )));
    }

    let batch: usize = shape[..shape.len() - 2].iter().product();
    let folded = covariance
        .to_shape((batch, n, n))
        .map_err(|e| Error::ShapeMismatch(format!("cannot fold covariance: {e}")))?;

    Ok(folded
        .axis_iter(Axis(0))
        .map(|block| report_block(&block))
        .collect())
}

/// Largest asymmetry of a single square matrix
pub fn max_asymmetry<T: KernelFloat>(matrix: &ArrayView2<'_, T>) -> f64 {
    let n = matrix.nrows().min(matrix.ncols());
    let mut worst = 0.0f64;
    for i in 0..n {
        for j in (i + 1)..n {
            worst = worst.max((matrix[[i, j]].widen() - matrix[[j, i]].widen()).abs());
        }
    }
    worst
}

/// Smallest eigenvalue of the symmetric part of a square matrix
pub fn min_eigenvalue<T: KernelFloat>(matrix: &ArrayView2<'_, T>) -> Result<f64> {
    if matrix.nrows() != matrix.ncols() {
        return Err(Error::ShapeMismatch(format!(
            "matrix must be square, got [{}, {}]",
            matrix.nrows(),
            matrix.ncols()
        )));
    }
    Ok(report_block(matrix).min_eigenvalue)
}

fn report_block<T: KernelFloat>(block: &ArrayView2<'_, T>) -> CovarianceReport {
    let n = block.nrows();
    if n == 0 {
        return CovarianceReport {
            max_asymmetry: 0.0,
            min_eigenvalue: 0.0,
            max_eigenvalue: 0.0,
        };
    }
    let sym = DMatrix::<f64>::from_fn(n, n, |i, j| {
        0.5 * (block[[i, j]].widen() + block[[j, i]].widen())
    });
    let eigenvalues = sym.symmetric_eigenvalues();
    let (min, max) = eigenvalues
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    CovarianceReport {
        max_asymmetry: max_asymmetry(block),
        min_eigenvalue: min,
        max_eigenvalue: max,
    }
}
