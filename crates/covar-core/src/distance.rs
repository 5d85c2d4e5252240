//! Pairwise distance primitives
//!
//! Squared distances use the expansion `||x||² + ||x'||² − 2·x·x'ᵀ` with one
//! matrix product per batch entry. Cancellation in that identity can leave
//! tiny negative values for near-identical points, so every result is clamped
//! to a strictly positive floor before any square root is taken. The clamp is
//! silent: it is part of the numerical contract, not an error. NaN inputs are
//! not clamped and propagate to the output. Self-covariance blocks are exactly
//! symmetric.

use crate::batch::{mirror_upper, pairwise};
use crate::inputs::CovarianceInputs;
use crate::numeric::KernelFloat;
use crate::params::Param;
use crate::Result;
use ndarray::{Array2, ArrayD, ArrayView2, Axis};

/// Pairwise squared Euclidean distances, shape `[..., N, N']`
///
/// With a lengthscale, each feature is divided by it first (automatic
/// relevance determination). Under self-covariance the diagonal is exactly
/// `floor`.
pub fn squared_distance<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    lengthscale: Option<&Param<T>>,
    floor: T,
) -> Result<ArrayD<T>> {
    let is_self = inputs.is_self_covariance();
    match lengthscale {
        None => pairwise(inputs, |a, b| squared_block(a, b, floor, is_self)),
        Some(ls) => {
            let layout = inputs.layout()?;
            ls.check_features("distance", "lengthscale", layout.n_features)?;
            let x = ls.divide_features(inputs.x());
            let x2 = if is_self {
                None
            } else {
                Some(ls.divide_features(inputs.x2()))
            };
            let scaled = match &x2 {
                Some(x2) => CovarianceInputs::cross(x.view(), x2.view()),
                None => CovarianceInputs::self_covariance(x.view()),
            };
            pairwise(&scaled, |a, b| squared_block(a, b, floor, is_self))
        }
    }
}

/// Pairwise Euclidean distances: the square root of [`squared_distance`]
pub fn absolute_distance<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    lengthscale: Option<&Param<T>>,
    floor: T,
) -> Result<ArrayD<T>> {
    let mut d = squared_distance(inputs, lengthscale, floor)?;
    d.mapv_inplace(T::sqrt);
    Ok(d)
}

fn squared_block<T: KernelFloat>(
    a: ArrayView2<'_, T>,
    b: ArrayView2<'_, T>,
    floor: T,
    is_self: bool,
) -> Array2<T> {
    let two = T::constant(2.0);
    let norms_a = row_norms(&a);
    let norms_b = if is_self { norms_a.clone() } else { row_norms(&b) };

    let mut d2 = a.dot(&b.t());
    d2.mapv_inplace(|v| -two * v);
    d2 += &norms_a.insert_axis(Axis(1));
    d2 += &norms_b.insert_axis(Axis(0));
    // NaN fails the comparison and passes through unclamped
    d2.mapv_inplace(|v| if v < floor { floor } else { v });

    if is_self {
        mirror_upper(&mut d2);
        d2.diag_mut().fill(floor);
    }
    d2
}

fn row_norms<T: KernelFloat>(x: &ArrayView2<'_, T>) -> ndarray::Array1<T> {
    x.map_axis(Axis(1), |row| row.dot(&row))
}
