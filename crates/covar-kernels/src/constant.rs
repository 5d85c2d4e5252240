//! Shape-only kernels: bias and white noise
//!
//! Neither formula reads input values. White noise is the one place where the
//! self-covariance token changes the result rather than only the cost.

use covar_core::batch::from_positions;
use covar_core::{CovarianceInputs, KernelFloat, Result};
use ndarray::{ArrayD, IxDyn};

/// Constant `σ²` over the whole `[..., N, N']` output
pub fn bias<T: KernelFloat>(inputs: &CovarianceInputs<'_, T>, variance: T) -> Result<ArrayD<T>> {
    let layout = inputs.layout()?;
    Ok(ArrayD::from_elem(IxDyn(&layout.output_shape()), variance))
}

/// `σ²` on the diagonal under self-covariance; all zeros for a cross pair
pub fn white<T: KernelFloat>(inputs: &CovarianceInputs<'_, T>, variance: T) -> Result<ArrayD<T>> {
    let layout = inputs.layout()?;
    if inputs.is_self_covariance() {
        Ok(from_positions(&layout, |i, j| {
            if i == j {
                variance
            } else {
                T::zero()
            }
        }))
    } else {
        Ok(ArrayD::zeros(IxDyn(&layout.output_shape())))
    }
}
