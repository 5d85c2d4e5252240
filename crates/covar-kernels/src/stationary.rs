//! Stationary kernels
//!
//! Every formula here is a function of the lengthscale-rescaled distance
//! between two points. The callers pass inputs that are already restricted to
//! the kernel's active dimensions; distances are floored by the primitives
//! before any square root, so `d` is always finite and strictly positive.

use covar_core::{absolute_distance, squared_distance, CovarianceInputs, KernelFloat, Param, Result};
use ndarray::ArrayD;

/// `σ²·exp(−d²/2)`
pub fn rbf<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variance: T,
    lengthscale: &Param<T>,
    floor: T,
) -> Result<ArrayD<T>> {
    let half = T::constant(0.5);
    let mut k = squared_distance(inputs, Some(lengthscale), floor)?;
    k.mapv_inplace(|d2| variance * (-half * d2).exp());
    Ok(k)
}

/// `σ²·(1 + d²/(2α))^(−α)`
pub fn rational_quadratic<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variance: T,
    lengthscale: &Param<T>,
    alpha: T,
    floor: T,
) -> Result<ArrayD<T>> {
    let two_alpha = T::constant(2.0) * alpha;
    let mut k = squared_distance(inputs, Some(lengthscale), floor)?;
    k.mapv_inplace(|d2| variance * (T::one() + d2 / two_alpha).powf(-alpha));
    Ok(k)
}

/// `σ²·exp(−d/2)`
pub fn exponential<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variance: T,
    lengthscale: &Param<T>,
    floor: T,
) -> Result<ArrayD<T>> {
    let half = T::constant(0.5);
    let mut k = absolute_distance(inputs, Some(lengthscale), floor)?;
    k.mapv_inplace(|d| variance * (-half * d).exp());
    Ok(k)
}

/// `σ²·exp(−d)`
pub fn matern12<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variance: T,
    lengthscale: &Param<T>,
    floor: T,
) -> Result<ArrayD<T>> {
    let mut k = absolute_distance(inputs, Some(lengthscale), floor)?;
    k.mapv_inplace(|d| variance * (-d).exp());
    Ok(k)
}

/// `σ²·(1 + √3·d)·exp(−√3·d)`
pub fn matern32<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variance: T,
    lengthscale: &Param<T>,
    floor: T,
) -> Result<ArrayD<T>> {
    let sqrt3 = T::constant(3.0).sqrt();
    let mut k = absolute_distance(inputs, Some(lengthscale), floor)?;
    k.mapv_inplace(|d| {
        let r = sqrt3 * d;
        variance * (T::one() + r) * (-r).exp()
    });
    Ok(k)
}

/// `σ²·(1 + √5·d + 5d²/3)·exp(−√5·d)`
pub fn matern52<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variance: T,
    lengthscale: &Param<T>,
    floor: T,
) -> Result<ArrayD<T>> {
    let sqrt5 = T::constant(5.0).sqrt();
    let five_thirds = T::constant(5.0 / 3.0);
    let mut k = squared_distance(inputs, Some(lengthscale), floor)?;
    k.mapv_inplace(|d2| {
        let r = sqrt5 * d2.sqrt();
        variance * (T::one() + r + five_thirds * d2) * (-r).exp()
    });
    Ok(k)
}

/// `σ²·cos(d)`
pub fn cosine<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variance: T,
    lengthscale: &Param<T>,
    floor: T,
) -> Result<ArrayD<T>> {
    let mut k = absolute_distance(inputs, Some(lengthscale), floor)?;
    k.mapv_inplace(|d| variance * d.cos());
    Ok(k)
}
