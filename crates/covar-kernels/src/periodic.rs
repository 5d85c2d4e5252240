//! Periodic kernel
//!
//! Unlike the rest of the stationary family this formula measures the
//! unscaled distance over every input feature; active dimensions are not
//! applied, and the lengthscale divides the sine term instead of the inputs.

use covar_core::{absolute_distance, CovarianceInputs, KernelFloat, Result};
use ndarray::ArrayD;

/// `σ²·exp(−0.5·(sin(π·d/period)/ℓ)²)`
pub fn periodic<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variance: T,
    lengthscale: T,
    period: T,
    floor: T,
) -> Result<ArrayD<T>> {
    let half = T::constant(0.5);
    let pi = T::constant(std::f64::consts::PI);
    let mut k = absolute_distance(inputs, None, floor)?;
    k.mapv_inplace(|d| {
        let s = (pi * d / period).sin() / lengthscale;
        variance * (-half * s * s).exp()
    });
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    const FLOOR: f64 = 1e-40;

    #[test]
    fn test_full_period_returns_variance() {
        let x = array![[0.0], [2.0], [0.5]].into_dyn();
        let k = periodic(&CovarianceInputs::self_covariance(x.view()), 1.5, 1.0, 2.0, FLOOR)
            .unwrap();
        assert_relative_eq!(k[[0, 1]], 1.5, epsilon = 1e-12);
        // quarter period: sin(π/4)² = 0.5
        assert_relative_eq!(k[[0, 2]], 1.5 * (-0.25f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(k[[2, 0]], k[[0, 2]]);
    }

    #[test]
    fn test_uses_euclidean_distance_over_all_features() {
        let x = array![[0.0, 0.0]].into_dyn();
        let x2 = array![[3.0, 4.0]].into_dyn();
        // d = 5, period 10: sin(π/2) = 1
        let k = periodic(&CovarianceInputs::cross(x.view(), x2.view()), 1.0, 2.0, 10.0, FLOOR)
            .unwrap();
        assert_relative_eq!(k[[0, 0]], (-0.125f64).exp(), epsilon = 1e-12);
    }
}
