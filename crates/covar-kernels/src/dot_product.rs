//! Linear and polynomial kernels
//!
//! Both are built on the diagonally weighted inner product `(X·Λ)·X'ᵀ`. Λ is a
//! scalar or one weight per active feature; inputs are not centred.

use covar_core::batch::{mirror_upper, pairwise};
use covar_core::{CovarianceInputs, KernelFloat, Param, Result};
use ndarray::ArrayD;

/// `(X·Λ)·X'ᵀ`
pub fn linear<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variances: &Param<T>,
) -> Result<ArrayD<T>> {
    variances.check_features("linear", "variances", inputs.layout()?.n_features)?;
    let lambda = variances.to_array();
    let is_self = inputs.is_self_covariance();
    pairwise(inputs, |a, b| {
        let mut k = (&a * &lambda).dot(&b.t());
        if is_self {
            mirror_upper(&mut k);
        }
        k
    })
}

/// `((X·Λ)·X'ᵀ + offset)^degree`
pub fn polynomial<T: KernelFloat>(
    inputs: &CovarianceInputs<'_, T>,
    variances: &Param<T>,
    offset: T,
    degree: T,
) -> Result<ArrayD<T>> {
    let mut k = linear(inputs, variances)?;
    k.mapv_inplace(|v| (v + offset).powf(degree));
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_linear_scalar_points() {
        let x = array![[2.0]].into_dyn();
        let x2 = array![[3.0]].into_dyn();
        let k = linear(&CovarianceInputs::cross(x.view(), x2.view()), &Param::Scalar(1.0)).unwrap();
        assert_eq!(k, array![[6.0]].into_dyn());
    }

    #[test]
    fn test_linear_per_feature_weights() {
        let x = array![[1.0, 2.0], [0.0, 1.0]].into_dyn();
        let x2 = array![[3.0, 4.0]].into_dyn();
        let k = linear(
            &CovarianceInputs::cross(x.view(), x2.view()),
            &Param::from(vec![2.0, 0.5]),
        )
        .unwrap();
        assert_eq!(k.shape(), &[2, 1]);
        assert_relative_eq!(k[[0, 0]], 1.0 * 2.0 * 3.0 + 2.0 * 0.5 * 4.0);
        assert_relative_eq!(k[[1, 0]], 0.5 * 4.0);
    }

    #[test]
    fn test_linear_self_is_gram_matrix() {
        let x = array![[1.0, 0.0], [1.0, 1.0], [-2.0, 3.0]].into_dyn();
        let k = linear(&CovarianceInputs::self_covariance(x.view()), &Param::Scalar(1.0)).unwrap();
        let x2 = array![[1.0, 0.0], [1.0, 1.0], [-2.0, 3.0]];
        assert_eq!(k, x2.dot(&x2.t()).into_dyn());
    }

    #[test]
    fn test_linear_self_exactly_symmetric() {
        let x = array![[0.1, 1.7, -3.3], [2.9, 0.013, 7.1], [-1.1, 4.4, 0.3], [5.5, -0.7, 2.2]]
            .into_dyn();
        let k: ArrayD<f64> = linear(
            &CovarianceInputs::self_covariance(x.view()),
            &Param::from(vec![0.3, 1.9, 0.7]),
        )
        .unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(k[[i, j]].to_bits(), k[[j, i]].to_bits());
            }
        }
    }

    #[test]
    fn test_polynomial() {
        let x = array![[1.0], [2.0]].into_dyn();
        let k = polynomial(
            &CovarianceInputs::self_covariance(x.view()),
            &Param::Scalar(1.0),
            1.0,
            2.0,
        )
        .unwrap();
        assert_relative_eq!(k[[0, 0]], 4.0);
        assert_relative_eq!(k[[0, 1]], 9.0);
        assert_relative_eq!(k[[1, 1]], 25.0);
    }

    #[test]
    fn test_polynomial_negative_base_integer_degree() {
        let x = array![[1.0]].into_dyn();
        let x2 = array![[-3.0]].into_dyn();
        let k = polynomial(
            &CovarianceInputs::cross(x.view(), x2.view()),
            &Param::Scalar(1.0),
            0.0,
            3.0,
        )
        .unwrap();
        assert_relative_eq!(k[[0, 0]], -27.0, epsilon = 1e-12);
    }
}
