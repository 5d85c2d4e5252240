//! Constructors for single-kernel expressions
//!
//! Every parameter is taken as `impl Into<Param<T>>`: a plain float, a vector,
//! or a [`Param`] converted from an upstream tensor with `Param::try_from`.
//! Lengths are not checked here; an expression is validated against the
//! feature count when it is evaluated.
//!
//! ```rust
//! use covar_expr::builders::{linear, rbf, white};
//!
//! let k = rbf(2.0f64, vec![0.5, 1.5]).on_dims(vec![0, 1])?
//!     + linear(1.0f64).on_dims(vec![2])?
//!     + white(1e-3f64);
//! assert_eq!(k.to_string(), "rbf[0, 1] + linear[2] + white");
//! # Ok::<(), covar_core::Error>(())
//! ```

use crate::expr::KernelExpr;
use covar_core::{KernelFloat, Param};
use covar_kernels::{Formula, Scaled};

/// Constant `σ²`
pub fn bias<T: KernelFloat>(variance: impl Into<Param<T>>) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Bias {
        variance: variance.into(),
    })
}

/// Independent noise `σ²·I` (self-covariance only)
pub fn white<T: KernelFloat>(variance: impl Into<Param<T>>) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::White {
        variance: variance.into(),
    })
}

/// Squared exponential
pub fn rbf<T: KernelFloat>(
    variance: impl Into<Param<T>>,
    lengthscale: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Rbf(Scaled::new(variance, lengthscale)))
}

pub fn rational_quadratic<T: KernelFloat>(
    variance: impl Into<Param<T>>,
    lengthscale: impl Into<Param<T>>,
    alpha: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::RationalQuadratic {
        scaled: Scaled::new(variance, lengthscale),
        alpha: alpha.into(),
    })
}

/// Dot product with per-feature weights
pub fn linear<T: KernelFloat>(variances: impl Into<Param<T>>) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Linear {
        variances: variances.into(),
    })
}

pub fn polynomial<T: KernelFloat>(
    variances: impl Into<Param<T>>,
    offset: impl Into<Param<T>>,
    degree: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Polynomial {
        variances: variances.into(),
        offset: offset.into(),
        degree: degree.into(),
    })
}

pub fn exponential<T: KernelFloat>(
    variance: impl Into<Param<T>>,
    lengthscale: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Exponential(Scaled::new(variance, lengthscale)))
}

pub fn matern12<T: KernelFloat>(
    variance: impl Into<Param<T>>,
    lengthscale: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Matern12(Scaled::new(variance, lengthscale)))
}

pub fn matern32<T: KernelFloat>(
    variance: impl Into<Param<T>>,
    lengthscale: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Matern32(Scaled::new(variance, lengthscale)))
}

pub fn matern52<T: KernelFloat>(
    variance: impl Into<Param<T>>,
    lengthscale: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Matern52(Scaled::new(variance, lengthscale)))
}

pub fn cosine<T: KernelFloat>(
    variance: impl Into<Param<T>>,
    lengthscale: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Cosine(Scaled::new(variance, lengthscale)))
}

/// Periodic kernel over the full feature set
///
/// Active dimensions set with [`KernelExpr::on_dims`] are range-checked but do
/// not change the result.
pub fn periodic<T: KernelFloat>(
    variance: impl Into<Param<T>>,
    lengthscale: impl Into<Param<T>>,
    period: impl Into<Param<T>>,
) -> KernelExpr<T> {
    KernelExpr::leaf(Formula::Periodic {
        variance: variance.into(),
        lengthscale: lengthscale.into(),
        period: period.into(),
    })
}
