//! Kernel combinators
//!
//! Sums and elementwise (Schur) products of covariance tensors are again
//! valid covariances, so these are the only two ways to merge them.

use covar_core::{Error, KernelFloat, Result};
use ndarray::ArrayD;

/// Elementwise sum of two covariance tensors of identical shape
pub fn add<T: KernelFloat>(mut a: ArrayD<T>, b: ArrayD<T>) -> Result<ArrayD<T>> {
    check_same_shape(&a, &b)?;
    a += &b;
    Ok(a)
}

/// Elementwise product of two covariance tensors of identical shape
pub fn multiply<T: KernelFloat>(mut a: ArrayD<T>, b: ArrayD<T>) -> Result<ArrayD<T>> {
    check_same_shape(&a, &b)?;
    a *= &b;
    Ok(a)
}

fn check_same_shape<T>(a: &ArrayD<T>, b: &ArrayD<T>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::ShapeMismatch(format!(
            "cannot combine covariances of shape {:?} and {:?}",
            a.shape(),
            b.shape()
        )));
    }
    Ok(())
}
