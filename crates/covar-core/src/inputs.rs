//! Input pairs for covariance evaluation
//!
//! Self-covariance is an explicit token carried by [`CovarianceInputs`],
//! never inferred from values. Two batches with equal contents passed through
//! [`CovarianceInputs::cross`] are a cross pair.

use crate::numeric::KernelFloat;
use crate::select::{select_cow, ActiveDims};
use crate::{Error, Result};
use ndarray::{ArrayBase, ArrayViewD, CowArray, Data, IxDyn};

/// The `(X, X')` pair a kernel is evaluated on
#[derive(Debug, Clone)]
pub struct CovarianceInputs<'a, T> {
    x: ArrayViewD<'a, T>,
    x2: Option<ArrayViewD<'a, T>>,
}

impl<'a, T: KernelFloat> CovarianceInputs<'a, T> {
    /// Covariance of a batch with itself
    pub fn self_covariance(x: ArrayViewD<'a, T>) -> Self {
        Self { x, x2: None }
    }

    /// Covariance between two distinct batches
    pub fn cross(x: ArrayViewD<'a, T>, x2: ArrayViewD<'a, T>) -> Self {
        Self { x, x2: Some(x2) }
    }

    /// Build a pair from two array references
    ///
    /// The pair counts as self-covariance only when both references point at
    /// the same array object.
    pub fn from_refs<S>(x: &'a ArrayBase<S, IxDyn>, x2: &'a ArrayBase<S, IxDyn>) -> Self
    where
        S: Data<Elem = T>,
    {
        if std::ptr::eq(x, x2) {
            Self::self_covariance(x.view())
        } else {
            Self::cross(x.view(), x2.view())
        }
    }

    pub fn is_self_covariance(&self) -> bool {
        self.x2.is_none()
    }

    pub fn x(&self) -> &ArrayViewD<'a, T> {
        &self.x
    }

    /// Second batch; the first one again under self-covariance
    pub fn x2(&self) -> &ArrayViewD<'a, T> {
        self.x2.as_ref().unwrap_or(&self.x)
    }

    /// Check shapes and compute the layout of the resulting covariance
    pub fn layout(&self) -> Result<PairLayout> {
        let (lead1, n, d1) = split_shape(self.x.shape())?;
        let (lead2, n2, d2) = split_shape(self.x2().shape())?;
        if d1 != d2 {
            return Err(Error::feature_mismatch(d1, d2));
        }
        let leading = broadcast_leading(lead1, lead2)?;
        Ok(PairLayout {
            leading,
            n,
            n2,
            n_features: d1,
        })
    }

    /// Restrict both batches to the active feature columns
    pub fn select(&self, dims: &ActiveDims) -> Result<SelectedInputs<'a, T>> {
        let x = select_cow(&self.x, dims)?;
        let x2 = match &self.x2 {
            Some(x2) => Some(select_cow(x2, dims)?),
            None => None,
        };
        Ok(SelectedInputs { x, x2 })
    }
}

/// Inputs after active-dimension selection
///
/// Holds copies only when a column subset was taken.
#[derive(Debug)]
pub struct SelectedInputs<'a, T> {
    x: CowArray<'a, T, IxDyn>,
    x2: Option<CowArray<'a, T, IxDyn>>,
}

impl<'a, T: KernelFloat> SelectedInputs<'a, T> {
    /// Borrow as a pair, keeping the self-covariance token
    pub fn as_inputs(&self) -> CovarianceInputs<'_, T> {
        match &self.x2 {
            Some(x2) => CovarianceInputs::cross(self.x.view(), x2.view()),
            None => CovarianceInputs::self_covariance(self.x.view()),
        }
    }
}

/// Shape bookkeeping for one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairLayout {
    /// Broadcast leading batch dimensions
    pub leading: Vec<usize>,
    /// Points in `X`
    pub n: usize,
    /// Points in `X'`
    pub n2: usize,
    /// Features shared by both batches
    pub n_features: usize,
}

impl PairLayout {
    /// Number of covariance matrices in the output
    pub fn batch_size(&self) -> usize {
        self.leading.iter().product()
    }

    /// `[..., N, N']`
    pub fn output_shape(&self) -> Vec<usize> {
        let mut shape = self.leading.clone();
        shape.push(self.n);
        shape.push(self.n2);
        shape
    }
}

fn split_shape(shape: &[usize]) -> Result<(&[usize], usize, usize)> {
    match shape {
        [leading @ .., n, d] => Ok((leading, *n, *d)),
        _ => Err(Error::rank_too_low(shape)),
    }
}

/// Right-aligned broadcast of two leading-dimension lists
pub fn broadcast_leading(a: &[usize], b: &[usize]) -> Result<Vec<usize>> {
    let rank = a.len().max(b.len());
    let mut out = vec![1; rank];
    for i in 0..rank {
        let da = if i < rank - a.len() { 1 } else { a[i - (rank - a.len())] };
        let db = if i < rank - b.len() { 1 } else { b[i - (rank - b.len())] };
        out[i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return Err(Error::incompatible_batches(a, b)),
        };
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, ArrayD};

    fn zeros(shape: &[usize]) -> ArrayD<f64> {
        Array::zeros(IxDyn(shape))
    }

    #[test]
    fn test_broadcast_leading() {
        assert_eq!(broadcast_leading(&[], &[]).unwrap(), Vec::<usize>::new());
        assert_eq!(broadcast_leading(&[3], &[]).unwrap(), vec![3]);
        assert_eq!(broadcast_leading(&[2, 1], &[4]).unwrap(), vec![2, 4]);
        assert_eq!(broadcast_leading(&[1, 5], &[3, 1]).unwrap(), vec![3, 5]);
        assert!(matches!(
            broadcast_leading(&[2], &[3]),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_layout_asymmetric_counts() {
        let x = zeros(&[4, 3]);
        let x2 = zeros(&[7, 3]);
        let layout = CovarianceInputs::cross(x.view(), x2.view()).layout().unwrap();
        assert_eq!(layout.output_shape(), vec![4, 7]);
        assert_eq!(layout.batch_size(), 1);
        assert_eq!(layout.n_features, 3);
    }

    #[test]
    fn test_layout_errors() {
        let x = zeros(&[4, 3]);
        let x2 = zeros(&[4, 2]);
        assert!(matches!(
            CovarianceInputs::cross(x.view(), x2.view()).layout(),
            Err(Error::ShapeMismatch(_))
        ));

        let flat = zeros(&[4]);
        assert!(matches!(
            CovarianceInputs::self_covariance(flat.view()).layout(),
            Err(Error::ShapeMismatch(_))
        ));

        let a = zeros(&[2, 4, 3]);
        let b = zeros(&[3, 4, 3]);
        assert!(matches!(
            CovarianceInputs::cross(a.view(), b.view()).layout(),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_batched_layout() {
        let a = zeros(&[2, 1, 5, 3]);
        let b = zeros(&[4, 6, 3]);
        let layout = CovarianceInputs::cross(a.view(), b.view()).layout().unwrap();
        assert_eq!(layout.leading, vec![2, 4]);
        assert_eq!(layout.output_shape(), vec![2, 4, 5, 6]);
        assert_eq!(layout.batch_size(), 8);
    }

    #[test]
    fn test_reference_identity() {
        let a = zeros(&[3, 2]);
        let b = a.clone();
        assert!(CovarianceInputs::from_refs(&a, &a).is_self_covariance());
        // equal values, different objects
        assert!(!CovarianceInputs::from_refs(&a, &b).is_self_covariance());
    }

    #[test]
    fn test_select_keeps_token() {
        let a = zeros(&[3, 4]);
        let dims = ActiveDims::new(vec![2]).unwrap();
        let inputs = CovarianceInputs::self_covariance(a.view());
        let selected = inputs.select(&dims).unwrap();
        let pair = selected.as_inputs();
        assert!(pair.is_self_covariance());
        assert_eq!(pair.x().shape(), &[3, 1]);
    }
}
