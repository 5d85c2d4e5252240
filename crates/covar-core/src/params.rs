//! Kernel parameter values
//!
//! A parameter is a tensor value handed in by the caller. It may come from any
//! upstream computation; nothing here assumes it is a literal.

use crate::numeric::KernelFloat;
use crate::{Error, Result};
use ndarray::{Array1, ArrayD, ArrayViewD};

/// Scalar or per-feature parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param<T> {
    /// One value shared by every feature
    Scalar(T),
    /// One value per active feature
    PerFeature(Array1<T>),
}

impl<T: KernelFloat> Param<T> {
    /// Number of values held
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::PerFeature(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Resolve a parameter that must hold exactly one value
    ///
    /// Length-1 vectors are accepted.
    pub fn scalar_value(&self, kernel: &'static str, parameter: &'static str) -> Result<T> {
        match self {
            Self::Scalar(v) => Ok(*v),
            Self::PerFeature(values) if values.len() == 1 => Ok(values[0]),
            Self::PerFeature(values) => Err(Error::ParameterShapeMismatch {
                kernel,
                parameter,
                expected: 1,
                actual: values.len(),
            }),
        }
    }

    /// Check a per-feature parameter against the active-dimension count
    ///
    /// Scalars always pass; vectors must have `n_features` entries.
    pub fn check_features(
        &self,
        kernel: &'static str,
        parameter: &'static str,
        n_features: usize,
    ) -> Result<()> {
        match self {
            Self::Scalar(_) => Ok(()),
            Self::PerFeature(values) if values.len() == n_features => Ok(()),
            Self::PerFeature(values) => Err(Error::ParameterShapeMismatch {
                kernel,
                parameter,
                expected: n_features,
                actual: values.len(),
            }),
        }
    }

    /// Divide each feature column of `x` by this parameter
    ///
    /// The trailing axis of `x` is the feature axis.
    pub fn divide_features(&self, x: &ArrayViewD<'_, T>) -> ArrayD<T> {
        match self {
            Self::Scalar(s) => x.mapv(|v| v / *s),
            Self::PerFeature(values) => x / values,
        }
    }

    /// Multiply each feature column of `x` by this parameter
    pub fn scale_features(&self, x: &ArrayViewD<'_, T>) -> ArrayD<T> {
        match self {
            Self::Scalar(s) => x.mapv(|v| v * *s),
            Self::PerFeature(values) => x * values,
        }
    }

    /// Values as a vector (a scalar becomes length 1)
    pub fn to_array(&self) -> Array1<T> {
        match self {
            Self::Scalar(v) => Array1::from_elem(1, *v),
            Self::PerFeature(values) => values.clone(),
        }
    }

    /// Collapse a length-1 vector into a scalar
    pub fn squeeze(self) -> Self {
        match self {
            Self::PerFeature(values) if values.len() == 1 => Self::Scalar(values[0]),
            other => other,
        }
    }
}

impl<T: KernelFloat> From<T> for Param<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl<T: KernelFloat> From<Vec<T>> for Param<T> {
    fn from(values: Vec<T>) -> Self {
        Self::PerFeature(Array1::from(values))
    }
}

impl<T: KernelFloat> From<&[T]> for Param<T> {
    fn from(values: &[T]) -> Self {
        Self::PerFeature(Array1::from(values.to_vec()))
    }
}

impl<T: KernelFloat> From<Array1<T>> for Param<T> {
    fn from(values: Array1<T>) -> Self {
        Self::PerFeature(values)
    }
}

/// Rank-0 tensors become scalars, rank-1 tensors per-feature vectors
///
/// Higher ranks are rejected rather than flattened.
impl<T: KernelFloat> TryFrom<ArrayViewD<'_, T>> for Param<T> {
    type Error = Error;

    fn try_from(values: ArrayViewD<'_, T>) -> Result<Self> {
        match values.ndim() {
            0 => values
                .first()
                .map(|v| Self::Scalar(*v))
                .ok_or_else(|| Error::parameter_rank(0)),
            1 => Ok(Self::PerFeature(values.iter().copied().collect())),
            ndim => Err(Error::parameter_rank(ndim)),
        }
    }
}
