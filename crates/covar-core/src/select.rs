//! Active-dimension selection
//!
//! A kernel consumes only the feature columns named by its active-dimension
//! set. Selection always keeps the trailing feature axis, so a single active
//! dimension turns `[..., N, D]` into `[..., N, 1]` rather than `[..., N]`.

use crate::numeric::KernelFloat;
use crate::{Error, Result};
use ndarray::{ArrayD, ArrayViewD, Axis, CowArray, IxDyn};
use std::borrow::Cow;
use std::fmt;

/// Feature columns a kernel operates on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ActiveDims {
    /// Every feature of the input
    #[default]
    All,
    /// An ordered, non-empty list of distinct feature indices
    Indices(Vec<usize>),
}

impl ActiveDims {
    /// Build an explicit index set
    ///
    /// Rejects empty lists and repeated indices. Range is checked later,
    /// against the feature count of the inputs being evaluated.
    pub fn new(indices: impl Into<Vec<usize>>) -> Result<Self> {
        let indices = indices.into();
        if indices.is_empty() {
            return Err(Error::InvalidActiveDimensions(
                "active dimension set must not be empty".to_string(),
            ));
        }
        for (pos, idx) in indices.iter().enumerate() {
            if indices[..pos].contains(idx) {
                return Err(Error::InvalidActiveDimensions(format!(
                    "index {idx} appears more than once in {indices:?}"
                )));
            }
        }
        Ok(Self::Indices(indices))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Resolve to concrete indices for an input with `n_features` columns
    pub fn resolve(&self, n_features: usize) -> Result<Cow<'_, [usize]>> {
        match self {
            Self::All => Ok(Cow::Owned((0..n_features).collect())),
            Self::Indices(indices) => {
                if let Some(&bad) = indices.iter().find(|&&idx| idx >= n_features) {
                    return Err(Error::dimension_out_of_range(bad, n_features));
                }
                Ok(Cow::Borrowed(indices.as_slice()))
            }
        }
    }

    /// Number of columns selected from an input with `n_features` columns
    pub fn count(&self, n_features: usize) -> usize {
        match self {
            Self::All => n_features,
            Self::Indices(indices) => indices.len(),
        }
    }

    /// Range check without materialising the index list
    pub fn validate(&self, n_features: usize) -> Result<()> {
        self.resolve(n_features).map(|_| ())
    }
}

impl fmt::Display for ActiveDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => Ok(()),
            Self::Indices(indices) => {
                f.write_str("[")?;
                for (i, idx) in indices.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{idx}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl TryFrom<Vec<usize>> for ActiveDims {
    type Error = Error;

    fn try_from(indices: Vec<usize>) -> Result<Self> {
        Self::new(indices)
    }
}

impl TryFrom<&[usize]> for ActiveDims {
    type Error = Error;

    fn try_from(indices: &[usize]) -> Result<Self> {
        Self::new(indices.to_vec())
    }
}

/// Extract the active feature columns of `x`
///
/// The result has the same rank as `x`; its trailing axis has `|dims|`
/// entries.
pub fn select<T: KernelFloat>(x: &ArrayViewD<'_, T>, dims: &ActiveDims) -> Result<ArrayD<T>> {
    select_cow(x, dims).map(CowArray::into_owned)
}

/// Like [`select`], but borrows `x` unchanged when every feature is active
pub fn select_cow<'a, T: KernelFloat>(
    x: &ArrayViewD<'a, T>,
    dims: &ActiveDims,
) -> Result<CowArray<'a, T, IxDyn>> {
    if x.ndim() < 2 {
        return Err(Error::rank_too_low(x.shape()));
    }
    let feature_axis = Axis(x.ndim() - 1);
    let n_features = x.len_of(feature_axis);
    match dims {
        ActiveDims::All => Ok(CowArray::from(x.clone())),
        ActiveDims::Indices(_) => {
            let indices = dims.resolve(n_features)?;
            Ok(CowArray::from(x.select(feature_axis, &indices[..])))
        }
    }
}
