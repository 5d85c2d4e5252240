//! Kernel expression trees
//!
//! A [`KernelExpr`] is an immutable binary tree: leaves are base kernels,
//! internal nodes are sums and products. Nodes are reference counted, so
//! cloning an expression or reusing it as a sub-expression of several larger
//! ones copies no parameters.

use crate::evaluate::evaluate;
use covar_core::{ActiveDims, CovarianceInputs, EvalConfig, Error, KernelFloat, Result};
use covar_kernels::{BaseKernel, CovarianceFunction, Formula};
use ndarray::{ArrayD, ArrayViewD};
use std::fmt;
use std::ops::{Add, Mul};
use std::sync::Arc;

/// A composite covariance function
#[derive(Debug, Clone)]
pub enum KernelExpr<T> {
    /// A single base kernel
    Leaf(Arc<BaseKernel<T>>),
    /// Sum of two sub-expressions
    Add(Arc<KernelExpr<T>>, Arc<KernelExpr<T>>),
    /// Elementwise product of two sub-expressions
    Prod(Arc<KernelExpr<T>>, Arc<KernelExpr<T>>),
}

impl<T: KernelFloat> KernelExpr<T> {
    /// Wrap a formula as a leaf over every input feature
    pub fn leaf(formula: Formula<T>) -> Self {
        Self::Leaf(Arc::new(BaseKernel::new(formula)))
    }

    /// Restrict a leaf to the given feature columns
    ///
    /// Fails on an empty or duplicated index list, and on composite
    /// expressions, whose leaves carry their own dimensions.
    pub fn on_dims(self, dims: impl Into<Vec<usize>>) -> Result<Self> {
        let dims = ActiveDims::new(dims)?;
        match self {
            Self::Leaf(kernel) => {
                let kernel = Arc::unwrap_or_clone(kernel).with_active_dims(dims);
                Ok(Self::Leaf(Arc::new(kernel)))
            }
            composite => Err(Error::InvalidActiveDimensions(format!(
                "active dimensions apply to base kernels, not to `{composite}`"
            ))),
        }
    }

    pub fn sum(a: Self, b: Self) -> Self {
        Self::Add(Arc::new(a), Arc::new(b))
    }

    pub fn product(a: Self, b: Self) -> Self {
        Self::Prod(Arc::new(a), Arc::new(b))
    }

    /// Base kernels in left-to-right order
    pub fn leaves(&self) -> Vec<&BaseKernel<T>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'s>(&'s self, out: &mut Vec<&'s BaseKernel<T>>) {
        match self {
            Self::Leaf(kernel) => out.push(kernel),
            Self::Add(a, b) | Self::Prod(a, b) => {
                a.collect_leaves(out);
                b.collect_leaves(out);
            }
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Add(a, b) | Self::Prod(a, b) => a.n_leaves() + b.n_leaves(),
        }
    }

    /// Height of the tree; a single leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Add(a, b) | Self::Prod(a, b) => 1 + a.depth().max(b.depth()),
        }
    }

    /// `(kernel name, parameter name)` for every parameter in the tree
    pub fn parameters(&self) -> Vec<(&'static str, &'static str)> {
        self.leaves()
            .into_iter()
            .flat_map(|kernel| {
                let name = kernel.formula().name();
                kernel
                    .formula()
                    .parameters()
                    .into_iter()
                    .map(move |(param, _)| (name, param))
            })
            .collect()
    }

    /// Covariance of a batch with itself, default configuration
    pub fn self_covariance(&self, x: &ArrayViewD<'_, T>) -> Result<ArrayD<T>> {
        evaluate(
            self,
            &CovarianceInputs::self_covariance(x.view()),
            &EvalConfig::default(),
        )
    }

    /// Covariance between two batches, default configuration
    pub fn cross_covariance(
        &self,
        x: &ArrayViewD<'_, T>,
        x2: &ArrayViewD<'_, T>,
    ) -> Result<ArrayD<T>> {
        evaluate(
            self,
            &CovarianceInputs::cross(x.view(), x2.view()),
            &EvalConfig::default(),
        )
    }

    fn fmt_factor(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(..) => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

impl<T: KernelFloat> CovarianceFunction<T> for KernelExpr<T> {
    fn name(&self) -> &'static str {
        match self {
            Self::Leaf(kernel) => kernel.name(),
            Self::Add(..) => "add",
            Self::Prod(..) => "prod",
        }
    }

    fn validate(&self, n_features: usize) -> Result<()> {
        match self {
            Self::Leaf(kernel) => kernel.validate(n_features),
            Self::Add(a, b) | Self::Prod(a, b) => {
                a.validate(n_features)?;
                b.validate(n_features)
            }
        }
    }

    fn covariance(
        &self,
        inputs: &CovarianceInputs<'_, T>,
        config: &EvalConfig<T>,
    ) -> Result<ArrayD<T>> {
        evaluate(self, inputs, config)
    }
}

impl<T: KernelFloat> From<BaseKernel<T>> for KernelExpr<T> {
    fn from(kernel: BaseKernel<T>) -> Self {
        Self::Leaf(Arc::new(kernel))
    }
}

impl<T: KernelFloat> From<Formula<T>> for KernelExpr<T> {
    fn from(formula: Formula<T>) -> Self {
        Self::leaf(formula)
    }
}

impl<T: KernelFloat> fmt::Display for KernelExpr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(kernel) => write!(f, "{kernel}"),
            Self::Add(a, b) => write!(f, "{a} + {b}"),
            Self::Prod(a, b) => {
                a.fmt_factor(f)?;
                f.write_str(" * ")?;
                b.fmt_factor(f)
            }
        }
    }
}

impl<T: KernelFloat> Add for KernelExpr<T> {
    type Output = KernelExpr<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::sum(self, rhs)
    }
}

impl<T: KernelFloat> Add for &KernelExpr<T> {
    type Output = KernelExpr<T>;

    fn add(self, rhs: Self) -> Self::Output {
        KernelExpr::sum(self.clone(), rhs.clone())
    }
}

impl<T: KernelFloat> Mul for KernelExpr<T> {
    type Output = KernelExpr<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::product(self, rhs)
    }
}

impl<T: KernelFloat> Mul for &KernelExpr<T> {
    type Output = KernelExpr<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        KernelExpr::product(self.clone(), rhs.clone())
    }
}
