//! Base kernel instances and the covariance function trait

use crate::formula::Formula;
use crate::{constant, dot_product, periodic, stationary};
use covar_core::{ActiveDims, CovarianceInputs, Error, EvalConfig, KernelFloat, Result};
use ndarray::ArrayD;
use std::fmt;
use tracing::trace;

/// Anything that maps an input pair to a covariance tensor
///
/// Implemented by [`BaseKernel`] and by composite expressions built on top of
/// it. Implementations are pure: evaluating twice on the same inputs gives the
/// same tensor.
pub trait CovarianceFunction<T: KernelFloat>: Send + Sync {
    /// Short name for logging and error messages
    fn name(&self) -> &'static str;

    /// Check active dimensions and parameter shapes against a feature count
    ///
    /// Never touches input values, so it can run before any computation.
    fn validate(&self, n_features: usize) -> Result<()>;

    /// Evaluate on an input pair, producing shape `[..., N, N']`
    fn covariance(
        &self,
        inputs: &CovarianceInputs<'_, T>,
        config: &EvalConfig<T>,
    ) -> Result<ArrayD<T>>;
}

/// A formula bound to its parameters and active dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct BaseKernel<T> {
    formula: Formula<T>,
    active_dims: ActiveDims,
}

impl<T: KernelFloat> BaseKernel<T> {
    /// Kernel over every input feature
    pub fn new(formula: Formula<T>) -> Self {
        Self {
            formula,
            active_dims: ActiveDims::All,
        }
    }

    /// Restrict the kernel to a subset of feature columns
    pub fn with_active_dims(mut self, active_dims: ActiveDims) -> Self {
        self.active_dims = active_dims;
        self
    }

    pub fn formula(&self) -> &Formula<T> {
        &self.formula
    }

    pub fn active_dims(&self) -> &ActiveDims {
        &self.active_dims
    }

    fn compute(&self, inputs: &CovarianceInputs<'_, T>, floor: T) -> Result<ArrayD<T>> {
        if self.formula.uses_active_dims() && !self.active_dims.is_all() {
            let selected = inputs.select(&self.active_dims)?;
            self.dispatch(&selected.as_inputs(), floor)
        } else {
            self.dispatch(inputs, floor)
        }
    }

    fn dispatch(&self, pair: &CovarianceInputs<'_, T>, floor: T) -> Result<ArrayD<T>> {
        let kernel = self.formula.name();
        match &self.formula {
            Formula::Bias { variance } => {
                constant::bias(pair, variance.scalar_value(kernel, "variance")?)
            }
            Formula::White { variance } => {
                constant::white(pair, variance.scalar_value(kernel, "variance")?)
            }
            Formula::Rbf(s) => stationary::rbf(
                pair,
                s.variance.scalar_value(kernel, "variance")?,
                &s.lengthscale,
                floor,
            ),
            Formula::RationalQuadratic { scaled, alpha } => stationary::rational_quadratic(
                pair,
                scaled.variance.scalar_value(kernel, "variance")?,
                &scaled.lengthscale,
                alpha.scalar_value(kernel, "alpha")?,
                floor,
            ),
            Formula::Linear { variances } => dot_product::linear(pair, variances),
            Formula::Polynomial {
                variances,
                offset,
                degree,
            } => dot_product::polynomial(
                pair,
                variances,
                offset.scalar_value(kernel, "offset")?,
                degree.scalar_value(kernel, "degree")?,
            ),
            Formula::Exponential(s) => stationary::exponential(
                pair,
                s.variance.scalar_value(kernel, "variance")?,
                &s.lengthscale,
                floor,
            ),
            Formula::Matern12(s) => stationary::matern12(
                pair,
                s.variance.scalar_value(kernel, "variance")?,
                &s.lengthscale,
                floor,
            ),
            Formula::Matern32(s) => stationary::matern32(
                pair,
                s.variance.scalar_value(kernel, "variance")?,
                &s.lengthscale,
                floor,
            ),
            Formula::Matern52(s) => stationary::matern52(
                pair,
                s.variance.scalar_value(kernel, "variance")?,
                &s.lengthscale,
                floor,
            ),
            Formula::Cosine(s) => stationary::cosine(
                pair,
                s.variance.scalar_value(kernel, "variance")?,
                &s.lengthscale,
                floor,
            ),
            Formula::Periodic {
                variance,
                lengthscale,
                period,
            } => periodic::periodic(
                pair,
                variance.scalar_value(kernel, "variance")?,
                lengthscale.scalar_value(kernel, "lengthscale")?,
                period.scalar_value(kernel, "period")?,
                floor,
            ),
        }
    }
}

impl<T: KernelFloat> CovarianceFunction<T> for BaseKernel<T> {
    fn name(&self) -> &'static str {
        self.formula.name()
    }

    fn validate(&self, n_features: usize) -> Result<()> {
        self.active_dims.validate(n_features)?;
        let n_active = if self.formula.uses_active_dims() {
            self.active_dims.count(n_features)
        } else {
            n_features
        };
        if n_active == 0 && self.formula.uses_active_dims() {
            return Err(Error::InvalidActiveDimensions(format!(
                "{} needs at least one active feature, input has none",
                self.formula.name()
            )));
        }
        self.formula.validate(n_active)
    }

    fn covariance(
        &self,
        inputs: &CovarianceInputs<'_, T>,
        config: &EvalConfig<T>,
    ) -> Result<ArrayD<T>> {
        let layout = inputs.layout()?;
        self.validate(layout.n_features)?;
        trace!(
            kernel = self.formula.name(),
            active_dims = %self.active_dims,
            self_covariance = inputs.is_self_covariance(),
            "evaluating base kernel"
        );
        self.compute(inputs, config.distance_floor())
    }
}

impl<T: KernelFloat> fmt::Display for BaseKernel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.formula.name(), self.active_dims)
    }
}
