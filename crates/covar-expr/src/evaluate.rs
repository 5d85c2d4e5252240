//! Recursive evaluation of kernel expressions
//!
//! Evaluation runs in three steps:
//!
//! 1. Resolve the input layout (feature counts, broadcast batch dims)
//! 2. Validate every leaf against the feature count
//! 3. Walk the tree, combining sibling results
//!
//! Nothing is computed until the whole tree has been validated, so a bad
//! active dimension anywhere in the expression fails before any tensor work.
//! Sub-expressions are not memoised: a leaf that appears twice is evaluated
//! twice.

use crate::combinators;
use crate::expr::KernelExpr;
use covar_core::{CovarianceInputs, EvalConfig, ExecutionStrategy, KernelFloat, Result};
use covar_kernels::CovarianceFunction;
use ndarray::ArrayD;
use tracing::{debug, instrument};

/// Evaluate an expression on an input pair
#[instrument(
    level = "debug",
    skip(expr, inputs, config),
    fields(kernel = %expr, self_covariance = inputs.is_self_covariance(), precision = T::PRECISION.name())
)]
pub fn evaluate<T: KernelFloat>(
    expr: &KernelExpr<T>,
    inputs: &CovarianceInputs<'_, T>,
    config: &EvalConfig<T>,
) -> Result<ArrayD<T>> {
    let layout = inputs.layout()?;
    expr.validate(layout.n_features)?;
    debug!(
        leading = ?layout.leading,
        n = layout.n,
        n2 = layout.n2,
        n_features = layout.n_features,
        leaves = expr.n_leaves(),
        "validated kernel expression"
    );
    evaluate_node(expr, inputs, config)
}

fn evaluate_node<T: KernelFloat>(
    expr: &KernelExpr<T>,
    inputs: &CovarianceInputs<'_, T>,
    config: &EvalConfig<T>,
) -> Result<ArrayD<T>> {
    match expr {
        KernelExpr::Leaf(kernel) => kernel.covariance(inputs, config),
        KernelExpr::Add(a, b) => {
            let (ka, kb) = evaluate_pair(a, b, inputs, config)?;
            combinators::add(ka, kb)
        }
        KernelExpr::Prod(a, b) => {
            let (ka, kb) = evaluate_pair(a, b, inputs, config)?;
            combinators::multiply(ka, kb)
        }
    }
}

fn evaluate_pair<T: KernelFloat>(
    a: &KernelExpr<T>,
    b: &KernelExpr<T>,
    inputs: &CovarianceInputs<'_, T>,
    config: &EvalConfig<T>,
) -> Result<(ArrayD<T>, ArrayD<T>)> {
    match config.strategy() {
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel => {
            let (ka, kb) = rayon::join(
                || evaluate_node(a, inputs, config),
                || evaluate_node(b, inputs, config),
            );
            Ok((ka?, kb?))
        }
        #[cfg(not(feature = "parallel"))]
        ExecutionStrategy::Parallel => sequential_pair(a, b, inputs, config),
        ExecutionStrategy::Sequential => sequential_pair(a, b, inputs, config),
    }
}

fn sequential_pair<T: KernelFloat>(
    a: &KernelExpr<T>,
    b: &KernelExpr<T>,
    inputs: &CovarianceInputs<'_, T>,
    config: &EvalConfig<T>,
) -> Result<(ArrayD<T>, ArrayD<T>)> {
    Ok((
        evaluate_node(a, inputs, config)?,
        evaluate_node(b, inputs, config)?,
    ))
}
