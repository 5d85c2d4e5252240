//! Covariance kernel algebra for Gaussian process models
//!
//! This crate re-exports the covar workspace, organised in three layers:
//!
//! 1. **[`covar_core`]** - precision, inputs, distances, dimension selection
//!    and validity diagnostics
//! 2. **[`covar_kernels`]** - the twelve base formulas
//! 3. **[`covar_expr`]** - kernel expressions, `+`/`*` composition and
//!    evaluation
//!
//! # Example
//!
//! ```rust
//! use covar::prelude::*;
//! use ndarray::array;
//!
//! let kernel = rbf(1.0f64, 1.0f64).on_dims(vec![0])? + linear(0.5f64).on_dims(vec![1])?;
//! let x = array![[0.0, 1.0], [1.0, 2.0]].into_dyn();
//! let c = kernel.self_covariance(&x.view())?;
//!
//! assert_eq!(c.shape(), &[2, 2]);
//! assert!((c[[0, 1]] - ((-0.5f64).exp() + 1.0)).abs() < 1e-12);
//! # Ok::<(), covar::Error>(())
//! ```

pub use covar_core;
pub use covar_expr;
pub use covar_kernels;

pub use covar_core::{Error, Result};

/// Everything needed to build and evaluate kernels
pub mod prelude {
    pub use covar_core::{
        check_covariance, ActiveDims, CovarianceInputs, CovarianceReport, Error, EvalConfig,
        ExecutionStrategy, KernelFloat, Param, Precision, Result,
    };
    pub use covar_expr::builders::*;
    pub use covar_expr::{evaluate, KernelExpr};
    pub use covar_kernels::{BaseKernel, CovarianceFunction, Formula, Scaled};
}
