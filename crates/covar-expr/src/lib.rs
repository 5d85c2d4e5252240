//! Composable covariance kernels
//!
//! Build kernel expressions from the base formulas with `+` and `*`, restrict
//! leaves to feature subsets, and evaluate the result on batched inputs.
//!
//! # Example
//!
//! ```rust
//! use covar_expr::prelude::*;
//! use ndarray::array;
//!
//! let kernel = bias(2.0f64) + white(3.0f64);
//! let x = array![[0.0]].into_dyn();
//! let other = array![[0.0]].into_dyn();
//!
//! // white noise only contributes under self-covariance
//! assert_eq!(kernel.self_covariance(&x.view())?[[0, 0]], 5.0);
//! assert_eq!(kernel.cross_covariance(&x.view(), &other.view())?[[0, 0]], 2.0);
//! # Ok::<(), covar_core::Error>(())
//! ```

pub mod builders;
pub mod combinators;
pub mod evaluate;
pub mod expr;

pub use evaluate::evaluate;
pub use expr::KernelExpr;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::builders::*;
    pub use crate::evaluate::evaluate;
    pub use crate::expr::KernelExpr;
    pub use covar_core::{CovarianceInputs, EvalConfig, ExecutionStrategy, Param};
    pub use covar_kernels::CovarianceFunction;
}
