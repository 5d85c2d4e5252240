//! Base covariance kernel library
//!
//! Twelve formulas in four families, each a pure function of an input pair,
//! its parameters and its active dimensions:
//!
//! - **Constant**: [`bias`](constant::bias), [`white`](constant::white)
//! - **Stationary**: RBF, rational quadratic, exponential, Matérn 1/2, 3/2,
//!   5/2 and cosine, all on the lengthscale-rescaled distance
//! - **Dot product**: [`linear`](dot_product::linear) and
//!   [`polynomial`](dot_product::polynomial)
//! - **Periodic**: on the unscaled distance over every feature
//!
//! [`Formula`] is the closed set of formulas; [`BaseKernel`] binds one to
//! its active dimensions and evaluates it through [`CovarianceFunction`].
//!
//! # Example
//!
//! ```rust
//! use covar_core::{CovarianceInputs, EvalConfig};
//! use covar_kernels::{BaseKernel, CovarianceFunction, Formula, Scaled};
//! use ndarray::array;
//!
//! let kernel = BaseKernel::new(Formula::Rbf(Scaled::new(1.0f64, 1.0f64)));
//! let x = array![[0.0], [1.0]].into_dyn();
//! let k = kernel
//!     .covariance(&CovarianceInputs::self_covariance(x.view()), &EvalConfig::default())
//!     .unwrap();
//!
//! assert!((k[[0, 1]] - (-0.5f64).exp()).abs() < 1e-12);
//! ```

pub mod constant;
pub mod dot_product;
pub mod formula;
pub mod kernel;
pub mod periodic;
pub mod stationary;

pub use formula::{Formula, Scaled};
pub use kernel::{BaseKernel, CovarianceFunction};
