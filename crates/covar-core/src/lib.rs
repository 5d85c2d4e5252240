//! Core types and primitives for covariance kernel evaluation
//!
//! This crate is the bottom layer of the covar workspace. It owns everything
//! a kernel formula needs before any formula exists:
//!
//! 1. **Numeric foundation** - [`KernelFloat`] ties an evaluation to one
//!    precision (`f32` or `f64`)
//! 2. **Inputs and shapes** - [`CovarianceInputs`] carries the `(X, X')` pair
//!    and the explicit self-covariance token; [`PairLayout`] describes the
//!    broadcast output shape
//! 3. **Primitives** - batched [`distance`] computations and the
//!    [`select`](select::select) dimension selector
//! 4. **Diagnostics** - symmetry and PSD checks for produced covariances
//!
//! # Example
//!
//! ```rust
//! use covar_core::{distance::squared_distance, CovarianceInputs, EvalConfig};
//! use ndarray::array;
//!
//! let x = array![[0.0, 0.0], [3.0, 4.0]].into_dyn();
//! let config = EvalConfig::<f64>::default();
//! let d2 = squared_distance(
//!     &CovarianceInputs::self_covariance(x.view()),
//!     None,
//!     config.distance_floor(),
//! )
//! .unwrap();
//!
//! assert_eq!(d2.shape(), &[2, 2]);
//! assert_eq!(d2[[0, 1]], 25.0);
//! ```

pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod distance;
pub mod error;
pub mod inputs;
pub mod numeric;
pub mod params;
pub mod select;

pub use config::{EvalConfig, ExecutionStrategy, DEFAULT_DISTANCE_FLOOR};
pub use diagnostics::{check_covariance, CovarianceReport};
pub use distance::{absolute_distance, squared_distance};
pub use error::{Error, Result};
pub use inputs::{broadcast_leading, CovarianceInputs, PairLayout, SelectedInputs};
pub use numeric::{KernelFloat, Precision};
pub use params::Param;
pub use select::ActiveDims;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
