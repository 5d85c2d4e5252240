//! Evaluation configuration
//!
//! The config is injected into every evaluation and primitive call instead of
//! being read from ambient state.

use crate::numeric::{KernelFloat, Precision};
use crate::{Error, Result};

/// Floor applied to squared distances before any square root
pub const DEFAULT_DISTANCE_FLOOR: f64 = 1e-40;

/// How sibling sub-expressions are scheduled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Evaluate children one after another on the calling thread
    #[default]
    Sequential,
    /// Evaluate the two children of a combinator with `rayon::join`
    ///
    /// Falls back to sequential when the `parallel` feature is disabled.
    Parallel,
}

/// Configuration shared by every step of one evaluation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvalConfig<T: KernelFloat> {
    distance_floor: T,
    strategy: ExecutionStrategy,
}

impl<T: KernelFloat> EvalConfig<T> {
    /// Default floor, sequential execution
    pub fn new() -> Self {
        Self {
            distance_floor: T::constant(DEFAULT_DISTANCE_FLOOR),
            strategy: ExecutionStrategy::Sequential,
        }
    }

    /// Replace the squared-distance floor
    ///
    /// The floor must be strictly positive and finite, otherwise square roots
    /// of cancelled distances could still produce NaN or zero.
    pub fn with_distance_floor(mut self, floor: T) -> Result<Self> {
        if !(floor > T::zero()) || !floor.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "distance floor must be positive and finite, got {floor}"
            )));
        }
        self.distance_floor = floor;
        Ok(self)
    }

    /// Set the execution strategy
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn distance_floor(&self) -> T {
        self.distance_floor
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Precision every value of this evaluation is computed in
    pub fn precision(&self) -> Precision {
        T::PRECISION
    }
}

impl<T: KernelFloat> Default for EvalConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}
