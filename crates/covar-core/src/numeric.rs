//! Floating-point foundation for kernel evaluation
//!
//! Precision is a type parameter rather than a process-wide setting: every
//! input batch, parameter, expression and config in one evaluation shares the
//! same `T: KernelFloat`, so mixing precisions fails to compile.

use ndarray::{LinalgScalar, ScalarOperand};
use num_traits::{Float, FromPrimitive, NumAssignOps};
use std::fmt::{Debug, Display};

/// Floating-point precision of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// IEEE-754 single precision
    Single,
    /// IEEE-754 double precision
    Double,
}

impl Precision {
    /// Short name matching the Rust type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "f32",
            Self::Double => "f64",
        }
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar type a covariance can be computed in
pub trait KernelFloat:
    Float
    + FromPrimitive
    + NumAssignOps
    + LinalgScalar
    + ScalarOperand
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
    /// Precision this type evaluates in
    const PRECISION: Precision;

    /// Convert an `f64` formula constant into this precision
    fn constant(val: f64) -> Self;

    /// Widen to `f64` (used by diagnostics)
    fn widen(self) -> f64;
}

impl KernelFloat for f64 {
    const PRECISION: Precision = Precision::Double;

    #[inline]
    fn constant(val: f64) -> Self {
        val
    }

    #[inline]
    fn widen(self) -> f64 {
        self
    }
}

impl KernelFloat for f32 {
    const PRECISION: Precision = Precision::Single;

    #[inline]
    fn constant(val: f64) -> Self {
        val as f32
    }

    #[inline]
    fn widen(self) -> f64 {
        self as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn precision_of<T: KernelFloat>() -> Precision {
        T::PRECISION
    }

    #[test]
    fn test_precision_tags() {
        assert_eq!(precision_of::<f64>(), Precision::Double);
        assert_eq!(precision_of::<f32>(), Precision::Single);
        assert_eq!(Precision::Single.to_string(), "f32");
    }

    #[test]
    fn test_constant_conversion() {
        assert_eq!(<f64 as KernelFloat>::constant(0.5), 0.5);
        assert_eq!(<f32 as KernelFloat>::constant(0.5), 0.5f32);
        // 1e-40 is subnormal in f32 but must stay strictly positive
        assert!(<f32 as KernelFloat>::constant(1e-40) > 0.0);
        assert_eq!(2.5f32.widen(), 2.5);
    }
}
