//! Shared utilities for integration tests
#![allow(dead_code)]

use covar_core::check_covariance;
use ndarray::{Array, ArrayD, IxDyn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const PSD_TOLERANCE: f64 = 1e-8;

/// Uniform points in `[-3, 3)` with the given shape
pub fn random_batch(seed: u64, shape: &[usize]) -> ArrayD<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Array::from_shape_fn(IxDyn(shape), |_| rng.gen_range(-3.0..3.0))
}

/// Assert every `[N, N]` block is exactly symmetric and PSD
pub fn assert_valid_covariance(c: &ArrayD<f64>, context: &str) {
    for (i, report) in check_covariance(&c.view()).unwrap().iter().enumerate() {
        assert!(
            report.is_symmetric(0.0),
            "{context}: block {i} not symmetric ({report:?})"
        );
        assert!(
            report.is_psd(PSD_TOLERANCE),
            "{context}: block {i} not PSD ({report:?})"
        );
    }
}
