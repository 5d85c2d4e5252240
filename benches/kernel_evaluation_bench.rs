//! Benchmarks for distance primitives and kernel expression evaluation

use covar::prelude::*;
use covar_core::{squared_distance, DEFAULT_DISTANCE_FLOOR};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array, ArrayD, IxDyn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate uniform input points with a fixed seed
fn generate_inputs(shape: &[usize], seed: u64) -> ArrayD<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Array::from_shape_fn(IxDyn(shape), |_| rng.gen_range(-5.0..5.0))
}

fn bench_squared_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("squared_distance");

    for &n in &[64, 256, 1024] {
        let x = generate_inputs(&[n, 8], 1);
        let ls = Param::Scalar(1.5);
        group.bench_with_input(BenchmarkId::new("self", n), &x, |b, x| {
            let inputs = CovarianceInputs::self_covariance(x.view());
            b.iter(|| {
                black_box(squared_distance(&inputs, Some(&ls), DEFAULT_DISTANCE_FLOOR).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_base_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("base_kernels");
    let x = generate_inputs(&[512, 4], 2);

    let kernels: Vec<(&str, KernelExpr<f64>)> = vec![
        ("rbf", rbf(1.0, vec![0.5, 1.0, 1.5, 2.0])),
        ("matern52", matern52(1.0, 1.0)),
        ("linear", linear(1.0)),
        ("periodic", periodic(1.0, 1.0, 3.0)),
        ("white", white(1.0)),
    ];

    for (name, kernel) in &kernels {
        group.bench_function(*name, |b| {
            b.iter(|| black_box(kernel.self_covariance(&x.view()).unwrap()));
        });
    }

    group.finish();
}

fn bench_composite_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite_expression");

    let kernel = rbf(1.0f64, vec![0.5, 2.0]).on_dims(vec![0, 1]).unwrap()
        * linear(0.1f64).on_dims(vec![2]).unwrap()
        + matern32(0.5f64, 1.0f64).on_dims(vec![3]).unwrap()
        + periodic(0.3f64, 1.0f64, 2.0f64)
        + white(1e-3f64);

    for &batch in &[1, 8, 32] {
        let x = generate_inputs(&[batch, 128, 4], 3);
        let inputs = CovarianceInputs::self_covariance(x.view());

        group.bench_with_input(BenchmarkId::new("sequential", batch), &inputs, |b, inputs| {
            let config = EvalConfig::default();
            b.iter(|| black_box(evaluate(&kernel, inputs, &config).unwrap()));
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", batch), &inputs, |b, inputs| {
            let config = EvalConfig::default().with_strategy(ExecutionStrategy::Parallel);
            b.iter(|| black_box(evaluate(&kernel, inputs, &config).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_squared_distance,
    bench_base_kernels,
    bench_composite_expression
);
criterion_main!(benches);
