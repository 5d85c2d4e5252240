//! Batched pairwise evaluation
//!
//! Inputs of shape `[..., N, D]` and `[..., N', D]` are broadcast over their
//! leading dimensions and folded into a stack of matrices. A per-matrix
//! closure produces each `[N, N']` block, and the stack is unfolded back into
//! `[..., N, N']`.

use crate::inputs::{CovarianceInputs, PairLayout};
use crate::numeric::KernelFloat;
use crate::{Error, Result};
use ndarray::{Array2, Array3, ArrayD, ArrayView2, ArrayViewD, IxDyn};

/// Apply `f` to every broadcast `(X, X')` matrix pair
///
/// `f` receives the two `[N, D]` / `[N', D]` blocks of one batch entry and
/// must return an `[N, N']` block.
pub fn pairwise<T, F>(inputs: &CovarianceInputs<'_, T>, f: F) -> Result<ArrayD<T>>
where
    T: KernelFloat,
    F: Fn(ArrayView2<'_, T>, ArrayView2<'_, T>) -> Array2<T>,
{
    let layout = inputs.layout()?;
    let x = stack(inputs.x(), &layout, layout.n)?;
    let mut out = Array3::<T>::zeros((layout.batch_size(), layout.n, layout.n2));

    if inputs.is_self_covariance() {
        for (mut block, a) in out.outer_iter_mut().zip(x.outer_iter()) {
            block.assign(&f(a.clone(), a));
        }
    } else {
        let x2 = stack(inputs.x2(), &layout, layout.n2)?;
        for ((mut block, a), b) in out.outer_iter_mut().zip(x.outer_iter()).zip(x2.outer_iter()) {
            block.assign(&f(a, b));
        }
    }

    unfold(out, &layout)
}

/// Fill a covariance of the evaluation's output shape from its indices
///
/// `f` receives the row and column of each entry; leading batch positions are
/// ignored. Used by kernels whose value depends on shape only.
pub fn from_positions<T, F>(layout: &PairLayout, f: F) -> ArrayD<T>
where
    T: KernelFloat,
    F: Fn(usize, usize) -> T,
{
    let shape = layout.output_shape();
    let rank = shape.len();
    ArrayD::from_shape_fn(IxDyn(&shape), |idx| f(idx[rank - 2], idx[rank - 1]))
}

/// Copy the upper triangle of a square block onto its lower triangle
///
/// Self-covariance blocks computed through matrix products can differ in the
/// last bit between `[i, j]` and `[j, i]`; after this call they are equal.
pub fn mirror_upper<T: KernelFloat>(block: &mut Array2<T>) {
    let n = block.nrows().min(block.ncols());
    for i in 1..n {
        for j in 0..i {
            block[[i, j]] = block[[j, i]];
        }
    }
}

/// Broadcast one input to the full leading shape and fold it to `[B, n, D]`
fn stack<T: KernelFloat>(
    x: &ArrayViewD<'_, T>,
    layout: &PairLayout,
    n: usize,
) -> Result<Array3<T>> {
    let mut target = layout.leading.clone();
    target.push(n);
    target.push(layout.n_features);

    let broadcast = x
        .broadcast(IxDyn(&target))
        .ok_or_else(|| Error::incompatible_batches(x.shape(), &layout.leading))?;
    let folded = broadcast
        .to_shape((layout.batch_size(), n, layout.n_features))
        .map_err(|e| Error::ShapeMismatch(format!("cannot fold input batch: {e}")))?;
    Ok(folded.into_owned())
}

fn unfold<T: KernelFloat>(stacked: Array3<T>, layout: &PairLayout) -> Result<ArrayD<T>> {
    stacked
        .into_shape(IxDyn(&layout.output_shape()))
        .map_err(|e| Error::ShapeMismatch(format!("cannot unfold covariance batch: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};

    fn dot_t(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) -> Array2<f64> {
        a.dot(&b.t())
    }

    #[test]
    fn test_unbatched_cross() {
        let x = array![[1.0, 0.0], [0.0, 2.0]].into_dyn();
        let x2 = array![[3.0, 1.0]].into_dyn();
        let out = pairwise(&CovarianceInputs::cross(x.view(), x2.view()), dot_t).unwrap();
        assert_eq!(out.shape(), &[2, 1]);
        assert_eq!(out[[0, 0]], 3.0);
        assert_eq!(out[[1, 0]], 2.0);
    }

    #[test]
    fn test_leading_broadcast() {
        // x: [2, 1, 3, 1], x2: [4, 2, 1] -> leading [2, 4]
        let x = Array::from_shape_fn(IxDyn(&[2, 1, 3, 1]), |i| (i[0] * 10 + i[2]) as f64);
        let x2 = Array::from_shape_fn(IxDyn(&[4, 2, 1]), |i| (i[0] + 1) as f64);
        let out = pairwise(&CovarianceInputs::cross(x.view(), x2.view()), dot_t).unwrap();
        assert_eq!(out.shape(), &[2, 4, 3, 2]);
        // batch (1, 3): x row 2 of batch 1 is 12, x2 rows of batch 3 are 4
        assert_eq!(out[[1, 3, 2, 0]], 48.0);
        assert_eq!(out[[0, 0, 1, 1]], 1.0);
    }

    #[test]
    fn test_self_covariance_batches() {
        let x = Array::from_shape_fn(IxDyn(&[3, 2, 1]), |i| (i[0] + i[1]) as f64);
        let out = pairwise(&CovarianceInputs::self_covariance(x.view()), dot_t).unwrap();
        assert_eq!(out.shape(), &[3, 2, 2]);
        assert_eq!(out[[2, 0, 1]], 6.0);
        assert_eq!(out[[2, 1, 0]], 6.0);
    }

    #[test]
    fn test_mirror_upper() {
        let mut block = array![[1.0, 2.0, 3.0], [2.0000001, 5.0, 6.0], [3.0, 6.5, 9.0]];
        mirror_upper(&mut block);
        assert_eq!(block, array![[1.0, 2.0, 3.0], [2.0, 5.0, 6.0], [3.0, 6.0, 9.0]]);
    }

    #[test]
    fn test_from_positions() {
        let layout = PairLayout {
            leading: vec![2],
            n: 2,
            n2: 3,
            n_features: 1,
        };
        let out: ArrayD<f64> = from_positions(&layout, |i, j| if i == j { 1.0 } else { 0.0 });
        assert_eq!(out.shape(), &[2, 2, 3]);
        assert_eq!(out[[1, 1, 1]], 1.0);
        assert_eq!(out[[1, 1, 2]], 0.0);
    }
}
