use alloc::string::ToString;
use alloc::vec::Vec;
use core::ops::Range;

use mm_matrix::dense::{RowMajorMatrixView, RowMajorMatrixViewMut};
use mm_maybe_rayon::prelude::*;
use mm_maybe_rayon::run_with_threads;
use mm_scalar::Scalar;
use tracing::debug;

use crate::{Kernel, MulError};

/// Splits `0..rows` into contiguous, non-overlapping ranges, one per worker.
///
/// The worker count is `num_threads` clamped to `1..=rows`. Every worker receives
/// `rows / workers` rows, and the first `rows % workers` workers one more, in row order.
#[must_use]
pub fn partition_rows(rows: usize, num_threads: usize) -> Vec<Range<usize>> {
    let workers = num_threads.clamp(1, rows.max(1));
    let base = rows / workers;
    let extra = rows % workers;

    let mut start = 0;
    (0..workers)
        .map(|w| {
            let len = base + usize::from(w < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Runs `kernel` over every range of `ranges`, each on its own worker, writing into the
/// corresponding rows of `out`. Returns once all workers are done.
///
/// `ranges` must tile `0..out.height()` in order, as produced by [`partition_rows`].
pub(crate) fn run_partitioned<T: Scalar>(
    kernel: Kernel,
    a: RowMajorMatrixView<'_, T>,
    b: RowMajorMatrixView<'_, T>,
    out: RowMajorMatrixViewMut<'_, T>,
    ranges: &[Range<usize>],
) -> Result<(), MulError> {
    let mut blocks = Vec::with_capacity(ranges.len());
    let mut rest = out;
    for range in ranges {
        let (block, tail) = rest.split_rows(range.len());
        blocks.push((range.clone(), block));
        rest = tail;
    }
    debug_assert!(rest.values.is_empty(), "row ranges must cover the output");

    debug!(workers = blocks.len(), ?ranges, "dispatching row ranges");
    run_with_threads(blocks.len(), || {
        blocks
            .into_par_iter()
            .for_each(|(rows, block)| kernel.run(a, b, block, rows));
    })
    .map_err(|e| MulError::WorkerPool(e.to_string()))
}
