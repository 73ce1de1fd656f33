use core::ops::Range;

use mm_matrix::Matrix;
use mm_matrix::dense::{RowMajorMatrixView, RowMajorMatrixViewMut};
use mm_scalar::{LANES, PackedLanes, Scalar};

/// Vectorized product over `rows`.
///
/// For each output row, the columns are taken [`LANES`] at a time. Each entry `a[i][k]` is
/// broadcast across a packed register and multiplied against `b[k][j..j + LANES]`; the running
/// packed sum is added into the output once the shared dimension is exhausted. The last group of a
/// row may be narrower than [`LANES`], in which case the loads are zero padded and only the valid
/// lanes are written back.
///
/// On `x86_64` with AVX2, `i32` uses `ymm` registers; other element types and targets use the
/// portable array backend with identical results.
pub fn multiply_vectorized<T: Scalar>(
    a: RowMajorMatrixView<'_, T>,
    b: RowMajorMatrixView<'_, T>,
    mut out: RowMajorMatrixViewMut<'_, T>,
    rows: Range<usize>,
) {
    debug_assert_eq!(a.width(), b.height());
    debug_assert_eq!(out.height(), rows.len());

    for (i, out_row) in rows.zip(out.rows_mut()) {
        let a_row = a.row_slice(i);
        for (group, out_lanes) in out_row.chunks_mut(LANES).enumerate() {
            let cols = group * LANES..group * LANES + out_lanes.len();
            let sum = a_row
                .iter()
                .enumerate()
                .fold(T::Lanes::zero(), |acc, (k, &a_ik)| {
                    let b_lanes = T::Lanes::load_partial(&b.row_slice(k)[cols.clone()]);
                    acc.mul_add(T::Lanes::broadcast(a_ik), b_lanes)
                });
            sum.add_into(out_lanes);
        }
    }
}
