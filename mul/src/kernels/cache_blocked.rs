use core::ops::Range;

use mm_matrix::Matrix;
use mm_matrix::dense::{RowMajorMatrixView, RowMajorMatrixViewMut};
use mm_scalar::Scalar;

/// Tiled product over `rows`.
///
/// The row range, the columns of `b` and the shared dimension are walked in square tiles of side
/// `block_size`. Each `(j, k)` tile is finished for every row of the current row tile before the
/// next one starts, so the slice of `b` it touches stays hot in cache. Tiles at the far edges are
/// clamped to the matrix extents.
///
/// # Panics
/// Panics if `block_size` is zero.
pub fn multiply_cache_blocked<T: Scalar>(
    a: RowMajorMatrixView<'_, T>,
    b: RowMajorMatrixView<'_, T>,
    mut out: RowMajorMatrixViewMut<'_, T>,
    rows: Range<usize>,
    block_size: usize,
) {
    assert_ne!(block_size, 0);
    debug_assert_eq!(a.width(), b.height());
    debug_assert_eq!(out.height(), rows.len());

    let inner = a.width();
    let n = b.width();

    for i0 in rows.clone().step_by(block_size) {
        let i_end = (i0 + block_size).min(rows.end);
        for j0 in (0..n).step_by(block_size) {
            let j_end = (j0 + block_size).min(n);
            for k0 in (0..inner).step_by(block_size) {
                let k_end = (k0 + block_size).min(inner);
                for i in i0..i_end {
                    let a_tile = &a.row_slice(i)[k0..k_end];
                    let out_row = out.row_slice_mut(i - rows.start);
                    for j in j0..j_end {
                        let sum = a_tile
                            .iter()
                            .zip(k0..k_end)
                            .fold(T::ZERO, |acc, (&a_ik, k)| acc.mul_add(a_ik, b.get(k, j)));
                        out_row[j] = out_row[j].wrapping_add(sum);
                    }
                }
            }
        }
    }
}
