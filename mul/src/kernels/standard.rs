use core::ops::Range;

use mm_matrix::Matrix;
use mm_matrix::dense::{RowMajorMatrixView, RowMajorMatrixViewMut};
use mm_scalar::Scalar;

/// The reference kernel: for each output cell, a dot product over the shared dimension in
/// increasing `k`, added into the cell.
pub fn multiply_standard<T: Scalar>(
    a: RowMajorMatrixView<'_, T>,
    b: RowMajorMatrixView<'_, T>,
    mut out: RowMajorMatrixViewMut<'_, T>,
    rows: Range<usize>,
) {
    debug_assert_eq!(a.width(), b.height());
    debug_assert_eq!(out.height(), rows.len());
    debug_assert_eq!(out.width(), b.width());

    for (i, out_row) in rows.zip(out.rows_mut()) {
        let a_row = a.row_slice(i);
        for (j, cell) in out_row.iter_mut().enumerate() {
            let sum = a_row
                .iter()
                .enumerate()
                .fold(T::ZERO, |acc, (k, &a_ik)| acc.mul_add(a_ik, b.get(k, j)));
            *cell = cell.wrapping_add(sum);
        }
    }
}

#[cfg(test)]
mod tests {
    use mm_matrix::dense::RowMajorMatrix;

    use super::*;
    use crate::Kernel;
    use crate::kernels::testing::{AWKWARD_SHAPES, naive, rand_pair, run_full};

    #[test]
    fn two_by_two() {
        let a = RowMajorMatrix::new(alloc::vec![1, 2, 3, 4], 2);
        let b = RowMajorMatrix::new(alloc::vec![5, 6, 7, 8], 2);
        let c = run_full::<i32>(Kernel::Standard, &a, &b);
        assert_eq!(c.values, [19, 22, 43, 50]);
    }

    #[test]
    fn matches_naive() {
        for (seed, &(m, k, n)) in AWKWARD_SHAPES.iter().enumerate() {
            let (a, b) = rand_pair::<i64>(seed as u64, m, k, n);
            assert_eq!(run_full(Kernel::Standard, &a, &b), naive(&a, &b));
        }
    }

    #[test]
    fn only_touches_requested_rows() {
        let (a, b) = rand_pair::<i32>(9, 6, 4, 5);
        let mut out = RowMajorMatrix::zeros(2, 5);
        multiply_standard(a.as_view(), b.as_view(), out.as_view_mut(), 3..5);
        let full = naive(&a, &b);
        assert_eq!(out.row_slice(0), full.row_slice(3));
        assert_eq!(out.row_slice(1), full.row_slice(4));
    }
}
