use alloc::vec;

use mm_matrix::Matrix;
use mm_matrix::dense::RowMajorMatrix;
use mm_matrix::sparse::{CsrBuilder, CsrMatrix};
use mm_maybe_rayon::prelude::*;
use mm_scalar::Scalar;
use tracing::instrument;

fn assert_order<T: Scalar>(name: &str, m: &impl Matrix<T>, order: usize) {
    assert!(
        m.height() == order && m.width() == order,
        "{name} is {}, expected {order}x{order}",
        m.dimensions()
    );
}

/// Row-broadcast product of a dense `A` and a CSR `B`, both `order x order`.
///
/// Output row `i` is built from the stored entries of row `i` of `B` only: each `(col, val)` adds
/// `A[i][col] * val` to every cell of the row. The result therefore has constant rows, and equals
/// `A * B` only in special cases (for instance when both are diagonal). Cost is proportional to
/// the number of stored entries of `B` plus the output size.
///
/// This is not the conventional product of `A` and the dense form of `B`; use
/// [`multiply`](crate::multiply) on [`CsrMatrix::to_dense`] for that.
///
/// # Panics
/// The caller supplies `order`. Panics if either matrix is not `order x order`.
#[instrument(level = "debug", skip_all, fields(order = order, nnz = b.nnz()))]
pub fn mul_dense_csr<T: Scalar>(
    a: &RowMajorMatrix<T>,
    b: &CsrMatrix<T>,
    order: usize,
) -> RowMajorMatrix<T> {
    assert_order("A", a, order);
    assert_order("B", b, order);

    let mut out = RowMajorMatrix::zeros(order, order);
    out.par_rows_mut().enumerate().for_each(|(i, out_row)| {
        let a_row = a.row_slice(i);
        let scale = b
            .sparse_row(i)
            .fold(T::ZERO, |acc, (col, val)| acc.mul_add(a_row[col], val));
        out_row.fill(scale);
    });
    out
}

/// Compute `C = A * B` for CSR `A` and `B`, both `order x order`, returning CSR.
///
/// Row-wise sparse accumulation (Gustavson's method): for every stored `(k, a_ik)` of row `i` of
/// `A`, row `k` of `B` is scaled by `a_ik` and summed into a dense scratch row, which is then
/// compacted into the output in column order. One scratch row is reused across all rows. Sums that
/// cancel to zero are not stored.
///
/// # Panics
/// The caller supplies `order`. Panics if either matrix is not `order x order`.
#[instrument(level = "debug", skip_all, fields(order = order, a_nnz = a.nnz(), b_nnz = b.nnz()))]
pub fn mul_csr_csr<T: Scalar>(a: &CsrMatrix<T>, b: &CsrMatrix<T>, order: usize) -> CsrMatrix<T> {
    assert_order("A", a, order);
    assert_order("B", b, order);

    let mut builder = CsrBuilder::with_capacity(order, order, a.nnz().max(b.nnz()));
    let mut scratch = vec![T::ZERO; order];
    for i in 0..order {
        for (k, a_ik) in a.sparse_row(i) {
            for (j, b_kj) in b.sparse_row(k) {
                scratch[j] = scratch[j].mul_add(a_ik, b_kj);
            }
        }
        for (j, acc) in scratch.iter_mut().enumerate() {
            if !acc.is_zero() {
                builder.push(j, *acc);
                *acc = T::ZERO;
            }
        }
        builder.finish_row();
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::mul_dense_dense;

    fn square_a() -> RowMajorMatrix<i32> {
        RowMajorMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap()
    }

    fn diagonal(d0: i32, d1: i32) -> CsrMatrix<i32> {
        CsrMatrix::try_new(2, vec![d0, d1], vec![0, 1], vec![0, 1, 2]).unwrap()
    }

    #[test]
    fn dense_sparse_broadcasts_rows() {
        // Row 0 sees only (0, 5): 1 * 5 in every column. Row 1 sees only (1, 7): 4 * 7.
        let c = mul_dense_csr(&square_a(), &diagonal(5, 7), 2);
        assert_eq!(c.to_rows(), vec![vec![5, 5], vec![28, 28]]);

        // Not the conventional product.
        let conventional = mul_dense_dense(&square_a(), &diagonal(5, 7).to_dense()).unwrap();
        assert_eq!(conventional.to_rows(), vec![vec![5, 14], vec![15, 28]]);
        assert_ne!(c, conventional);
    }

    #[test]
    fn dense_sparse_sums_row_entries() {
        let b = CsrMatrix::try_new(3, vec![2, 3, 1], vec![0, 2, 1], vec![0, 2, 2, 3]).unwrap();
        let a = RowMajorMatrix::from_rows(vec![vec![1, 10, 100], vec![4, 5, 6], vec![7, 8, 9]])
            .unwrap();
        let c = mul_dense_csr(&a, &b, 3);
        assert_eq!(
            c.to_rows(),
            vec![vec![302, 302, 302], vec![0, 0, 0], vec![8, 8, 8]]
        );
    }

    #[test]
    #[should_panic]
    fn dense_sparse_rejects_wrong_order() {
        let _ = mul_dense_csr(&square_a(), &diagonal(1, 1), 3);
    }

    #[test]
    fn sparse_sparse_diagonal() {
        let c = mul_csr_csr(&diagonal(1, 3), &diagonal(5, 7), 2);
        assert_eq!(c.values(), &[5, 21]);
        assert_eq!(c.col_indices(), &[0, 1]);
        assert_eq!(c.row_ptr(), &[0, 1, 2]);
    }

    #[test]
    fn sparse_sparse_matches_dense_product() {
        let mut rng = SmallRng::seed_from_u64(21);
        for (order, sparsity) in [(1, 0.0), (5, 0.5), (16, 0.8), (33, 0.95), (20, 1.0)] {
            let a = CsrMatrix::<i32>::rand_with_sparsity(&mut rng, order, order, sparsity);
            let b = CsrMatrix::<i32>::rand_with_sparsity(&mut rng, order, order, sparsity);
            let expected = mul_dense_dense(&a.to_dense(), &b.to_dense()).unwrap();
            let c = mul_csr_csr(&a, &b, order);
            assert_eq!(c.to_dense(), expected, "order {order}, sparsity {sparsity}");
            assert_eq!(c, CsrMatrix::from_dense(&expected));
        }
    }

    #[test]
    fn sparse_sparse_drops_cancelled_sums() {
        // [[1, 1]] * [[1], [-1]] padded to 2x2.
        let a = CsrMatrix::try_new(2, vec![1, 1], vec![0, 1], vec![0, 2, 2]).unwrap();
        let b = CsrMatrix::try_new(2, vec![1, -1], vec![0, 0], vec![0, 1, 2]).unwrap();
        let c = mul_csr_csr(&a, &b, 2);
        assert_eq!(c.nnz(), 0);
        assert_eq!(c.row_ptr(), &[0, 0, 0]);
    }

    #[test]
    fn sparse_sparse_output_rows_sorted() {
        let mut rng = SmallRng::seed_from_u64(5);
        let a = CsrMatrix::<i64>::rand_with_sparsity(&mut rng, 24, 24, 0.7);
        let b = CsrMatrix::<i64>::rand_with_sparsity(&mut rng, 24, 24, 0.7);
        let c = mul_csr_csr(&a, &b, 24);
        let rebuilt = CsrMatrix::try_new(
            24,
            c.values().to_vec(),
            c.col_indices().to_vec(),
            c.row_ptr().to_vec(),
        );
        assert_eq!(rebuilt, Ok(c.clone()));
        assert!(c.values().iter().all(|v| *v != 0));
    }
}
