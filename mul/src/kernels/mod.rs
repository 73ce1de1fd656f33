//! Dense kernels. Each one accumulates a contiguous range of output rows into a caller-provided
//! block and knows nothing about threads.

mod cache_blocked;
mod standard;
mod vectorized;

pub use cache_blocked::*;
pub use standard::*;
pub use vectorized::*;

#[cfg(test)]
pub(crate) mod testing {
    use mm_matrix::Matrix;
    use mm_matrix::dense::RowMajorMatrix;
    use mm_scalar::Scalar;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::Kernel;

    /// Runs `kernel` over every row of `a` on the calling thread.
    pub(crate) fn run_full<T: Scalar>(
        kernel: Kernel,
        a: &RowMajorMatrix<T>,
        b: &RowMajorMatrix<T>,
    ) -> RowMajorMatrix<T> {
        let mut out = RowMajorMatrix::zeros(a.height(), b.width());
        kernel.run(a.as_view(), b.as_view(), out.as_view_mut(), 0..a.height());
        out
    }

    /// Textbook product computed through `Matrix::get`, independent of every kernel.
    pub(crate) fn naive<T: Scalar>(a: &RowMajorMatrix<T>, b: &RowMajorMatrix<T>) -> RowMajorMatrix<T> {
        let mut out = RowMajorMatrix::zeros(a.height(), b.width());
        for i in 0..a.height() {
            for j in 0..b.width() {
                out.row_slice_mut(i)[j] =
                    (0..a.width()).fold(T::ZERO, |acc, k| acc.mul_add(a.get(i, k), b.get(k, j)));
            }
        }
        out
    }

    pub(crate) fn rand_pair<T: Scalar>(
        seed: u64,
        m: usize,
        k: usize,
        n: usize,
    ) -> (RowMajorMatrix<T>, RowMajorMatrix<T>) {
        let mut rng = SmallRng::seed_from_u64(seed);
        (
            RowMajorMatrix::rand(&mut rng, m, k),
            RowMajorMatrix::rand(&mut rng, k, n),
        )
    }

    /// Shapes whose sides are not multiples of 8 or of the tile sizes under test.
    pub(crate) const AWKWARD_SHAPES: [(usize, usize, usize); 6] = [
        (1, 1, 1),
        (3, 5, 7),
        (13, 17, 11),
        (9, 8, 15),
        (70, 65, 67),
        (2, 130, 9),
    ];
}
