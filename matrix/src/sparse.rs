use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use itertools::Itertools;
use mm_scalar::Scalar;
use rand::Rng;
use rand::seq::index;
use tracing::instrument;

use crate::dense::RowMajorMatrix;
use crate::{CsrError, Matrix};

/// A sparse matrix stored in the compressed sparse row format.
///
/// Row `r` owns the entries `row_ptr[r]..row_ptr[r + 1]` of `values` and `col_indices`. Within a
/// row, column indices are strictly increasing and less than `width`. Stored zeros are allowed
/// but never produced by this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrMatrix<T> {
    width: usize,

    /// Nonzero entries, row-major then by column.
    values: Vec<T>,

    /// The column of each entry in `values`.
    col_indices: Vec<usize>,

    /// Start offset of each row, followed by `values.len()`.
    row_ptr: Vec<usize>,
}

impl<T: Scalar> CsrMatrix<T> {
    /// Assembles a matrix from its raw arrays, checking every structural invariant.
    pub fn try_new(
        width: usize,
        values: Vec<T>,
        col_indices: Vec<usize>,
        row_ptr: Vec<usize>,
    ) -> Result<Self, CsrError> {
        validate(width, &values, &col_indices, &row_ptr)?;
        Ok(Self {
            width,
            values,
            col_indices,
            row_ptr,
        })
    }

    /// Re-encodes a dense matrix, keeping only its nonzero entries.
    #[instrument(level = "debug", skip_all, fields(dims = %dense.dimensions()))]
    pub fn from_dense(dense: &RowMajorMatrix<T>) -> Self {
        let mut builder = CsrBuilder::new(dense.width());
        for row in dense.rows() {
            for (col, &val) in row.iter().enumerate() {
                if !val.is_zero() {
                    builder.push(col, val);
                }
            }
            builder.finish_row();
        }
        builder.build()
    }

    /// Expands back to a dense matrix.
    #[must_use]
    pub fn to_dense(&self) -> RowMajorMatrix<T> {
        let mut dense = RowMajorMatrix::zeros(self.height(), self.width);
        for r in 0..self.height() {
            let row = dense.row_slice_mut(r);
            for (col, val) in self.sparse_row(r) {
                row[col] = val;
            }
        }
        dense
    }

    #[inline]
    fn row_range(&self, r: usize) -> Range<usize> {
        debug_assert!(r < self.height());
        self.row_ptr[r]..self.row_ptr[r + 1]
    }

    /// The stored `(col, value)` pairs of row `r`, in increasing column order.
    #[inline]
    pub fn sparse_row(&self, r: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let range = self.row_range(r);
        self.col_indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// A `rows x cols` matrix with `floor(rows * cols * (1 - sparsity))` nonzero entries drawn
    /// from `[1, 100]`, placed at distinct uniformly random positions.
    ///
    /// # Panics
    /// Panics if `cols` is zero or `sparsity` is outside `[0, 1]`.
    pub fn rand_with_sparsity<R: Rng>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        sparsity: f64,
    ) -> Self {
        assert_ne!(cols, 0, "a matrix must have at least one column");
        assert!(
            (0.0..=1.0).contains(&sparsity),
            "sparsity {sparsity} outside [0, 1]"
        );
        let total = rows * cols;
        let nonzeros = (total as f64 * (1.0 - sparsity)) as usize;

        let mut positions = index::sample(rng, total, nonzeros.min(total)).into_vec();
        positions.sort_unstable();

        let mut builder = CsrBuilder::new(cols);
        let mut positions = positions.into_iter().peekable();
        for r in 0..rows {
            while let Some(pos) = positions.next_if(|&pos| pos / cols == r) {
                builder.push(pos % cols, T::from_u8(rng.random_range(1..=100)));
            }
            builder.finish_row();
        }
        builder.build()
    }
}

impl<T: Scalar> Matrix<T> for CsrMatrix<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.row_ptr.len() - 1
    }

    fn get(&self, r: usize, c: usize) -> T {
        let range = self.row_range(r);
        self.col_indices[range.clone()]
            .binary_search(&c)
            .map_or(T::ZERO, |i| self.values[range.start + i])
    }
}

fn validate<T>(
    width: usize,
    values: &[T],
    col_indices: &[usize],
    row_ptr: &[usize],
) -> Result<(), CsrError> {
    let (&first, &last) = row_ptr
        .first()
        .zip(row_ptr.last())
        .ok_or(CsrError::EmptyRowPtr)?;
    if first != 0 {
        return Err(CsrError::RowPtrStart(first));
    }
    if values.len() != col_indices.len() {
        return Err(CsrError::LengthMismatch {
            values: values.len(),
            col_indices: col_indices.len(),
        });
    }
    if last != values.len() {
        return Err(CsrError::RowPtrEnd {
            expected: values.len(),
            found: last,
        });
    }
    if let Some(row) = row_ptr.iter().tuple_windows().position(|(a, b)| a > b) {
        return Err(CsrError::RowPtrDecreasing { row });
    }
    for (row, (&start, &end)) in row_ptr.iter().tuple_windows().enumerate() {
        let cols = &col_indices[start..end];
        if let Some(&col) = cols.iter().find(|&&col| col >= width) {
            return Err(CsrError::ColumnOutOfBounds { row, col, width });
        }
        if cols.iter().tuple_windows().any(|(a, b)| a >= b) {
            return Err(CsrError::UnsortedColumns { row });
        }
    }
    Ok(())
}

/// Appends entries row by row into a [`CsrMatrix`].
///
/// Entries of a row must be pushed in strictly increasing column order. This is checked in debug
/// builds only; callers own the invariant.
#[derive(Debug)]
pub struct CsrBuilder<T> {
    width: usize,
    values: Vec<T>,
    col_indices: Vec<usize>,
    row_ptr: Vec<usize>,
}

impl<T: Scalar> CsrBuilder<T> {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            values: Vec::new(),
            col_indices: Vec::new(),
            row_ptr: vec![0],
        }
    }

    #[must_use]
    pub fn with_capacity(width: usize, rows: usize, nnz: usize) -> Self {
        let mut row_ptr = Vec::with_capacity(rows + 1);
        row_ptr.push(0);
        Self {
            width,
            values: Vec::with_capacity(nnz),
            col_indices: Vec::with_capacity(nnz),
            row_ptr,
        }
    }

    #[inline]
    pub fn push(&mut self, col: usize, val: T) {
        debug_assert!(col < self.width);
        debug_assert!(
            self.col_indices.len() == self.row_start()
                || self.col_indices.last().is_some_and(|&last| last < col),
            "column {col} pushed out of order"
        );
        self.values.push(val);
        self.col_indices.push(col);
    }

    /// Closes the current row. Rows with no pushed entries are empty.
    #[inline]
    pub fn finish_row(&mut self) {
        self.row_ptr.push(self.values.len());
    }

    fn row_start(&self) -> usize {
        self.row_ptr.last().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn build(self) -> CsrMatrix<T> {
        let Self {
            width,
            values,
            col_indices,
            row_ptr,
        } = self;
        debug_assert_eq!(validate(width, &values, &col_indices, &row_ptr), Ok(()));
        CsrMatrix {
            width,
            values,
            col_indices,
            row_ptr,
        }
    }
}
