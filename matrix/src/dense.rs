use alloc::vec;
use alloc::vec::Vec;

use mm_maybe_rayon::prelude::*;
use mm_scalar::Scalar;
use rand::Rng;

use crate::{Matrix, MatrixError};

/// A dense matrix stored in row-major form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMajorMatrix<T> {
    /// All values, stored in row-major order.
    pub values: Vec<T>,
    pub width: usize,
}

impl<T: Scalar> RowMajorMatrix<T> {
    /// # Panics
    /// Panics if `width` is zero or does not divide `values.len()`.
    #[must_use]
    pub fn new(values: Vec<T>, width: usize) -> Self {
        assert_ne!(width, 0, "a matrix must have at least one column");
        assert_eq!(values.len() % width, 0);
        Self { values, width }
    }

    /// # Panics
    /// Panics if `width` is zero.
    #[must_use]
    pub fn zeros(height: usize, width: usize) -> Self {
        Self::new(vec![T::ZERO; height * width], width)
    }

    /// Builds a matrix from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MatrixError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(MatrixError::Ragged {
                row,
                expected: width,
                found: r.len(),
            });
        }
        Ok(Self::new(rows.into_iter().flatten().collect(), width))
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    pub fn row_slice(&self, r: usize) -> &[T] {
        debug_assert!(r < self.height());
        &self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn row_slice_mut(&mut self, r: usize) -> &mut [T] {
        debug_assert!(r < self.height());
        &mut self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.values.chunks_exact(self.width)
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        self.values.chunks_exact_mut(self.width)
    }

    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = &mut [T]> {
        self.values.par_chunks_exact_mut(self.width)
    }

    #[must_use]
    pub fn as_view(&self) -> RowMajorMatrixView<'_, T> {
        RowMajorMatrixView {
            values: &self.values,
            width: self.width,
        }
    }

    pub fn as_view_mut(&mut self) -> RowMajorMatrixViewMut<'_, T> {
        RowMajorMatrixViewMut {
            values: &mut self.values,
            width: self.width,
        }
    }

    /// A matrix with entries drawn uniformly from `[0, 100)`.
    pub fn rand<R: Rng>(rng: &mut R, rows: usize, cols: usize) -> Self {
        let values = (0..rows * cols)
            .map(|_| T::from_u8(rng.random_range(0..100)))
            .collect();
        Self::new(values, cols)
    }
}

impl<T: Scalar> Matrix<T> for RowMajorMatrix<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.values.len() / self.width
    }

    #[inline]
    fn get(&self, r: usize, c: usize) -> T {
        debug_assert!(c < self.width);
        self.values[r * self.width + c]
    }
}

/// A borrowed, read-only dense matrix.
#[derive(Copy, Clone, Debug)]
pub struct RowMajorMatrixView<'a, T> {
    pub values: &'a [T],
    pub width: usize,
}

impl<'a, T: Scalar> RowMajorMatrixView<'a, T> {
    #[must_use]
    pub fn new(values: &'a [T], width: usize) -> Self {
        assert_ne!(width, 0, "a matrix must have at least one column");
        debug_assert_eq!(values.len() % width, 0);
        Self { values, width }
    }

    #[inline]
    pub fn row_slice(&self, r: usize) -> &'a [T] {
        debug_assert!(r < self.height());
        &self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + use<'a, T> {
        self.values.chunks_exact(self.width)
    }
}

impl<T: Scalar> Matrix<T> for RowMajorMatrixView<'_, T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.values.len() / self.width
    }

    #[inline]
    fn get(&self, r: usize, c: usize) -> T {
        self.values[r * self.width + c]
    }
}

/// A borrowed, mutable dense matrix. Usually a block of consecutive rows of a larger matrix.
#[derive(Debug)]
pub struct RowMajorMatrixViewMut<'a, T> {
    pub values: &'a mut [T],
    pub width: usize,
}

impl<'a, T: Scalar> RowMajorMatrixViewMut<'a, T> {
    #[must_use]
    pub fn new(values: &'a mut [T], width: usize) -> Self {
        assert_ne!(width, 0, "a matrix must have at least one column");
        debug_assert_eq!(values.len() % width, 0);
        Self { values, width }
    }

    #[inline]
    pub fn row_slice_mut(&mut self, r: usize) -> &mut [T] {
        debug_assert!(r < self.height());
        &mut self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        self.values.chunks_exact_mut(self.width)
    }

    /// Splits off the first `r` rows. The two halves borrow disjoint parts of the buffer for the
    /// full lifetime `'a`, so they can be handed to different workers.
    #[must_use]
    pub fn split_rows(self, r: usize) -> (Self, Self) {
        let Self { values, width } = self;
        let (upper, lower) = values.split_at_mut(r * width);
        (
            Self {
                values: upper,
                width,
            },
            Self {
                values: lower,
                width,
            },
        )
    }
}

impl<T: Scalar> Matrix<T> for RowMajorMatrixViewMut<'_, T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.values.len() / self.width
    }

    #[inline]
    fn get(&self, r: usize, c: usize) -> T {
        self.values[r * self.width + c]
    }
}
