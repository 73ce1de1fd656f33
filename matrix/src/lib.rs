//! Dense and sparse integer matrices.

#![no_std]

extern crate alloc;

use core::fmt::{self, Display, Formatter};

use mm_scalar::Scalar;

pub mod dense;
mod error;
pub mod sparse;

pub use error::*;

/// The shape of a matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

pub trait Matrix<T: Scalar> {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Returns the entry at row `r` and column `c`.
    ///
    /// # Panics
    /// May panic if `r` or `c` is out of bounds.
    fn get(&self, r: usize, c: usize) -> T;

    fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }

    fn is_square(&self) -> bool {
        self.width() == self.height()
    }
}
