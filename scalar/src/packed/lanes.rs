use core::array;

use crate::{LANES, PackedLanes, Scalar};

/// Portable packing backed by a plain array.
///
/// This is the fallback for targets without a native vector backend for `T`. The element-wise
/// loops are simple enough that LLVM usually vectorizes them anyway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct Lanes8<T>(pub [T; LANES]);

impl<T: Scalar> Default for Lanes8<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar> PackedLanes for Lanes8<T> {
    type Scalar = T;

    #[inline]
    fn zero() -> Self {
        Self([T::ZERO; LANES])
    }

    #[inline]
    fn broadcast(value: T) -> Self {
        Self([value; LANES])
    }

    #[inline]
    fn load(slice: &[T]) -> Self {
        assert_eq!(slice.len(), LANES);
        Self(array::from_fn(|i| slice[i]))
    }

    #[inline]
    fn mul_add(self, a: Self, b: Self) -> Self {
        Self(array::from_fn(|i| self.0[i].mul_add(a.0[i], b.0[i])))
    }

    #[inline]
    fn to_array(self) -> [T; LANES] {
        self.0
    }
}
