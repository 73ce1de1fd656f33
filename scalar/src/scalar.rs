use core::fmt::{Debug, Display};
use core::hash::Hash;

use crate::packed::{Lanes8, PackedLanes};

/// A fixed-width signed integer usable as a matrix entry.
///
/// All arithmetic wraps on overflow, matching the native two's complement behaviour of the
/// underlying type. Because wrapping addition is associative and commutative, any summation order
/// produces the same result, which is what allows the blocked and vectorized kernels to agree
/// bit-for-bit with the reference product.
pub trait Scalar:
    'static + Copy + Default + Send + Sync + PartialEq + Eq + Hash + Debug + Display
{
    const ZERO: Self;
    const ONE: Self;

    /// The packed representation used by the vectorized kernel.
    type Lanes: PackedLanes<Scalar = Self>;

    #[must_use]
    fn wrapping_add(self, rhs: Self) -> Self;

    #[must_use]
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Converts a small unsigned value. Values outside the range of `Self` wrap.
    #[must_use]
    fn from_u8(n: u8) -> Self;

    #[must_use]
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Returns `self + a * b`.
    #[must_use]
    #[inline]
    fn mul_add(self, a: Self, b: Self) -> Self {
        self.wrapping_add(a.wrapping_mul(b))
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
type I32Lanes = crate::packed::PackedI32Avx2;

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
type I32Lanes = Lanes8<i32>;

macro_rules! impl_scalar {
    ($($t:ty => $lanes:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                type Lanes = $lanes;

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$t>::wrapping_add(self, rhs)
                }

                #[inline]
                fn wrapping_mul(self, rhs: Self) -> Self {
                    <$t>::wrapping_mul(self, rhs)
                }

                #[inline]
                fn from_u8(n: u8) -> Self {
                    n as $t
                }
            }
        )*
    };
}

impl_scalar! {
    i8 => Lanes8<i8>,
    i16 => Lanes8<i16>,
    i32 => I32Lanes,
    i64 => Lanes8<i64>,
    i128 => Lanes8<i128>,
}
