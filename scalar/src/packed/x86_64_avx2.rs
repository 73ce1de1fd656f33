//! AVX2 packing for `i32`.

use core::arch::x86_64::{self, __m256i};

use crate::{LANES, PackedLanes};

/// Eight `i32` lanes held in a single `ymm` register.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct PackedI32Avx2(pub __m256i);

impl PackedLanes for PackedI32Avx2 {
    type Scalar = i32;

    #[inline]
    fn zero() -> Self {
        unsafe { Self(x86_64::_mm256_setzero_si256()) }
    }

    #[inline]
    fn broadcast(value: i32) -> Self {
        unsafe { Self(x86_64::_mm256_set1_epi32(value)) }
    }

    #[inline]
    fn load(slice: &[i32]) -> Self {
        assert_eq!(slice.len(), LANES);
        // SAFETY: the slice holds exactly eight `i32`s and `loadu` has no alignment requirement.
        unsafe { Self(x86_64::_mm256_loadu_si256(slice.as_ptr().cast::<__m256i>())) }
    }

    #[inline]
    fn mul_add(self, a: Self, b: Self) -> Self {
        // `mullo` keeps the low 32 bits of each product, which is exactly `i32::wrapping_mul`.
        //      vpmulld  t, a, b
        //      vpaddd   res, acc, t
        unsafe {
            let t = x86_64::_mm256_mullo_epi32(a.0, b.0);
            Self(x86_64::_mm256_add_epi32(self.0, t))
        }
    }

    #[inline]
    fn to_array(self) -> [i32; LANES] {
        let mut buf = [0i32; LANES];
        // SAFETY: `buf` has room for eight `i32`s and `storeu` has no alignment requirement.
        unsafe { x86_64::_mm256_storeu_si256(buf.as_mut_ptr().cast::<__m256i>(), self.0) };
        buf
    }
}
