use core::fmt::Debug;

use crate::Scalar;

/// Number of lanes in every packed representation.
pub const LANES: usize = 8;

/// A fixed-width vector of [`LANES`] scalars.
///
/// Implementations must agree lane-for-lane with the scalar wrapping arithmetic of
/// [`Scalar`], so that swapping one backend for another never changes a result.
pub trait PackedLanes: 'static + Copy + Send + Sync + Debug {
    type Scalar: Scalar;

    const WIDTH: usize = LANES;

    #[must_use]
    fn zero() -> Self;

    /// Copies `value` into every lane.
    #[must_use]
    fn broadcast(value: Self::Scalar) -> Self;

    /// Loads exactly [`LANES`] contiguous scalars.
    ///
    /// # Panics
    /// Panics if `slice.len() != LANES`.
    #[must_use]
    fn load(slice: &[Self::Scalar]) -> Self;

    /// Loads up to [`LANES`] scalars, filling the remaining lanes with zero.
    ///
    /// # Panics
    /// Panics if `slice.len() > LANES`.
    #[must_use]
    #[inline]
    fn load_partial(slice: &[Self::Scalar]) -> Self {
        if slice.len() == LANES {
            return Self::load(slice);
        }
        let mut buf = [<Self::Scalar as Scalar>::ZERO; LANES];
        buf[..slice.len()].copy_from_slice(slice);
        Self::load(&buf)
    }

    /// Returns `self + a * b`, lane-wise.
    #[must_use]
    fn mul_add(self, a: Self, b: Self) -> Self;

    #[must_use]
    fn to_array(self) -> [Self::Scalar; LANES];

    /// Adds the first `out.len()` lanes into `out`.
    ///
    /// # Panics
    /// Panics if `out.len() > LANES`.
    #[inline]
    fn add_into(self, out: &mut [Self::Scalar]) {
        assert!(out.len() <= LANES, "{} lanes requested", out.len());
        for (o, x) in out.iter_mut().zip(self.to_array()) {
            *o = o.wrapping_add(x);
        }
    }
}
