pub mod align;
pub mod spline_morph;


use crate::misc::{FloatingPoint, Result};

/// A trait for blending an object into another object of the same kind.
///
/// Both objects are first brought into a compatible form,
/// then their defining data is interpolated linearly.
pub trait Morph<T: FloatingPoint>
where
    Self: Sized,
{
    type Output;

    /// Blend `self` into `target`
    /// `t = 0` gives the shape of `self`, `t = 1` the shape of `target`.
    /// `epsilon` is the tolerance used while making the objects compatible.
    fn try_morph(&self, target: &Self, t: T, epsilon: T) -> Result<Self::Output>;
}
