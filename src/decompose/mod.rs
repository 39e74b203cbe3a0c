pub mod decompose_spline;

use crate::misc::Result;

/// Decompose a curve into a set of curves
pub trait Decompose {
    type Output;
    fn try_decompose(&self) -> Result<Self::Output>;
}
