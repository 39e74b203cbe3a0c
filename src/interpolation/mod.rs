pub mod catmull_rom;
pub mod cubic_natural;
mod thomas;

pub use catmull_rom::*;

use nalgebra::DVector;

use crate::curve::Spline;
use crate::misc::{FloatingPoint, Result};

/// Family of the interpolating curve
#[derive(Clone, Debug, PartialEq)]
pub enum InterpolationStyle<T: FloatingPoint> {
    /// Cubic spline with vanishing second derivatives at both ends
    CubicNatural,
    CatmullRom(CatmullRomOptions<T>),
}

impl<T: FloatingPoint> Default for InterpolationStyle<T> {
    fn default() -> Self {
        Self::CubicNatural
    }
}

/// Interpolation trait
pub trait Interpolation {
    type Input: ?Sized;
    type Style;
    type Output;
    fn interpolate(input: &Self::Input, style: Self::Style) -> Self::Output;
}

impl<T: FloatingPoint> Interpolation for Spline<T> {
    type Input = [DVector<T>];
    type Style = InterpolationStyle<T>;
    type Output = Result<Spline<T>>;

    /// Interpolate the points with a curve of the given style
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    ///
    /// let points = vec![dvector![0., 0.], dvector![1., 2.], dvector![3., 1.]];
    /// let natural = Spline::<f64>::interpolate(&points, InterpolationStyle::CubicNatural).unwrap();
    /// let catmull_rom = Spline::<f64>::interpolate(
    ///     &points,
    ///     InterpolationStyle::CatmullRom(CatmullRomOptions::default()),
    /// ).unwrap();
    /// assert_eq!(natural.num_control_points(), catmull_rom.num_control_points());
    /// ```
    fn interpolate(input: &Self::Input, style: Self::Style) -> Self::Output {
        match style {
            InterpolationStyle::CubicNatural => Spline::try_interpolate_cubic_natural(input),
            InterpolationStyle::CatmullRom(options) => {
                Spline::try_interpolate_catmull_rom(input, options)
            }
        }
    }
}
