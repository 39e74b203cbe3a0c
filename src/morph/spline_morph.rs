use crate::curve::Spline;
use crate::knot::KnotVector;
use crate::misc::{FloatingPoint, Result};

use super::Morph;

impl<T: FloatingPoint> Morph<T> for Spline<T> {
    type Output = Spline<T>;

    /// Blend the spline into the target spline
    ///
    /// The splines are aligned with [`Spline::try_align`], then their control points
    /// and knots are interpolated linearly. `t` is clamped to [0, 1].
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let bottom = Spline::try_new(1, 2, vec![dvector![0., 0.], dvector![2., 0.]], None).unwrap();
    /// let top = Spline::try_new(1, 2, vec![dvector![0., 2.], dvector![2., 2.]], None).unwrap();
    /// let middle = bottom.try_morph(&top, 0.5, 1e-5).unwrap();
    /// assert_relative_eq!(middle.point_at(0.5).unwrap(), dvector![1., 1.]);
    /// ```
    fn try_morph(&self, target: &Self, t: T, epsilon: T) -> Result<Self::Output> {
        let (origin, target) = self.try_align(target, epsilon)?;
        let t = t.clamp(T::zero(), T::one());
        let s = T::one() - t;

        let control_points = origin
            .control_points_iter()
            .zip(target.control_points_iter())
            .map(|(a, b)| a * s + b * t)
            .collect();
        let knots = origin
            .knots()
            .iter()
            .zip(target.knots().iter())
            .map(|(a, b)| *a * s + *b * t)
            .collect::<KnotVector<T>>();

        Ok(origin.with_parts(control_points, knots))
    }
}
