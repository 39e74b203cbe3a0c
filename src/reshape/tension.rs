use crate::curve::Spline;
use crate::misc::{FloatingPoint, Result};

impl<T: FloatingPoint> Spline<T> {
    /// Pull the control points towards the line between the first and the last control point
    ///
    /// `beta` is clamped to [0, 1]: 1 keeps the spline as it is, 0 straightens it.
    /// Weights of rational splines are kept.
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let spline = Spline::try_new(
    ///     2,
    ///     2,
    ///     vec![dvector![0., 0.], dvector![1., 2.], dvector![2., 0.]],
    ///     None,
    /// ).unwrap();
    /// let relaxed = spline.try_tension(0.5).unwrap();
    /// assert_relative_eq!(relaxed.control_points()[1], dvector![1., 1.]);
    /// let straight = spline.try_tension(0.).unwrap();
    /// assert_relative_eq!(straight.point_at(0.3).unwrap()[1], 0.);
    /// ```
    pub fn try_tension(&self, beta: T) -> Result<Self> {
        let beta = beta.clamp(T::zero(), T::one());
        let points = self.dehomogenized_control_points()?;
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Ok(self.clone());
        };

        let n = points.len();
        let divisor = T::from_count(n.saturating_sub(1).max(1));
        let control_points = points
            .iter()
            .zip(self.weights())
            .enumerate()
            .map(|(i, (p, w))| {
                let line = first + (last - first) * (T::from_count(i) / divisor);
                let q = p * beta + line * (T::one() - beta);
                if self.is_rational() {
                    (q * w).push(w)
                } else {
                    q
                }
            })
            .collect();

        Ok(self.with_parts(control_points, self.knots().clone()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn full_tension_keeps_the_spline() {
        let spline = Spline::try_new(
            3,
            3,
            vec![
                dvector![0., 0., 0.],
                dvector![1., 2., 0.],
                dvector![2., -1., 1.],
                dvector![3., 0., 0.],
            ],
            None,
        )
        .unwrap();
        assert_eq!(spline.try_tension(1.).unwrap(), spline);
        // beta above one is clamped
        assert_eq!(spline.try_tension(2.).unwrap(), spline);
    }

    #[test]
    fn rational_weights_survive() {
        let spline = Spline::try_new_rational(
            2,
            2,
            vec![dvector![1., 0.], dvector![1., 1.], dvector![0., 1.]],
            vec![1., 0.5, 1.],
            None,
        )
        .unwrap();
        let straight = spline.try_tension(0.).unwrap();
        assert_eq!(straight.weights(), vec![1., 0.5, 1.]);
        let p = straight.point_at(0.5).unwrap();
        assert_relative_eq!(p[0] + p[1], 1., epsilon = 1e-12);
    }
}
