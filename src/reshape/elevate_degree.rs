use std::iter::repeat_n;

use nalgebra::DVector;

use crate::curve::Spline;
use crate::knot::KnotVector;
use crate::misc::{points_equal, FloatingPoint, Result};

impl<T: FloatingPoint> Spline<T> {
    /// Raise the degree of the spline by `amount` without changing its shape
    ///
    /// The spline is decomposed into Bezier segments which are elevated one by one.
    /// Neighbouring segments whose end points lie within `epsilon` share a control point afterwards.
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let spline = Spline::try_new(
    ///     2,
    ///     2,
    ///     vec![dvector![0., 0.], dvector![1., 2.], dvector![2., 0.], dvector![3., 1.]],
    ///     None,
    /// ).unwrap();
    /// let elevated = spline.try_elevate_degree(1, 1e-5).unwrap();
    /// assert_eq!(elevated.degree(), 3);
    /// assert_eq!(elevated.knots().to_vec(), vec![0., 0., 0., 0., 0.5, 0.5, 0.5, 1., 1., 1., 1.]);
    /// assert_relative_eq!(elevated.point_at(0.3).unwrap(), spline.point_at(0.3).unwrap(), epsilon = 1e-12);
    /// ```
    pub fn try_elevate_degree(&self, amount: usize, epsilon: T) -> Result<Self> {
        if amount == 0 {
            return Ok(self.clone());
        }

        let beziers = self.try_to_beziers()?;
        let order = beziers.order();
        let degree = beziers.degree() + amount;
        let knots = beziers.knots();

        let mut control_points: Vec<DVector<T>> = vec![];
        let mut elevated_knots = vec![];
        for (i, segment) in beziers.control_points().chunks_exact(order).enumerate() {
            let elevated = elevate_bezier(segment, amount);
            let start = knots[i * order];
            match control_points.last() {
                Some(last) if points_equal(last, &elevated[0], epsilon) => {
                    elevated_knots.extend(repeat_n(start, degree));
                    control_points.extend(elevated.into_iter().skip(1));
                }
                _ => {
                    elevated_knots.extend(repeat_n(start, degree + 1));
                    control_points.extend(elevated);
                }
            }
        }
        elevated_knots.extend(repeat_n(knots.last(), degree + 1));

        #[cfg(feature = "log")]
        log::debug!(
            "elevated degree {} to {} with {} control points",
            self.degree(),
            degree,
            control_points.len()
        );

        Ok(Spline::new_unchecked(
            degree,
            self.dimension(),
            self.is_rational(),
            control_points,
            KnotVector::new(elevated_knots),
        ))
    }
}

/// Elevate the degree of a single Bezier segment `amount` times
fn elevate_bezier<T: FloatingPoint>(
    control_points: &[DVector<T>],
    amount: usize,
) -> Vec<DVector<T>> {
    (0..amount).fold(control_points.to_vec(), |points, _| {
        let n = points.len();
        let denom = T::from_count(n);
        (0..=n)
            .map(|i| {
                if i == 0 {
                    points[0].clone()
                } else if i == n {
                    points[n - 1].clone()
                } else {
                    let a = T::from_count(i) / denom;
                    &points[i - 1] * a + &points[i] * (T::one() - a)
                }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn elevated_line_has_evenly_spaced_control_points() {
        let line = Spline::try_new(1, 1, vec![dvector![0.], dvector![3.]], None).unwrap();
        let cubic = line.try_elevate_degree(2, 1e-5).unwrap();
        assert_eq!(cubic.degree(), 3);
        let coordinates = cubic.control_points().iter().map(|p| p[0]).collect::<Vec<_>>();
        assert_relative_eq!(coordinates.as_slice(), [0., 1., 2., 3.].as_slice());
    }

    #[test]
    fn gaps_keep_separate_segments() {
        let spline = Spline::try_from_slice(
            1,
            1,
            &[0., 1., 2., 3.],
            Some(vec![0., 0., 0.5, 0.5, 1., 1.]),
        )
        .unwrap();
        let elevated = spline.try_elevate_degree(1, 1e-5).unwrap();
        assert_eq!(elevated.num_control_points(), 6);
        assert_eq!(
            elevated.knots().to_vec(),
            vec![0., 0., 0., 0.5, 0.5, 0.5, 1., 1., 1.]
        );
        let evaluation = elevated.evaluate(0.5).unwrap();
        assert!(evaluation.is_discontinuous());
    }

    #[test]
    fn rational_shape_is_preserved() {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let arc = Spline::try_new_rational(
            2,
            2,
            vec![dvector![1., 0.], dvector![1., 1.], dvector![0., 1.]],
            vec![1., w, 1.],
            None,
        )
        .unwrap();
        let elevated = arc.try_elevate_degree(2, 1e-5).unwrap();
        assert!(elevated.is_rational());
        for u in arc.uniform_knot_seq(9) {
            assert_relative_eq!(elevated.point_at(u).unwrap().norm(), 1., epsilon = 1e-12);
        }
    }
}
