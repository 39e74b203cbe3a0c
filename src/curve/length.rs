use std::cell::RefCell;

use gauss_quad::GaussLegendre;

use crate::misc::{points_equal, FloatingPoint, Result, SplineError};

use super::Spline;

impl<T: FloatingPoint> Spline<T> {
    /// Compute the arc length of the curve
    /// Each Bezier segment is integrated with Gauss-Legendre quadrature.
    /// # Failures
    /// - if the spline cannot be decomposed into Bezier segments
    /// - if a rational segment has a vanishing weight
    ///
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let w = std::f64::consts::FRAC_1_SQRT_2;
    /// let quarter = Spline::try_new_rational(
    ///     2,
    ///     2,
    ///     vec![dvector![1., 0.], dvector![1., 1.], dvector![0., 1.]],
    ///     vec![1., w, 1.],
    ///     None,
    /// ).unwrap();
    /// assert_relative_eq!(quarter.try_length().unwrap(), std::f64::consts::FRAC_PI_2, epsilon = 1e-8);
    /// ```
    pub fn try_length(&self) -> Result<T> {
        if self.degree() == 0 {
            return Ok(T::zero());
        }

        let gauss = GaussLegendre::new(16 + self.degree())
            .map_err(|e| SplineError::NoResult(e.to_string()))?;
        self.try_decompose_bezier_segments()?
            .iter()
            .try_fold(T::zero(), |acc, segment| {
                Ok(acc + segment_length(segment, &gauss)?)
            })
    }

    /// Check if the curve and its derivatives up to `degree - 1` meet at the ends of the domain
    ///
    /// Derivatives of rational splines are compared in homogeneous coordinates.
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    ///
    /// let triangle = Spline::try_new(
    ///     1,
    ///     2,
    ///     vec![dvector![0., 0.], dvector![1., 0.], dvector![0., 1.], dvector![0., 0.]],
    ///     None,
    /// ).unwrap();
    /// assert!(triangle.try_is_closed(1e-5).unwrap());
    /// ```
    pub fn try_is_closed(&self, epsilon: T) -> Result<bool> {
        let (min, max) = self.knots_domain();
        if !points_equal(&self.point_at(min)?, &self.point_at(max)?, epsilon) {
            return Ok(false);
        }

        let mut derivative = self.clone();
        for _ in 1..self.degree() {
            derivative = derivative.try_derive_with(1, None)?;
            let first = derivative.point_at(min)?;
            let last = derivative.point_at(max)?;
            if !points_equal(&first, &last, epsilon) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Integrate the speed of a single Bezier segment over its domain
fn segment_length<T: FloatingPoint>(segment: &Spline<T>, gauss: &GaussLegendre) -> Result<T> {
    let derivative = segment.try_derive_with(1, None)?;
    let (start, end) = segment.knots_domain();
    let failure = RefCell::new(None);

    let length = gauss.integrate(start.as_f64(), end.as_f64(), |x| {
        match segment.tangent_with(&derivative, T::from_constant(x)) {
            Ok(tangent) => tangent.norm().as_f64(),
            Err(e) => {
                failure.borrow_mut().get_or_insert(e);
                0.
            }
        }
    });

    match failure.into_inner() {
        Some(e) => Err(e),
        None => Ok(T::from_constant(length)),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn polyline_length() {
        let polyline = Spline::try_new(
            1,
            2,
            vec![dvector![0., 0.], dvector![3., 4.], dvector![3., 0.]],
            None,
        )
        .unwrap();
        assert_relative_eq!(polyline.try_length().unwrap(), 9., epsilon = 1e-10);
    }

    #[test]
    fn length_agrees_with_dense_chords() {
        let spline = Spline::try_new(
            3,
            2,
            vec![
                dvector![0., 0.],
                dvector![1., 2.],
                dvector![3., -1.],
                dvector![4., 1.],
                dvector![6., 0.],
            ],
            None,
        )
        .unwrap();
        let chords = spline
            .try_chord_lengths(&spline.uniform_knot_seq(5000))
            .unwrap();
        assert_relative_eq!(spline.try_length().unwrap(), chords.total(), epsilon = 1e-4);
    }

    #[test]
    fn open_and_closed_curves() {
        let open = Spline::try_new(
            2,
            2,
            vec![dvector![0., 0.], dvector![1., 1.], dvector![2., 0.]],
            None,
        )
        .unwrap();
        assert!(!open.try_is_closed(1e-5).unwrap());

        // ends meet but the tangents differ
        let kinked = Spline::try_new(
            2,
            2,
            vec![dvector![0., 0.], dvector![1., 1.], dvector![0., 0.]],
            None,
        )
        .unwrap();
        assert!(!kinked.try_is_closed(1e-5).unwrap());
    }
}
