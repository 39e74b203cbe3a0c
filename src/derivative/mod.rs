use nalgebra::DVector;

use crate::curve::Spline;
use crate::knot::KnotVector;
use crate::misc::{
    knot_epsilon, knots_equal, point_epsilon, points_equal, weight_epsilon, FloatingPoint, Result,
    SplineError,
};

impl<T: FloatingPoint> Spline<T> {
    /// Compute the first derivative of the spline
    ///
    /// Interior knots of full multiplicity are merged if the adjacent control points
    /// coincide within the point tolerance.
    /// Rational splines are derived in homogeneous space; the result is a non-rational
    /// spline whose dimension is one higher than the dimension of the input.
    /// # Failures
    /// - if the degree is zero
    /// - if the spline has a gap at an interior knot
    ///
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    ///
    /// let line = Spline::try_from_slice(1, 2, &[1., -2., 3., 6.], None).unwrap();
    /// let derivative = line.try_derive().unwrap();
    /// assert_eq!(derivative.degree(), 0);
    /// assert_eq!(derivative.control_points().to_vec(), vec![dvector![2., 8.]]);
    /// assert_eq!(derivative.knots().to_vec(), vec![0., 1.]);
    /// ```
    pub fn try_derive(&self) -> Result<Self> {
        self.try_derive_with(1, Some(point_epsilon()))
    }

    /// Compute the `n`-th derivative of the spline
    /// `epsilon` is the largest gap tolerated at interior knots of full multiplicity,
    /// `None` merges them regardless of the gap.
    pub fn try_derive_with(&self, n: usize, epsilon: Option<T>) -> Result<Self> {
        (0..n).try_fold(self.clone(), |spline, _| spline.derive_once(epsilon))
    }

    /// Evaluate the first derivative of the curve at a parameter
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let line = Spline::try_from_slice(1, 2, &[1., -2., 3., 6.], None).unwrap();
    /// assert_relative_eq!(line.try_tangent_at(0.3).unwrap(), dvector![2., 8.]);
    /// ```
    pub fn try_tangent_at(&self, u: T) -> Result<DVector<T>> {
        let derivative = self.try_derive()?;
        self.tangent_with(&derivative, u)
    }

    /// Evaluate the first derivative of the cartesian curve with a precomputed derivative
    /// Rational splines apply the quotient rule to the homogeneous derivative.
    pub(crate) fn tangent_with(&self, derivative: &Spline<T>, u: T) -> Result<DVector<T>> {
        let d = derivative.point_at(u)?;
        if !self.is_rational() {
            return Ok(d);
        }

        let evaluation = self.evaluate(u)?;
        let dim = self.dimension();
        let a = evaluation.stored_result();
        let w = a[dim];
        if w.abs() < weight_epsilon() {
            return Err(SplineError::DegenerateWeight {
                parameter: u.as_f64(),
                weight: w.as_f64(),
            });
        }
        let c = a.rows(0, dim) / w;
        Ok((d.rows(0, dim) - c * d[dim]) / w)
    }

    fn derive_once(&self, epsilon: Option<T>) -> Result<Self> {
        let degree = self.degree();
        if degree == 0 {
            return Err(SplineError::DegreeTooLowToDerive { degree });
        }

        let (control_points, knots) = self.merge_full_multiplicity_knots(epsilon)?;

        let d = T::from_count(degree);
        let mut derived = control_points
            .iter()
            .zip(control_points.iter().skip(1))
            .enumerate()
            .map(|(i, (p0, p1))| {
                let span = knots[i + degree + 1] - knots[i + 1];
                (span >= knot_epsilon()).then(|| (p1 - p0) * (d / span))
            })
            .collect::<Vec<_>>();
        let mut knots = knots[1..knots.len() - 1].to_vec();

        // a zero span at either end only touches the domain at its bound
        if derived.len() > 1 && matches!(derived.first(), Some(None)) {
            derived.remove(0);
            knots.remove(0);
        }
        if derived.len() > 1 && matches!(derived.last(), Some(None)) {
            derived.pop();
            knots.pop();
        }
        let derived = derived
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                p.ok_or(SplineError::NonDifferentiable {
                    knot: knots[i].as_f64(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let knots = KnotVector::new(knots);

        Ok(Spline::new_unchecked(
            degree - 1,
            self.stride(),
            false,
            derived,
            knots,
        ))
    }

    /// Remove one of the two control points meeting at each interior knot of full multiplicity
    /// together with one copy of the knot
    fn merge_full_multiplicity_knots(
        &self,
        epsilon: Option<T>,
    ) -> Result<(Vec<DVector<T>>, Vec<T>)> {
        let degree = self.degree();
        let mut control_points = self.control_points().to_vec();
        let mut knots = self.knots().to_vec();

        let mut i = 2 * degree + 1;
        while i + degree + 1 < knots.len() {
            if knots_equal(knots[i], knots[i - degree]) {
                let left = &control_points[i - degree - 1];
                let right = &control_points[i - degree];
                if let Some(epsilon) = epsilon {
                    if !points_equal(left, right, epsilon) {
                        return Err(SplineError::NonDifferentiable {
                            knot: knots[i].as_f64(),
                        });
                    }
                }

                #[cfg(feature = "log")]
                log::trace!("merge control points at knot {}", knots[i].as_f64());

                control_points.remove(i - degree);
                knots.remove(i);
                i += degree - 1;
            }
            i += 1;
        }

        Ok((control_points, knots))
    }
}
