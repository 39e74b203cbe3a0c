use crate::curve::Spline;
use crate::knot::KnotVector;
use crate::misc::{knots_equal, FloatingPoint, Invertible, Result, SplineError};

/// Split the object into two objects with the given option
pub trait Split
where
    Self: Sized,
{
    type Option;
    fn try_split(&self, option: Self::Option) -> Result<(Self, Self)>;
}

impl<T: FloatingPoint> Split for Spline<T> {
    type Option = T;

    /// Split the curve into two curves before and after the parameter
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let spline = Spline::try_new(
    ///     3,
    ///     2,
    ///     vec![dvector![0., 0.], dvector![1., 2.], dvector![2., -1.], dvector![3., 0.]],
    ///     None,
    /// ).unwrap();
    /// let (left, right) = spline.try_split(0.4).unwrap();
    /// assert_eq!(left.knots_domain(), (0., 0.4));
    /// assert_eq!(right.knots_domain(), (0.4, 1.));
    /// assert_relative_eq!(left.point_at(0.2).unwrap(), spline.point_at(0.2).unwrap(), epsilon = 1e-12);
    /// assert_relative_eq!(right.point_at(0.7).unwrap(), spline.point_at(0.7).unwrap(), epsilon = 1e-12);
    /// ```
    fn try_split(&self, u: T) -> Result<(Self, Self)> {
        let (min, max) = self.knots_domain();
        if knots_equal(u, min) || knots_equal(u, max) {
            return Err(SplineError::EmptyDomain {
                min: u.as_f64(),
                max: u.as_f64(),
            });
        }
        Ok((self.try_sub_spline(min, u)?, self.try_sub_spline(u, max)?))
    }
}

impl<T: FloatingPoint> Spline<T> {
    /// Extract the part of the curve between two parameters
    /// If `u0 > u1` the extracted part is reversed.
    /// # Failures
    /// - if either parameter is outside of the domain
    /// - if the parameters are equal within the knot tolerance
    pub fn try_sub_spline(&self, u0: T, u1: T) -> Result<Self> {
        if knots_equal(u0, u1) {
            return Err(SplineError::EmptyDomain {
                min: u0.as_f64(),
                max: u1.as_f64(),
            });
        }
        let reversed = u0 > u1;
        let (u0, u1) = if reversed { (u1, u0) } else { (u0, u1) };
        let (min, max) = self.knots_domain();

        // validate both ends before any refinement
        self.knots().find(self.degree(), u0)?;
        self.knots().find(self.degree(), u1)?;

        let (worker, k0) = if knots_equal(u0, min) {
            (self.clone(), self.degree())
        } else {
            self.try_split_knot(u0)?
        };
        let (worker, k1) = if knots_equal(u1, max) {
            let last = worker.knots().len() - 1;
            (worker, last)
        } else {
            worker.try_split_knot(u1)?
        };

        let degree = self.degree();
        let order = self.order();
        let c0 = k0 - degree;
        let c1 = k1 - order;
        let control_points = worker.control_points()[c0..=c1].to_vec();
        let knots = KnotVector::new(worker.knots().as_slice()[c0..=k1].to_vec());
        let sub = worker.with_parts(control_points, knots);

        Ok(if reversed { sub.inverse() } else { sub })
    }
}
