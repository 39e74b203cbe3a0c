use crate::curve::Spline;
use crate::misc::{knot_epsilon, FloatingPoint, Result, SplineError};

impl<T: FloatingPoint> Spline<T> {
    /// Bring two splines into a compatible form without changing their shapes
    ///
    /// Afterwards both splines have the same degree, rationality and number of control points and knots.
    /// The lower degree spline is elevated, knots are inserted into the spline with fewer knots,
    /// and a non-rational spline is made rational if the other one is rational.
    /// # Failures
    /// - if the dimensions differ
    /// - if no knot can be inserted to balance the knot counts
    ///
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    ///
    /// let line = Spline::try_new(1, 2, vec![dvector![0., 0.], dvector![1., 0.]], None).unwrap();
    /// let arch = Spline::try_new(
    ///     3,
    ///     2,
    ///     vec![dvector![0., 0.], dvector![0., 1.], dvector![1., 1.], dvector![2., 1.], dvector![2., 0.]],
    ///     None,
    /// ).unwrap();
    /// let (a, b) = line.try_align(&arch, 1e-5).unwrap();
    /// assert_eq!(a.degree(), b.degree());
    /// assert_eq!(a.knots().len(), b.knots().len());
    /// assert_eq!(a.num_control_points(), b.num_control_points());
    /// ```
    pub fn try_align(&self, other: &Self, epsilon: T) -> Result<(Self, Self)> {
        if self.dimension() != other.dimension() {
            return Err(SplineError::DimensionMismatch {
                expected: self.dimension(),
                given: other.dimension(),
            });
        }

        let (a, b) = match (self.is_rational(), other.is_rational()) {
            (false, true) => (self.to_rational(), other.clone()),
            (true, false) => (self.clone(), other.to_rational()),
            _ => (self.clone(), other.clone()),
        };

        let a = a.try_elevate_degree(b.degree().saturating_sub(a.degree()), epsilon)?;
        let b = b.try_elevate_degree(a.degree().saturating_sub(b.degree()), epsilon)?;

        let (na, nb) = (a.knots().len(), b.knots().len());
        let (a, b) = if na < nb {
            (a.try_fill_knots(nb - na)?, b)
        } else {
            let b = b.try_fill_knots(na - nb)?;
            (a, b)
        };

        #[cfg(feature = "log")]
        log::debug!(
            "aligned splines to degree {} with {} knots",
            a.degree(),
            a.knots().len()
        );

        Ok((a, b))
    }

    /// Insert `missing` knots spread evenly over the domain
    /// Knots that cannot take another copy without breaking continuity are skipped over.
    fn try_fill_knots(&self, missing: usize) -> Result<Self> {
        if missing == 0 {
            return Ok(self.clone());
        }

        let degree = self.degree();
        let limit = degree.max(1);
        let (min, max) = self.knots_domain();
        let count = T::from_count(missing);
        let width = (max - min) / count;
        let shift = width * T::from_constant(0.5);
        let step = knot_epsilon::<T>() * T::from_constant(5.);

        (0..missing).try_fold(self.clone(), |spline, i| {
            let mut u = min + width * T::from_count(i) + shift;
            while u < max {
                let span = spline.knots().find_snapped(degree, u)?;
                if span.multiplicity() < limit {
                    return spline
                        .try_insert_knot(span.parameter(), 1)
                        .map(|(refined, _)| refined);
                }
                u += step;
            }
            Err(SplineError::NoResult(format!(
                "no knot left to insert after {}",
                (min + width * T::from_count(i) + shift).as_f64()
            )))
        })
    }
}
