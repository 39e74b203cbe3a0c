use itertools::Itertools;

use crate::curve::Spline;
use crate::misc::{knots_equal, FloatingPoint, Result, SplineError};

impl<T: FloatingPoint> Spline<T> {
    /// Insert the knot `u` `n` times without changing the shape of the curve
    /// Returns the refined spline and the index of the last inserted knot.
    /// # Failures
    /// - if `u` is outside of the domain
    /// - if the multiplicity of `u` would exceed the order
    ///
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
    /// let (refined, index) = spline.try_insert_knot(0.5, 1).unwrap();
    /// assert_eq!(index, 3);
    /// assert_eq!(refined.num_control_points(), 4);
    /// assert_eq!(refined.knots().to_vec(), vec![0., 0., 0., 0.5, 1., 1., 1.]);
    /// assert_relative_eq!(refined.point_at(0.3).unwrap(), spline.point_at(0.3).unwrap(), epsilon = 1e-12);
    /// ```
    pub fn try_insert_knot(&self, u: T, n: usize) -> Result<(Self, usize)> {
        let span = self.knots().find_snapped(self.degree(), u)?;
        let evaluation = self.evaluate_span(span)?;
        let k = span.index();
        let s = span.multiplicity();
        let order = self.order();

        if s + n > order {
            return Err(SplineError::MultiplicityExceeded {
                knot: span.parameter().as_f64(),
                multiplicity: s + n,
                order,
            });
        }
        if n == 0 {
            return Ok((self.clone(), k));
        }

        #[cfg(feature = "log")]
        log::trace!(
            "insert knot {} x{} at span {} (multiplicity {})",
            span.parameter().as_f64(),
            n,
            k,
            s
        );

        let degree = self.degree();
        let net = evaluation.net();
        let cps = self.control_points();
        let fst = k - degree;
        let lst = k - s;

        // left diagonal, bottom row of the net, right diagonal
        let mut control_points = Vec::with_capacity(cps.len() + n);
        control_points.extend_from_slice(&cps[..fst]);
        control_points.extend(net[..n].iter().map(|level| level[0].clone()));
        if let Some(level) = net.get(n) {
            control_points.extend(level.iter().cloned());
        }
        control_points.extend(net[..n].iter().rev().filter_map(|level| level.last().cloned()));
        control_points.extend_from_slice(&cps[lst + 1..]);

        let knots = self.knots().inserted(k, span.parameter(), n);
        Ok((self.with_parts(control_points, knots), k + n))
    }

    /// Insert each of the given knots without changing the shape of the curve
    /// The knots must be sorted in non-decreasing order. Equal knots are inserted together.
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    ///
    /// let spline = Spline::try_new(
    ///     3,
    ///     2,
    ///     vec![dvector![0., 0.], dvector![1., 2.], dvector![2., -1.], dvector![3., 0.]],
    ///     None,
    /// ).unwrap();
    /// let refined = spline.try_insert_knots(&[0.25, 0.5, 0.5]).unwrap();
    /// assert_eq!(refined.knots().len(), spline.knots().len() + 3);
    /// assert!(spline.try_insert_knots(&[0.5, 0.25]).is_err());
    /// ```
    pub fn try_insert_knots(&self, knots: &[T]) -> Result<Self> {
        if let Some((a, b)) = knots.iter().tuple_windows().find(|(a, b)| b < a) {
            return Err(SplineError::InvalidKnotVector(format!(
                "knots to insert are not sorted: {} follows {}",
                b.as_f64(),
                a.as_f64()
            )));
        }

        let groups = knots.iter().fold(vec![], |mut acc: Vec<(T, usize)>, u| {
            match acc.last_mut() {
                Some((last, count)) if knots_equal(*last, *u) => *count += 1,
                _ => acc.push((*u, 1)),
            }
            acc
        });

        groups
            .into_iter()
            .try_fold(self.clone(), |spline, (u, n)| {
                spline.try_insert_knot(u, n).map(|(refined, _)| refined)
            })
    }

    /// Raise the multiplicity of `u` to the order of the spline
    /// Returns the refined spline and the index of the last copy of `u`.
    /// A knot that already has full multiplicity leaves the spline unchanged.
    pub fn try_split_knot(&self, u: T) -> Result<(Self, usize)> {
        let span = self.knots().find_snapped(self.degree(), u)?;
        if span.multiplicity() == self.order() {
            Ok((self.clone(), span.index()))
        } else {
            self.try_insert_knot(u, span.insertions(self.degree()) + 1)
        }
    }
}
