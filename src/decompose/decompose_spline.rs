use itertools::Itertools;

use crate::curve::Spline;
use crate::knot::KnotVector;
use crate::misc::{knots_equal, FloatingPoint, Result};

use super::Decompose;

impl<T: FloatingPoint> Spline<T> {
    /// Convert the spline into a sequence of Bezier segments stored in a single spline
    ///
    /// Every distinct knot of the result has a multiplicity of `degree + 1`,
    /// so each block of `degree + 1` control points is a Bezier segment.
    /// Knots outside of the domain of an unclamped spline are cut off.
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let spline = Spline::try_new(
    ///     2,
    ///     1,
    ///     vec![dvector![0.], dvector![1.], dvector![3.], dvector![4.]],
    ///     None,
    /// ).unwrap();
    /// let beziers = spline.try_to_beziers().unwrap();
    /// assert_eq!(beziers.knots().to_vec(), vec![0., 0., 0., 0.5, 0.5, 0.5, 1., 1., 1.]);
    /// assert_eq!(beziers.num_control_points(), 6);
    /// assert_relative_eq!(beziers.point_at(0.7).unwrap(), spline.point_at(0.7).unwrap(), epsilon = 1e-12);
    /// ```
    pub fn try_to_beziers(&self) -> Result<Self> {
        let degree = self.degree();
        let order = self.order();
        let (min, max) = self.knots_domain();
        let mut worker = self.clone();

        if !knots_equal(worker.knots().first(), min) {
            let (split, k) = worker.try_split_knot(min)?;
            let skip = k - degree;
            worker = split.with_parts(
                split.control_points()[skip..].to_vec(),
                KnotVector::new(split.knots().as_slice()[skip..].to_vec()),
            );
        }

        if !knots_equal(worker.knots().last(), max) {
            let (split, k) = worker.try_split_knot(max)?;
            let num_control_points = k + 1 - order;
            worker = split.with_parts(
                split.control_points()[..num_control_points].to_vec(),
                KnotVector::new(split.knots().as_slice()[..=k].to_vec()),
            );
        }

        let mut k = order;
        while k < worker.knots().len() - order {
            let (split, last) = worker.try_split_knot(worker.knots()[k])?;
            worker = split;
            k = last + 1;
        }

        #[cfg(feature = "log")]
        log::debug!(
            "decomposed spline of {} control points into {} bezier segments",
            self.num_control_points(),
            worker.num_control_points() / order
        );

        Ok(worker)
    }

    /// Decompose the spline into separate Bezier segments of the same degree
    pub fn try_decompose_bezier_segments(&self) -> Result<Vec<Self>> {
        let beziers = self.try_to_beziers()?;
        let order = beziers.order();
        let knots = beziers.knots().as_slice();

        let segments = beziers
            .control_points()
            .chunks_exact(order)
            .enumerate()
            .map(|(i, control_points)| {
                let start = i * order;
                let knots = knots[start..start + order * 2].to_vec();
                beziers.with_parts(control_points.to_vec(), KnotVector::new(knots))
            })
            .collect_vec();
        Ok(segments)
    }
}

impl<T: FloatingPoint> Decompose for Spline<T> {
    type Output = Vec<Spline<T>>;

    /// Decompose the curve into a set of Bezier segments of the same degree
    fn try_decompose(&self) -> Result<Self::Output> {
        self.try_decompose_bezier_segments()
    }
}
