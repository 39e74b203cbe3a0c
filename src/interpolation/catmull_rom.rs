use nalgebra::DVector;

use crate::curve::Spline;
use crate::misc::{point_epsilon, points_equal, FloatingPoint, Result, SplineError};

use super::cubic_natural::{bezier_spline, interpolation_dimension};

/// Options for the Catmull-Rom interpolation
#[derive(Clone, Debug, PartialEq)]
pub struct CatmullRomOptions<T: FloatingPoint> {
    /// Knot parameterization exponent, clamped to [0, 1]
    /// 0 gives the uniform, 0.5 the centripetal and 1 the chordal variant.
    pub alpha: T,
    /// Phantom point before the first point, mirrored from the second point if `None`
    pub first: Option<DVector<T>>,
    /// Phantom point after the last point, mirrored from the second to last point if `None`
    pub last: Option<DVector<T>>,
    /// Consecutive points closer than this are treated as one point
    pub epsilon: T,
}

impl<T: FloatingPoint> Default for CatmullRomOptions<T> {
    fn default() -> Self {
        Self {
            alpha: T::from_constant(0.5),
            first: None,
            last: None,
            epsilon: point_epsilon(),
        }
    }
}

impl<T: FloatingPoint> Spline<T> {
    /// Interpolate the points with a Catmull-Rom spline converted into cubic Bezier segments
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let points = vec![dvector![0., 0.], dvector![1., 1.], dvector![2., 0.], dvector![2., 0.], dvector![3., 1.]];
    /// let spline = Spline::try_interpolate_catmull_rom(&points, CatmullRomOptions::default()).unwrap();
    /// // the duplicate point is dropped
    /// assert_eq!(spline.num_control_points(), 12);
    /// assert_relative_eq!(spline.point_at(1. / 3.).unwrap(), points[1].clone(), epsilon = 1e-9);
    /// ```
    pub fn try_interpolate_catmull_rom(
        points: &[DVector<T>],
        options: CatmullRomOptions<T>,
    ) -> Result<Self> {
        let dimension = interpolation_dimension(points)?;
        let alpha = options.alpha.clamp(T::zero(), T::one());
        let epsilon = options.epsilon.max(T::zero());

        let mut unique: Vec<DVector<T>> = Vec::with_capacity(points.len());
        for p in points {
            match unique.last() {
                Some(last) if points_equal(last, p, epsilon) => {}
                _ => unique.push(p.clone()),
            }
        }
        let n = unique.len();
        if n < 2 {
            return Err(SplineError::InsufficientPoints {
                given: n,
                required: 2,
            });
        }

        let phantom = |given: Option<DVector<T>>, end: &DVector<T>, next: &DVector<T>| {
            match given {
                Some(p) if p.len() != dimension => Err(SplineError::DimensionMismatch {
                    expected: dimension,
                    given: p.len(),
                }),
                Some(p) if !points_equal(&p, end, epsilon) => Ok(p),
                _ => Ok(end * T::from_constant(2.) - next),
            }
        };
        let first = phantom(options.first, &unique[0], &unique[1])?;
        let last = phantom(options.last, &unique[n - 1], &unique[n - 2])?;

        let third = T::from_constant(1. / 3.);
        let control_points = (0..n - 1)
            .flat_map(|i| {
                let p0 = if i == 0 { &first } else { &unique[i - 1] };
                let p1 = &unique[i];
                let p2 = &unique[i + 1];
                let p3 = if i + 2 == n { &last } else { &unique[i + 2] };

                let t1 = (p1 - p0).norm().powf(alpha);
                let t2 = t1 + (p2 - p1).norm().powf(alpha);
                let t3 = t2 + (p3 - p2).norm().powf(alpha);

                let c1 = (t2 - t1) / t2;
                let c2 = t1 / t2;
                let d1 = (t3 - t2) / (t3 - t1);
                let d2 = (t2 - t1) / (t3 - t1);

                let v0 = (p1 - p0) / t1;
                let v1 = (p2 - p1) / (t2 - t1);
                let v2 = (p3 - p2) / (t3 - t2);
                let m1 = (&v0 * c1 + &v1 * c2) * (t2 - t1);
                let m2 = (&v1 * d1 + &v2 * d2) * (t2 - t1);

                [
                    p1.clone(),
                    p1 + m1 * third,
                    p2 - m2 * third,
                    p2.clone(),
                ]
            })
            .collect();

        bezier_spline(dimension, control_points)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn collinear_uniform_points_stay_on_the_line() {
        let points = [dvector![0., 0.], dvector![1., 1.], dvector![2., 2.]];
        let options = CatmullRomOptions {
            alpha: 0.,
            ..Default::default()
        };
        let spline = Spline::try_interpolate_catmull_rom(&points, options).unwrap();
        for p in spline.sample(25).unwrap() {
            assert_relative_eq!(p[0], p[1], epsilon = 1e-12);
        }
    }

    #[test]
    fn duplicates_only_are_insufficient() {
        let points = [dvector![1., 1.], dvector![1., 1.]];
        assert_eq!(
            Spline::try_interpolate_catmull_rom(&points, CatmullRomOptions::default()),
            Err(SplineError::InsufficientPoints {
                given: 1,
                required: 2
            })
        );
    }

    #[test]
    fn phantom_points_shape_the_ends() {
        let points = [dvector![0., 0.], dvector![1., 0.]];
        let options = CatmullRomOptions {
            first: Some(dvector![0., -1.]),
            ..Default::default()
        };
        let spline = Spline::try_interpolate_catmull_rom(&points, options).unwrap();
        // the start tangent leans towards the phantom point
        assert!(spline.control_points()[1][1] > 0.);
        assert_relative_eq!(spline.control_points()[3].clone(), dvector![1., 0.]);
    }
}
