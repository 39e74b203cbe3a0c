use nalgebra::DVector;

use crate::curve::{chunk_coordinates, check_dimensions, Spline};
use crate::knot::KnotType;
use crate::misc::{FloatingPoint, Result, SplineError};

use super::thomas::solve_tridiagonal;

impl<T: FloatingPoint> Spline<T> {
    /// Interpolate the points with a natural cubic spline
    ///
    /// The result is a cubic spline made of `points.len() - 1` Bezier segments,
    /// each segment starting and ending at consecutive points.
    /// # Failures
    /// - if less than two points are given
    /// - if the points do not share a positive dimension
    ///
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let points = vec![dvector![1., -1.], dvector![-1., 2.], dvector![1., 4.]];
    /// let spline = Spline::try_interpolate_cubic_natural(&points).unwrap();
    /// assert_eq!(spline.degree(), 3);
    /// assert_eq!(spline.num_control_points(), 8);
    /// assert_relative_eq!(spline.point_at(0.5).unwrap(), points[1].clone(), epsilon = 1e-12);
    /// ```
    pub fn try_interpolate_cubic_natural(points: &[DVector<T>]) -> Result<Self> {
        let dimension = interpolation_dimension(points)?;
        let n = points.len();

        let b_spline = if n == 2 {
            points.to_vec()
        } else {
            let interior = n - 2;
            let mut rhs = points[1..n - 1]
                .iter()
                .map(|p| p * T::from_constant(6.))
                .collect::<Vec<_>>();
            rhs[0] -= &points[0];
            rhs[interior - 1] -= &points[n - 1];

            let solved = if interior == 1 {
                vec![&rhs[0] * T::from_constant(0.25)]
            } else {
                let ones = vec![T::one(); interior];
                let fours = vec![T::from_constant(4.); interior];
                solve_tridiagonal(&ones, &fours, &ones, &rhs)?
            };

            std::iter::once(points[0].clone())
                .chain(solved)
                .chain(std::iter::once(points[n - 1].clone()))
                .collect()
        };

        bezier_spline(dimension, relaxed_uniform_cubic(&b_spline))
    }

    /// Interpolate a flat list of coordinates with a natural cubic spline
    pub fn try_interpolate_cubic_natural_slice(
        coordinates: &[T],
        dimension: usize,
    ) -> Result<Self> {
        let points = chunk_coordinates(coordinates, dimension)?;
        Self::try_interpolate_cubic_natural(&points)
    }
}

/// Check the input of an interpolation and return the dimension of the points
pub(crate) fn interpolation_dimension<T: FloatingPoint>(points: &[DVector<T>]) -> Result<usize> {
    if points.len() < 2 {
        return Err(SplineError::InsufficientPoints {
            given: points.len(),
            required: 2,
        });
    }
    let dimension = points[0].len();
    check_dimensions(points, dimension)?;
    Ok(dimension)
}

/// Convert the control points of a uniform cubic B-spline into Bezier segments
/// The ends are relaxed so that the curve starts and ends at the first and last control points.
fn relaxed_uniform_cubic<T: FloatingPoint>(b: &[DVector<T>]) -> Vec<DVector<T>> {
    let n = b.len();
    let sixth = T::from_constant(1. / 6.);
    let third = T::from_constant(1. / 3.);
    let two_thirds = T::from_constant(2. / 3.);

    let s = (0..n)
        .map(|i| {
            if i == 0 || i == n - 1 {
                b[i].clone()
            } else {
                &b[i - 1] * sixth + &b[i] * two_thirds + &b[i + 1] * sixth
            }
        })
        .collect::<Vec<_>>();

    (0..n - 1)
        .flat_map(|i| {
            [
                s[i].clone(),
                &b[i] * two_thirds + &b[i + 1] * third,
                &b[i] * third + &b[i + 1] * two_thirds,
                s[i + 1].clone(),
            ]
        })
        .collect()
}

/// Assemble cubic Bezier segments into a single spline
pub(crate) fn bezier_spline<T: FloatingPoint>(
    dimension: usize,
    control_points: Vec<DVector<T>>,
) -> Result<Spline<T>> {
    Spline::try_with_knot_type(3, dimension, control_points, KnotType::Beziers)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn two_points_give_a_straight_segment() {
        let spline =
            Spline::try_interpolate_cubic_natural(&[dvector![0., 0.], dvector![3., 6.]]).unwrap();
        let expected = [
            dvector![0., 0.],
            dvector![1., 2.],
            dvector![2., 4.],
            dvector![3., 6.],
        ];
        spline
            .control_points()
            .iter()
            .zip(expected.iter())
            .for_each(|(a, b)| assert_relative_eq!(*a, *b, epsilon = 1e-12));
        assert_eq!(spline.knots().to_vec(), vec![0., 0., 0., 0., 1., 1., 1., 1.]);
    }

    #[test]
    fn too_few_points() {
        assert_eq!(
            Spline::<f64>::try_interpolate_cubic_natural(&[dvector![1., 1.]]),
            Err(SplineError::InsufficientPoints {
                given: 1,
                required: 2
            })
        );
        assert!(matches!(
            Spline::<f64>::try_interpolate_cubic_natural(&[]),
            Err(SplineError::InsufficientPoints { given: 0, .. })
        ));
    }

    #[test]
    fn mixed_dimensions() {
        assert_eq!(
            Spline::try_interpolate_cubic_natural(&[dvector![1., 1.], dvector![1., 1., 1.]]),
            Err(SplineError::DimensionMismatch {
                expected: 2,
                given: 3
            })
        );
    }

    #[test]
    fn second_derivative_vanishes_at_the_ends() {
        let points = [
            dvector![0., 0.],
            dvector![1., 2.],
            dvector![3., 1.],
            dvector![4., 4.],
        ];
        let spline = Spline::try_interpolate_cubic_natural(&points).unwrap();
        let second = spline.try_derive_with(2, Some(1e-9)).unwrap();
        let (start, end) = second.knots_domain();
        assert_relative_eq!(second.point_at(start).unwrap().norm(), 0., epsilon = 1e-9);
        assert_relative_eq!(second.point_at(end).unwrap().norm(), 0., epsilon = 1e-9);
    }
}
