use itertools::Itertools;
use nalgebra::{DVector, Point3, Vector3};

use crate::curve::Spline;
use crate::misc::{length_zero, FloatingPoint, Result, SplineError};

use super::{Frame, FrameSequence};

impl<T: FloatingPoint> Spline<T> {
    /// Compute rotation minimizing frames at the given parameters
    /// based on the double reflection method described in
    /// "Computation of Rotation Minimizing Frames" (Wang, Jüttler, Zheng, Liu 2008)
    ///
    /// Curves are embedded into 3D space: missing coordinates are zero, extra coordinates are ignored.
    /// # Failures
    /// - if the parameters are not strictly increasing or leave the domain
    /// - if the spline cannot be derived
    /// - if the tangent vanishes at any of the parameters
    ///
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let spline = Spline::try_new(
    ///     3,
    ///     3,
    ///     vec![dvector![0., 0., 0.], dvector![1., 0., 1.], dvector![2., 1., 0.], dvector![3., 1., 1.]],
    ///     None,
    /// ).unwrap();
    /// let frames = spline.try_compute_rmf(&spline.uniform_knot_seq(20)).unwrap();
    /// assert_eq!(frames.len(), 20);
    /// for frame in frames.iter() {
    ///     assert_relative_eq!(frame.tangent().dot(frame.normal()), 0., epsilon = 1e-5);
    ///     assert_relative_eq!(frame.normal().norm(), 1., epsilon = 1e-5);
    /// }
    /// ```
    pub fn try_compute_rmf(&self, parameters: &[T]) -> Result<FrameSequence<T>> {
        self.try_compute_rmf_with_normal(parameters, None)
    }

    /// Compute rotation minimizing frames starting with the given normal
    /// The normal is made orthogonal to the first tangent before it is used.
    /// Gaps at interior knots of full multiplicity are not rejected.
    pub fn try_compute_rmf_with_normal(
        &self,
        parameters: &[T],
        first_normal: Option<Vector3<T>>,
    ) -> Result<FrameSequence<T>> {
        let derivative = self.try_derive_with(1, None)?;
        self.try_compute_rmf_with_derivative(&derivative, parameters, first_normal)
    }

    /// Compute rotation minimizing frames with a precomputed first derivative
    pub fn try_compute_rmf_with_derivative(
        &self,
        derivative: &Spline<T>,
        parameters: &[T],
        first_normal: Option<Vector3<T>>,
    ) -> Result<FrameSequence<T>> {
        if let Some((a, b)) = parameters.iter().tuple_windows().find(|(a, b)| b <= a) {
            return Err(SplineError::InvalidParameters(format!(
                "parameters must be strictly increasing: {} follows {}",
                b.as_f64(),
                a.as_f64()
            )));
        }

        let samples = parameters
            .iter()
            .map(|u| {
                let evaluation = self.evaluate(*u)?;
                let tangent = embed(&self.tangent_with(derivative, *u)?);
                if tangent.norm() < length_zero() {
                    return Err(SplineError::ZeroTangent {
                        parameter: u.as_f64(),
                    });
                }
                Ok((*u, Point3::from(embed(evaluation.result())), tangent.normalize()))
            })
            .collect::<Result<Vec<_>>>()?;

        let Some((u0, x0, t0)) = samples.first() else {
            return Ok(FrameSequence::default());
        };

        let r0 = match first_normal {
            Some(normal) => {
                let r = normal - t0 * normal.dot(t0);
                if r.norm() < length_zero() {
                    return Err(SplineError::InvalidParameters(
                        "first normal is parallel to the tangent".to_string(),
                    ));
                }
                r.normalize()
            }
            None => seed_normal(t0, self.dimension()),
        };

        let mut frames = Vec::with_capacity(samples.len());
        frames.push(Frame::new(*u0, *x0, *t0, r0, t0.cross(&r0)));

        for ((_, x0, t0), (u1, x1, t1)) in samples.iter().tuple_windows() {
            let r0 = frames[frames.len() - 1].normal();

            let v1 = x1 - x0;
            let (r_l, t_l) = match reflection(&v1) {
                Some(c1) => (
                    r0 - v1 * (v1.dot(r0) * c1),
                    t0 - v1 * (v1.dot(t0) * c1),
                ),
                None => (*r0, *t0),
            };

            let v2 = t1 - t_l;
            let r1 = match reflection(&v2) {
                Some(c2) => r_l - v2 * (v2.dot(&r_l) * c2),
                None => r_l,
            };
            let r1 = (r1 - t1 * r1.dot(t1)).normalize();

            frames.push(Frame::new(*u1, *x1, *t1, r1, t1.cross(&r1)));
        }

        Ok(FrameSequence::new(frames))
    }
}

/// Factor `2 / |v|²` of the reflection across the plane orthogonal to `v`
fn reflection<T: FloatingPoint>(v: &Vector3<T>) -> Option<T> {
    let c = v.norm_squared();
    if c < T::default_epsilon() {
        None
    } else {
        Some(T::from_constant(2.) / c)
    }
}

/// Initial normal of the frame sequence
///
/// Planar curves keep the normal in their plane.
/// Other curves use the coordinate axis least aligned with the tangent, preferring x over y over z.
fn seed_normal<T: FloatingPoint>(tangent: &Vector3<T>, dimension: usize) -> Vector3<T> {
    if dimension < 3 {
        return Vector3::z().cross(tangent).normalize();
    }

    let (x, y, z) = (tangent.x.abs(), tangent.y.abs(), tangent.z.abs());
    let mut axis = Vector3::x();
    let mut min = x;
    if y < min {
        min = y;
        axis = Vector3::y();
    }
    if z < min {
        axis = Vector3::z();
    }

    let normal = tangent.cross(&axis);
    tangent.cross(&normal).normalize()
}

/// Embed a point or vector of any dimension into 3D space
fn embed<T: FloatingPoint>(v: &DVector<T>) -> Vector3<T> {
    Vector3::from_fn(|i, _| v.get(i).copied().unwrap_or_else(T::zero))
}
