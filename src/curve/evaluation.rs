use nalgebra::DVector;

use crate::knot::KnotSpan;
use crate::misc::{FloatingPoint, Result, SplineError};

use super::Spline;

/// Number of samples taken by [`Spline::sample`] when none is requested
pub const DEFAULT_SAMPLES: usize = 100;

/// Result of evaluating a spline at a parameter with the de Boor algorithm.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation<T: FloatingPoint> {
    span: KnotSpan<T>,
    insertions: usize,
    /// levels of the de Boor net, starting with the active control points
    net: Vec<Vec<DVector<T>>>,
    /// cartesian result, two points at an interior knot of full multiplicity
    result: Vec<DVector<T>>,
}

impl<T: FloatingPoint> Evaluation<T> {
    /// Parameter the spline was evaluated at, snapped to a knot if they are equal
    pub fn parameter(&self) -> T {
        self.span.parameter()
    }

    /// Index `k` of the knot span containing the parameter
    pub fn index(&self) -> usize {
        self.span.index()
    }

    /// Multiplicity of the parameter in the knot vector
    pub fn multiplicity(&self) -> usize {
        self.span.multiplicity()
    }

    /// Number of insertions needed to raise the multiplicity of the parameter to the degree
    pub fn insertions(&self) -> usize {
        self.insertions
    }

    pub fn span(&self) -> &KnotSpan<T> {
        &self.span
    }

    /// Levels of the de Boor net in stored (possibly homogeneous) coordinates
    pub fn net(&self) -> &[Vec<DVector<T>>] {
        &self.net
    }

    /// All points of the de Boor net, level by level
    pub fn net_points(&self) -> impl Iterator<Item = &DVector<T>> {
        self.net.iter().flatten()
    }

    /// The evaluated point
    /// At a discontinuity this is the limit from the left.
    pub fn result(&self) -> &DVector<T> {
        &self.result[0]
    }

    /// The evaluated point in stored (possibly homogeneous) coordinates
    pub fn stored_result(&self) -> &DVector<T> {
        if self.is_discontinuous() {
            &self.net[0][0]
        } else {
            let level = &self.net[self.net.len() - 1];
            &level[level.len() - 1]
        }
    }

    pub fn results(&self) -> &[DVector<T>] {
        &self.result
    }

    /// Check if the spline has two different limits at the parameter
    pub fn is_discontinuous(&self) -> bool {
        self.result.len() > 1
    }

    pub fn into_result(mut self) -> DVector<T> {
        self.result.swap_remove(0)
    }
}

impl<T: FloatingPoint> Spline<T> {
    /// Evaluate the spline at a parameter
    /// # Failures
    /// - if the parameter lies outside of the domain by more than the knot tolerance
    /// - if a rational spline has a vanishing weight at the parameter
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
    /// let evaluation = spline.evaluate(0.5).unwrap();
    /// assert_relative_eq!(evaluation.result().clone(), dvector![1., 1.]);
    /// assert_eq!(evaluation.insertions(), 2);
    /// assert!(spline.evaluate(1.5).is_err());
    /// ```
    pub fn evaluate(&self, u: T) -> Result<Evaluation<T>> {
        let span = self.knots().find(self.degree(), u)?;
        self.evaluate_span(span)
    }

    /// Evaluate the spline at an already located parameter
    pub(crate) fn evaluate_span(&self, span: KnotSpan<T>) -> Result<Evaluation<T>> {
        let k = span.index();
        let s = span.multiplicity();
        let cps = self.control_points();

        let net = if s == self.order() {
            let points = if k == self.degree() {
                vec![cps[0].clone()]
            } else if k == self.knots().len() - 1 {
                vec![cps[k - s].clone()]
            } else {
                vec![cps[k - s].clone(), cps[k - s + 1].clone()]
            };
            vec![points]
        } else {
            self.de_boor_net(&span)
        };

        let result = if s == self.order() {
            net[0]
                .iter()
                .map(|p| self.dehomogenize(p, span.parameter()))
                .collect::<Result<Vec<_>>>()?
        } else {
            let point = net
                .last()
                .and_then(|level| level.last())
                .ok_or_else(|| SplineError::NoResult("empty de Boor net".to_string()))?;
            vec![self.dehomogenize(point, span.parameter())?]
        };

        Ok(Evaluation {
            span,
            insertions: span.insertions(self.degree()),
            net,
            result,
        })
    }

    /// Evaluate the spline at a parameter clamped to the domain
    pub fn evaluate_clamped(&self, u: T) -> Result<Evaluation<T>> {
        let u = if u.is_finite() {
            self.knots().clamp(self.degree(), u)
        } else {
            u
        };
        self.evaluate(u)
    }

    /// Evaluate the curve at a given parameter to get a cartesian point
    pub fn point_at(&self, u: T) -> Result<DVector<T>> {
        self.evaluate(u).map(Evaluation::into_result)
    }

    /// Evaluate the curve at each of the given parameters
    pub fn eval_all(&self, parameters: &[T]) -> Result<Vec<DVector<T>>> {
        parameters.iter().map(|u| self.point_at(*u)).collect()
    }

    /// Evaluate the curve at `samples` uniformly spaced parameters
    /// Zero samples fall back to [`DEFAULT_SAMPLES`].
    pub fn sample(&self, samples: usize) -> Result<Vec<DVector<T>>> {
        let samples = if samples == 0 {
            DEFAULT_SAMPLES
        } else {
            samples
        };
        self.eval_all(&self.uniform_knot_seq(samples))
    }

    /// Generate `n` uniformly spaced parameters covering the domain
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// let spline = Spline::try_from_slice(1, 1, &[0., 1.], Some(vec![2., 2., 4., 4.])).unwrap();
    /// assert_eq!(spline.uniform_knot_seq(5), vec![2., 2.5, 3., 3.5, 4.]);
    /// ```
    pub fn uniform_knot_seq(&self, n: usize) -> Vec<T> {
        let (min, max) = self.knots_domain();
        match n {
            0 => vec![],
            1 => vec![min],
            _ => {
                let step = (max - min) / T::from_count(n - 1);
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            max
                        } else {
                            min + step * T::from_count(i)
                        }
                    })
                    .collect()
            }
        }
    }

    /// Build the de Boor net for a parameter whose multiplicity is below the order
    ///
    /// The first level holds the `degree - s + 1` active control points,
    /// each following level one point less, the last level the point on the curve.
    pub(crate) fn de_boor_net(&self, span: &KnotSpan<T>) -> Vec<Vec<DVector<T>>> {
        let degree = self.degree();
        let knots = self.knots();
        let u = span.parameter();
        let k = span.index();
        let h = span.insertions(degree);
        let fst = k - degree;
        let lst = k - span.multiplicity();

        let mut net = Vec::with_capacity(h + 1);
        net.push(self.control_points()[fst..=lst].to_vec());
        for r in 1..=h {
            let prev = &net[r - 1];
            let level = (fst + r..=lst)
                .enumerate()
                .map(|(j, i)| {
                    let a = (u - knots[i]) / (knots[i + degree - r + 1] - knots[i]);
                    prev[j].lerp(&prev[j + 1], a)
                })
                .collect();
            net.push(level);
        }
        net
    }
}
