use crate::misc::{point_epsilon, FloatingPoint, Result, SplineError};

use super::{Evaluation, Spline};

/// Options for [`Spline::try_bisect`]
#[derive(Debug, Clone, PartialEq)]
pub struct BisectOptions<T> {
    /// Largest accepted distance between the searched value and the found coordinate
    epsilon: T,
    /// Fail instead of returning the closest evaluation if the value is not met within `epsilon`
    persnickety: bool,
    /// Coordinate of the evaluated points compared with the value
    index: usize,
    /// Whether the coordinate grows along the curve
    ascending: bool,
    max_iter: usize,
}

impl<T: FloatingPoint> Default for BisectOptions<T> {
    fn default() -> Self {
        Self {
            epsilon: point_epsilon(),
            persnickety: false,
            index: 0,
            ascending: true,
            max_iter: 50,
        }
    }
}

impl<T: FloatingPoint> BisectOptions<T> {
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    pub fn persnickety(&self) -> bool {
        self.persnickety
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn ascending(&self) -> bool {
        self.ascending
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_persnickety(mut self, persnickety: bool) -> Self {
        self.persnickety = persnickety;
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn with_ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

impl<T: FloatingPoint> Spline<T> {
    /// Find the evaluation whose coordinate `options.index()` equals `value`
    /// by bisecting the domain.
    ///
    /// The coordinate must be monotone along the curve, in the direction given by `options.ascending()`.
    /// # Failures
    /// - if the index is not a coordinate of the curve
    /// - if `options.persnickety()` is set and no evaluation within `options.epsilon()` is found
    ///
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let spline = Spline::try_new(
    ///     3,
    ///     2,
    ///     vec![dvector![0., 0.], dvector![1., 3.], dvector![2., -1.], dvector![4., 1.]],
    ///     None,
    /// ).unwrap();
    /// let evaluation = spline.try_bisect(2., BisectOptions::default()).unwrap();
    /// assert_relative_eq!(evaluation.result()[0], 2., epsilon = 1e-5);
    /// ```
    pub fn try_bisect(&self, value: T, options: BisectOptions<T>) -> Result<Evaluation<T>> {
        if options.index() >= self.dimension() {
            return Err(SplineError::IndexOutOfBounds {
                index: options.index(),
                len: self.dimension(),
            });
        }

        let (mut min, mut max) = self.knots_domain();
        let half = T::from_constant(0.5);
        let mut closest: Option<(T, Evaluation<T>)> = None;

        for _ in 0..options.max_iter().max(1) {
            let mid = (min + max) * half;
            let evaluation = self.evaluate(mid)?;
            let distance = evaluation.result()[options.index()] - value;

            if distance.abs() <= options.epsilon() {
                return Ok(evaluation);
            }

            let below = distance < T::zero();
            if below == options.ascending() {
                min = mid;
            } else {
                max = mid;
            }

            if closest
                .as_ref()
                .map_or(true, |(d, _)| distance.abs() < *d)
            {
                closest = Some((distance.abs(), evaluation));
            }
        }

        #[cfg(feature = "log")]
        log::debug!(
            "bisection stopped after {} iterations without reaching {}",
            options.max_iter(),
            value.as_f64()
        );

        match closest {
            Some((_, evaluation)) if !options.persnickety() => Ok(evaluation),
            _ => Err(SplineError::NoResult(format!(
                "no point with coordinate {} = {} found",
                options.index(),
                value.as_f64()
            ))),
        }
    }
}
