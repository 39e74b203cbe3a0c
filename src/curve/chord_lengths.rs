use itertools::Itertools;

use crate::misc::{FloatingPoint, Result, SplineError};

use super::Spline;

/// Number of chords used by [`Spline::try_equidistant_knot_seq`] when none is requested
pub const DEFAULT_CHORD_SAMPLES: usize = 200;

/// Cumulative chord lengths of a polyline sampled from a spline
/// Maps lengths along the curve back to parameters by linear interpolation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordLengths<T: FloatingPoint> {
    /// sampled parameters in increasing order
    knots: Vec<T>,
    /// length of the polyline up to each sample, starting with zero
    lengths: Vec<T>,
}

impl<T: FloatingPoint> ChordLengths<T> {
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    pub fn lengths(&self) -> &[T] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Length of the whole polyline
    pub fn total(&self) -> T {
        self.lengths.last().copied().unwrap_or_else(T::zero)
    }

    /// Find the parameter at which the polyline reaches the given length
    /// # Failures
    /// - if there are no samples
    /// - if the length is negative or exceeds the total length
    pub fn length_to_knot(&self, length: T) -> Result<T> {
        let (first, last) = match (self.knots.first(), self.knots.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(SplineError::NoResult("no chord lengths".to_string())),
        };
        let total = self.total();
        if length < T::zero() || length > total {
            return Err(SplineError::InvalidParameters(format!(
                "length {} is outside of [0, {}]",
                length.as_f64(),
                total.as_f64()
            )));
        }

        let i = self.lengths.partition_point(|l| *l < length);
        if i == 0 {
            return Ok(first);
        }
        if i >= self.lengths.len() {
            return Ok(last);
        }

        let (l0, l1) = (self.lengths[i - 1], self.lengths[i]);
        let (k0, k1) = (self.knots[i - 1], self.knots[i]);
        let chord = l1 - l0;
        if chord <= T::zero() {
            return Ok(k1);
        }
        Ok(k0 + (k1 - k0) * ((length - l0) / chord))
    }

    /// Find the parameter at which the polyline reaches the fraction `t` of its total length
    /// `t` is clamped to [0, 1].
    pub fn t_to_knot(&self, t: T) -> Result<T> {
        let t = t.clamp(T::zero(), T::one());
        self.length_to_knot(self.total() * t)
    }

    /// Generate `n` parameters that are evenly spaced along the polyline
    pub fn equidistant_knot_seq(&self, n: usize) -> Result<Vec<T>> {
        match n {
            0 => Ok(vec![]),
            1 => self.t_to_knot(T::zero()).map(|u| vec![u]),
            _ => {
                let divisor = T::from_count(n - 1);
                (0..n)
                    .map(|i| self.t_to_knot(T::from_count(i) / divisor))
                    .collect()
            }
        }
    }
}

impl<T: FloatingPoint> Spline<T> {
    /// Measure the chords between the points of the curve at the given parameters
    /// # Failures
    /// - if the parameters are not sorted in non-decreasing order
    /// - if any parameter is outside of the domain
    ///
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// let line = Spline::try_new(1, 2, vec![dvector![0., 0.], dvector![3., 4.]], None).unwrap();
    /// let chords = line.try_chord_lengths(&line.uniform_knot_seq(3)).unwrap();
    /// assert_relative_eq!(chords.total(), 5.);
    /// assert_relative_eq!(chords.length_to_knot(1.).unwrap(), 0.2);
    /// ```
    pub fn try_chord_lengths(&self, knots: &[T]) -> Result<ChordLengths<T>> {
        if let Some((a, b)) = knots.iter().tuple_windows().find(|(a, b)| b < a) {
            return Err(SplineError::InvalidParameters(format!(
                "chord parameters are not sorted: {} follows {}",
                b.as_f64(),
                a.as_f64()
            )));
        }

        let points = self.eval_all(knots)?;
        let lengths = std::iter::once(T::zero())
            .chain(points.iter().tuple_windows().scan(T::zero(), |acc, (p, q)| {
                *acc += (q - p).norm();
                Some(*acc)
            }))
            .take(points.len())
            .collect();

        Ok(ChordLengths {
            knots: knots.to_vec(),
            lengths,
        })
    }

    /// Generate `n` parameters that are approximately evenly spaced along the curve
    /// The curve is approximated by a polyline of `samples` points, zero falls back to [`DEFAULT_CHORD_SAMPLES`].
    pub fn try_equidistant_knot_seq(&self, n: usize, samples: usize) -> Result<Vec<T>> {
        let samples = if samples == 0 {
            DEFAULT_CHORD_SAMPLES
        } else {
            samples.max(2)
        };
        self.try_chord_lengths(&self.uniform_knot_seq(samples))?
            .equidistant_knot_seq(n)
    }
}
