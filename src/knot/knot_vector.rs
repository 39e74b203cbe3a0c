use std::ops::Index;

use itertools::Itertools;
use nalgebra::convert;
use simba::scalar::SupersetOf;

use crate::misc::{knots_equal, FloatingPoint, Invertible, Result, SplineError};

use super::{KnotMultiplicity, KnotSpan, KnotType};

/// Knot vector representation
/// A non-decreasing sequence of parameters that maps the parameter domain to the basis functions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnotVector<T>(Vec<T>);

impl<T: FloatingPoint> KnotVector<T> {
    pub fn new(knots: Vec<T>) -> Self {
        Self(knots)
    }

    /// Generate a knot vector of the given type for `num_control_points` control points
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// let knots: KnotVector<f64> = KnotVector::try_generate(KnotType::Clamped, 3, 7).unwrap();
    /// assert_eq!(knots.to_vec(), vec![0., 0., 0., 0., 0.25, 0.5, 0.75, 1., 1., 1., 1.]);
    ///
    /// let knots: KnotVector<f64> = KnotVector::try_generate(KnotType::Beziers, 2, 6).unwrap();
    /// assert_eq!(knots.to_vec(), vec![0., 0., 0., 0.5, 0.5, 0.5, 1., 1., 1.]);
    /// ```
    pub fn try_generate(
        knot_type: KnotType,
        degree: usize,
        num_control_points: usize,
    ) -> Result<Self> {
        if degree >= num_control_points {
            return Err(SplineError::DegreeTooHigh {
                degree,
                control_points: num_control_points,
            });
        }

        let order = degree + 1;
        let len = num_control_points + order;
        let knots = match knot_type {
            KnotType::Opened => {
                let denom = T::from_count(len - 1);
                (0..len).map(|i| T::from_count(i) / denom).collect()
            }
            KnotType::Clamped => {
                let denom = T::from_count(len - 2 * degree - 1);
                (0..len)
                    .map(|i| {
                        if i < order {
                            T::zero()
                        } else if i >= len - order {
                            T::one()
                        } else {
                            T::from_count(i - degree) / denom
                        }
                    })
                    .collect()
            }
            KnotType::Beziers => {
                if len % order != 0 {
                    return Err(SplineError::InvalidKnotVector(format!(
                        "{} knots cannot be grouped into Bezier segments of order {}",
                        len, order
                    )));
                }
                let denom = T::from_count(len / order - 1);
                (0..len)
                    .map(|i| T::from_count(i / order) / denom)
                    .collect()
            }
        };

        Ok(Self(knots))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.clone()
    }

    pub fn first(&self) -> T {
        self.0[0]
    }

    pub fn last(&self) -> T {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Get the domain of the knot vector by degree
    pub fn domain(&self, degree: usize) -> (T, T) {
        (self.0[degree], self.0[self.0.len() - 1 - degree])
    }

    pub fn clamp(&self, degree: usize, u: T) -> T {
        let (min, max) = self.domain(degree);
        u.clamp(min, max)
    }

    /// Check that the knot vector fits a spline of the given degree and number of control points
    pub fn validate(&self, degree: usize, num_control_points: usize) -> Result<()> {
        let expected = num_control_points + degree + 1;
        if self.len() != expected {
            return Err(SplineError::InvalidKnotVector(format!(
                "expected {} knots, got {}",
                expected,
                self.len()
            )));
        }

        if let Some(k) = self.iter().find(|k| !k.is_finite()) {
            return Err(SplineError::InvalidKnotVector(format!(
                "knot {} is not finite",
                k.as_f64()
            )));
        }

        if let Some((i, (a, b))) = self
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (a, b))| b < a)
        {
            return Err(SplineError::InvalidKnotVector(format!(
                "knot {} at index {} is smaller than its predecessor {}",
                b.as_f64(),
                i + 1,
                a.as_f64()
            )));
        }

        let order = degree + 1;
        if let Some(m) = self
            .multiplicity()
            .into_iter()
            .find(|m| m.multiplicity() > order)
        {
            return Err(SplineError::MultiplicityExceeded {
                knot: m.knot().as_f64(),
                multiplicity: m.multiplicity(),
                order,
            });
        }

        Ok(())
    }

    /// Get the multiplicity of each knot
    /// Knots closer than the knot tolerance are counted as the same knot.
    /// # Example
    /// ```
    /// use splina::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// let knot_multiplicity = knots.multiplicity();
    /// assert_eq!(knot_multiplicity[0].multiplicity(), 3);
    /// assert_eq!(knot_multiplicity[1].multiplicity(), 1);
    /// assert_eq!(knot_multiplicity[2].multiplicity(), 1);
    /// assert_eq!(knot_multiplicity[3].multiplicity(), 3);
    /// ```
    pub fn multiplicity(&self) -> Vec<KnotMultiplicity<T>> {
        let Some(&first) = self.0.first() else {
            return vec![];
        };

        let mut mult = vec![];
        let mut current = KnotMultiplicity::new(first, 0);
        self.0.iter().for_each(|knot| {
            if !knots_equal(*knot, *current.knot()) {
                mult.push(current.clone());
                current = KnotMultiplicity::new(*knot, 0);
            }
            current.increment_multiplicity();
        });
        mult.push(current);

        mult
    }

    /// Check if the knot vector is clamped
    /// `clamped` means the first and last knots have a multiplicity greater than the degree
    /// e.g. [0, 0, 0, 1, 2, 3, 3, 3] with degree 2 is clamped
    pub fn is_clamped(&self, degree: usize) -> bool {
        let multiplicity = self.multiplicity();
        match (multiplicity.first(), multiplicity.last()) {
            (Some(start), Some(end)) => {
                start.multiplicity() > degree && end.multiplicity() > degree
            }
            _ => false,
        }
    }

    /// Locate a parameter inside the domain of the knot vector
    ///
    /// Parameters outside of the domain by less than the knot tolerance are snapped to the bound.
    /// Interior parameters are kept as they are: the multiplicity is zero unless `u` is a knot value.
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// let span = knots.find(2, 2.5).unwrap();
    /// assert_eq!(span.index(), 4);
    /// assert_eq!(span.multiplicity(), 0);
    ///
    /// let span = knots.find(2, 1.00001).unwrap();
    /// assert_eq!(span.parameter(), 1.00001);
    /// assert_eq!(span.multiplicity(), 0);
    ///
    /// assert!(knots.find(2, 3.1).is_err());
    /// ```
    pub fn find(&self, degree: usize, u: T) -> Result<KnotSpan<T>> {
        let u = self.clamp_to_domain(degree, u)?;
        // u >= knots[0] holds, so at least one knot passes
        let index = self.0.partition_point(|k| *k <= u) - 1;
        let multiplicity = (1..=degree + 1)
            .rev()
            .find(|m| *m <= index + 1 && self.0[index + 1 - m] == u)
            .unwrap_or(0);
        Ok(KnotSpan::new(u, index, multiplicity))
    }

    /// Locate a parameter like [`KnotVector::find`], snapping it to a knot equal within the knot tolerance
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// let span = knots.find_snapped(2, 1.00001).unwrap();
    /// assert_eq!(span.parameter(), 1.);
    /// assert_eq!(span.index(), 3);
    /// assert_eq!(span.multiplicity(), 1);
    /// ```
    pub fn find_snapped(&self, degree: usize, u: T) -> Result<KnotSpan<T>> {
        let u = self.clamp_to_domain(degree, u)?;
        let len = self.len();
        let mut index = if knots_equal(u, self.last()) {
            len - 1
        } else {
            self.0.partition_point(|k| *k <= u) - 1
        };
        while index + 1 < len && knots_equal(u, self.0[index + 1]) {
            index += 1;
        }

        let u = if knots_equal(u, self.0[index]) {
            self.0[index]
        } else {
            u
        };

        let multiplicity = (1..=degree + 1)
            .rev()
            .find(|m| *m <= index + 1 && knots_equal(u, self.0[index + 1 - m]))
            .unwrap_or(0);

        Ok(KnotSpan::new(u, index, multiplicity))
    }

    fn clamp_to_domain(&self, degree: usize, u: T) -> Result<T> {
        let (min, max) = self.domain(degree);
        if u >= min && u <= max {
            Ok(u)
        } else if knots_equal(u, min) {
            Ok(min)
        } else if knots_equal(u, max) {
            Ok(max)
        } else {
            Err(SplineError::ParameterOutOfDomain {
                parameter: u.as_f64(),
                min: min.as_f64(),
                max: max.as_f64(),
            })
        }
    }

    /// Insert `n` copies of `u` right after `index`
    pub(crate) fn inserted(&self, index: usize, u: T, n: usize) -> Self {
        let mut knots = Vec::with_capacity(self.len() + n);
        knots.extend_from_slice(&self.0[..=index]);
        knots.extend(std::iter::repeat_n(u, n));
        knots.extend_from_slice(&self.0[index + 1..]);
        Self(knots)
    }

    /// Cast the knot vector to another floating point type
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// let knots: KnotVector<f64> = KnotVector::new(vec![1., 2., 3., 4., 5., 6.]);
    /// let knots2 = knots.cast::<f32>();
    /// assert_eq!(knots2.first(), 1.0_f32);
    /// ```
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> KnotVector<F> {
        KnotVector::new(self.0.iter().map(|v| convert(*v)).collect())
    }
}

impl<T> Index<usize> for KnotVector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> FromIterator<T> for KnotVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a KnotVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: FloatingPoint> Invertible for KnotVector<T> {
    /// Mirror the knot spacing so that the domain keeps its start
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// let mut knot = KnotVector::new(vec![0., 0., 0., 1., 2., 2.5, 3.5, 4.0, 4.0]);
    /// knot.invert();
    /// assert_eq!(knot.to_vec(), vec![0.0, 0.0, 0.5, 1.5, 2.0, 3.0, 4.0, 4.0, 4.0]);
    /// ```
    fn invert(&mut self) {
        let Some(&start) = self.0.first() else {
            return;
        };

        let len = self.len();
        let mut mirrored = Vec::with_capacity(len);
        mirrored.push(start);
        for i in 1..len {
            mirrored.push(mirrored[i - 1] + (self.0[len - i] - self.0[len - i - 1]));
        }
        self.0 = mirrored;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn opened_knots_are_evenly_spaced() {
        let knots = KnotVector::<f64>::try_generate(KnotType::Opened, 3, 7).unwrap();
        assert_eq!(knots.len(), 11);
        knots.iter().enumerate().for_each(|(i, k)| {
            assert_relative_eq!(*k, i as f64 / 10.);
        });
    }

    #[test]
    fn beziers_require_grouped_length() {
        let err = KnotVector::<f64>::try_generate(KnotType::Beziers, 2, 7).unwrap_err();
        assert!(matches!(err, SplineError::InvalidKnotVector(_)));
    }

    #[test]
    fn degree_must_be_below_control_point_count() {
        let err = KnotVector::<f64>::try_generate(KnotType::Clamped, 3, 3).unwrap_err();
        assert_eq!(
            err,
            SplineError::DegreeTooHigh {
                degree: 3,
                control_points: 3
            }
        );
    }

    #[test]
    fn validation() {
        let knots = KnotVector::new(vec![0., 0., 0., 0.5, 1., 1., 1.]);
        assert!(knots.validate(2, 4).is_ok());
        assert!(matches!(
            knots.validate(2, 5),
            Err(SplineError::InvalidKnotVector(_))
        ));

        let decreasing = KnotVector::new(vec![0., 0., 0., 0.7, 0.5, 1., 1., 1.]);
        assert!(matches!(
            decreasing.validate(2, 5),
            Err(SplineError::InvalidKnotVector(_))
        ));

        let overfull = KnotVector::new(vec![0., 0., 0., 0.5, 0.5, 0.5, 0.5, 1., 1., 1.]);
        assert_eq!(
            overfull.validate(2, 7),
            Err(SplineError::MultiplicityExceeded {
                knot: 0.5,
                multiplicity: 4,
                order: 3
            })
        );
    }

    #[test]
    fn find_at_domain_bounds() {
        let knots = KnotVector::<f64>::try_generate(KnotType::Clamped, 3, 7).unwrap();

        let start = knots.find(3, 0.).unwrap();
        assert_eq!(start.index(), 3);
        assert_eq!(start.multiplicity(), 4);

        let end = knots.find(3, 1.).unwrap();
        assert_eq!(end.index(), 10);
        assert_eq!(end.multiplicity(), 4);

        let snapped = knots.find(3, -0.00005).unwrap();
        assert_eq!(snapped.parameter(), 0.);

        assert!(matches!(
            knots.find(3, 1.01),
            Err(SplineError::ParameterOutOfDomain { .. })
        ));
        assert!(knots.find(3, f64::NAN).is_err());
    }

    #[test]
    fn find_in_opened_vector() {
        let knots = KnotVector::<f64>::try_generate(KnotType::Opened, 3, 7).unwrap();
        assert_eq!(knots.domain(3), (0.3, 0.7));

        let span = knots.find(3, 0.45).unwrap();
        assert_eq!(span.index(), 4);
        assert_eq!(span.multiplicity(), 0);
        assert_eq!(span.insertions(3), 3);

        let end = knots.find(3, 0.7).unwrap();
        assert_eq!(end.index(), 7);
        assert_eq!(end.multiplicity(), 1);
    }

    #[test]
    fn find_keeps_parameters_near_knots() {
        let knots = KnotVector::new(vec![0., 0., 0., 0., 0.25, 0.5, 0.75, 1., 1., 1., 1.]);

        let below = knots.find(3, 0.49995).unwrap();
        assert_eq!(below.parameter(), 0.49995);
        assert_eq!(below.index(), 4);
        assert_eq!(below.multiplicity(), 0);

        let above = knots.find(3, 0.50005).unwrap();
        assert_eq!(above.parameter(), 0.50005);
        assert_eq!(above.index(), 5);
        assert_eq!(above.multiplicity(), 0);

        let exact = knots.find(3, 0.5).unwrap();
        assert_eq!(exact.index(), 5);
        assert_eq!(exact.multiplicity(), 1);

        let snapped = knots.find_snapped(3, 0.49995).unwrap();
        assert_eq!(snapped.parameter(), 0.5);
        assert_eq!(snapped.index(), 5);
        assert_eq!(snapped.multiplicity(), 1);
    }

    #[test]
    fn insert_copies() {
        let knots = KnotVector::new(vec![0., 0., 1., 1.]);
        let inserted = knots.inserted(1, 0.5, 2);
        assert_eq!(inserted.to_vec(), vec![0., 0., 0.5, 0.5, 1., 1.]);
    }
}
