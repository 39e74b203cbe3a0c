use nalgebra::DVector;
use simba::scalar::SupersetOf;

use crate::knot::{KnotType, KnotVector};
use crate::misc::{weight_epsilon, FloatingPoint, Invertible, Result, SplineError};

/// B-spline / NURBS curve representation
/// The dimension of the control points is decided at runtime.
/// Rational splines store homogeneous control points `(w·x, w·y, …, w)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spline<T: FloatingPoint> {
    degree: usize,
    /// cartesian dimension of the curve
    dimension: usize,
    rational: bool,
    /// control points, each of length `dimension + 1` if the spline is rational
    control_points: Vec<DVector<T>>,
    /// the length of the knot vector is equal to the `# of control points + degree + 1`
    knots: KnotVector<T>,
}

impl<T: FloatingPoint> Spline<T> {
    /// Create a new non-rational spline
    /// If no knots are given, a clamped knot vector over [0, 1] is generated.
    /// # Failures
    /// - if the dimension is zero or a control point has another dimension
    /// - if the number of control points is not greater than the degree
    /// - if the knot vector is decreasing, has a wrong length, or repeats a knot more than `degree + 1` times
    ///
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    ///
    /// let control_points = vec![
    ///     dvector![120., 100.],
    ///     dvector![270., 40.],
    ///     dvector![370., 490.],
    ///     dvector![590., 40.],
    /// ];
    /// let spline = Spline::try_new(3, 2, control_points, None).unwrap();
    /// assert_eq!(spline.knots().to_vec(), vec![0., 0., 0., 0., 1., 1., 1., 1.]);
    /// assert_eq!(spline.knots_domain(), (0., 1.));
    /// ```
    pub fn try_new(
        degree: usize,
        dimension: usize,
        control_points: Vec<DVector<T>>,
        knots: Option<Vec<T>>,
    ) -> Result<Self> {
        Self::try_build(degree, dimension, false, control_points, knots)
    }

    /// Create a new non-rational spline with a generated knot vector of the given type
    pub fn try_with_knot_type(
        degree: usize,
        dimension: usize,
        control_points: Vec<DVector<T>>,
        knot_type: KnotType,
    ) -> Result<Self> {
        let knots = KnotVector::try_generate(knot_type, degree, control_points.len())?;
        Self::try_build(degree, dimension, false, control_points, Some(knots.to_vec()))
    }

    /// Create a new non-rational spline from a flat list of coordinates
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// let spline = Spline::try_from_slice(1, 2, &[1., -2., 3., 6.], None).unwrap();
    /// assert_eq!(spline.num_control_points(), 2);
    /// assert!(Spline::try_from_slice(1, 2, &[1., -2., 3.], None).is_err());
    /// ```
    pub fn try_from_slice(
        degree: usize,
        dimension: usize,
        coordinates: &[T],
        knots: Option<Vec<T>>,
    ) -> Result<Self> {
        let control_points = chunk_coordinates(coordinates, dimension)?;
        Self::try_new(degree, dimension, control_points, knots)
    }

    /// Create a new rational spline from cartesian control points and their weights
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    ///
    /// // quarter of the unit circle
    /// let w = std::f64::consts::FRAC_1_SQRT_2;
    /// let arc = Spline::try_new_rational(
    ///     2,
    ///     2,
    ///     vec![dvector![1., 0.], dvector![1., 1.], dvector![0., 1.]],
    ///     vec![1., w, 1.],
    ///     None,
    /// ).unwrap();
    /// let p = arc.point_at(0.5).unwrap();
    /// assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
    /// ```
    pub fn try_new_rational(
        degree: usize,
        dimension: usize,
        points: Vec<DVector<T>>,
        weights: Vec<T>,
        knots: Option<Vec<T>>,
    ) -> Result<Self> {
        if points.len() != weights.len() {
            return Err(SplineError::InvalidParameters(format!(
                "{} control points but {} weights",
                points.len(),
                weights.len()
            )));
        }
        check_dimensions(&points, dimension)?;

        let control_points = points
            .into_iter()
            .zip(weights)
            .map(|(p, w)| (p * w).push(w))
            .collect();
        Self::try_build(degree, dimension, true, control_points, knots)
    }

    /// Create a new rational spline from homogeneous control points `(w·x, …, w)`
    pub fn try_new_homogeneous(
        degree: usize,
        dimension: usize,
        control_points: Vec<DVector<T>>,
        knots: Option<Vec<T>>,
    ) -> Result<Self> {
        Self::try_build(degree, dimension, true, control_points, knots)
    }

    fn try_build(
        degree: usize,
        dimension: usize,
        rational: bool,
        control_points: Vec<DVector<T>>,
        knots: Option<Vec<T>>,
    ) -> Result<Self> {
        if dimension == 0 {
            return Err(SplineError::DimensionZero);
        }
        let stride = dimension + usize::from(rational);
        check_dimensions(&control_points, stride)?;

        let knots = match knots {
            Some(knots) => KnotVector::new(knots),
            None => KnotVector::try_generate(KnotType::Clamped, degree, control_points.len())?,
        };
        if degree >= control_points.len() {
            return Err(SplineError::DegreeTooHigh {
                degree,
                control_points: control_points.len(),
            });
        }
        knots.validate(degree, control_points.len())?;

        Ok(Self {
            degree,
            dimension,
            rational,
            control_points,
            knots,
        })
    }

    /// Create a spline without validation
    /// Callers guarantee the invariants between degree, control points and knots.
    pub(crate) fn new_unchecked(
        degree: usize,
        dimension: usize,
        rational: bool,
        control_points: Vec<DVector<T>>,
        knots: KnotVector<T>,
    ) -> Self {
        Self {
            degree,
            dimension,
            rational,
            control_points,
            knots,
        }
    }

    /// Copy of the spline with other control points and knots of the same structure
    pub(crate) fn with_parts(&self, control_points: Vec<DVector<T>>, knots: KnotVector<T>) -> Self {
        Self::new_unchecked(
            self.degree,
            self.dimension,
            self.rational,
            control_points,
            knots,
        )
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.degree + 1
    }

    /// Cartesian dimension of the curve
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored coordinates per control point
    pub fn stride(&self) -> usize {
        self.dimension + usize::from(self.rational)
    }

    pub fn is_rational(&self) -> bool {
        self.rational
    }

    /// Control points as stored, homogeneous if the spline is rational
    pub fn control_points(&self) -> &[DVector<T>] {
        &self.control_points
    }

    pub fn control_points_iter(&self) -> impl Iterator<Item = &DVector<T>> {
        self.control_points.iter()
    }

    pub fn num_control_points(&self) -> usize {
        self.control_points.len()
    }

    pub fn control_point_at(&self, index: usize) -> Result<&DVector<T>> {
        self.control_points
            .get(index)
            .ok_or(SplineError::IndexOutOfBounds {
                index,
                len: self.control_points.len(),
            })
    }

    /// Cartesian control points
    pub fn dehomogenized_control_points(&self) -> Result<Vec<DVector<T>>> {
        self.control_points
            .iter()
            .map(|p| self.dehomogenize(p, T::zero()))
            .collect()
    }

    /// Weights of the control points, all ones if the spline is not rational
    pub fn weights(&self) -> Vec<T> {
        if self.rational {
            self.control_points
                .iter()
                .map(|p| p[self.dimension])
                .collect()
        } else {
            vec![T::one(); self.control_points.len()]
        }
    }

    pub fn knots(&self) -> &KnotVector<T> {
        &self.knots
    }

    pub fn knot_at(&self, index: usize) -> Result<T> {
        self.knots
            .as_slice()
            .get(index)
            .copied()
            .ok_or(SplineError::IndexOutOfBounds {
                index,
                len: self.knots.len(),
            })
    }

    pub fn knots_domain(&self) -> (T, T) {
        self.knots.domain(self.degree)
    }

    pub fn knots_domain_interval(&self) -> T {
        let (d0, d1) = self.knots_domain();
        d1 - d0
    }

    /// Check if the curve is clamped
    pub fn is_clamped(&self) -> bool {
        self.knots.is_clamped(self.degree)
    }

    /// Copy of the spline with all control points replaced
    /// The number of control points and their stored dimension must not change.
    pub fn with_control_points(&self, control_points: Vec<DVector<T>>) -> Result<Self> {
        if control_points.len() != self.control_points.len() {
            return Err(SplineError::InvalidParameters(format!(
                "expected {} control points, got {}",
                self.control_points.len(),
                control_points.len()
            )));
        }
        check_dimensions(&control_points, self.stride())?;
        Ok(self.with_parts(control_points, self.knots.clone()))
    }

    /// Copy of the spline with a single control point replaced
    pub fn with_control_point_at(&self, index: usize, point: DVector<T>) -> Result<Self> {
        self.control_point_at(index)?;
        check_dimensions(std::slice::from_ref(&point), self.stride())?;
        let mut control_points = self.control_points.clone();
        control_points[index] = point;
        Ok(self.with_parts(control_points, self.knots.clone()))
    }

    /// Copy of the spline with the knot vector replaced
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// let line = Spline::try_from_slice(1, 2, &[1., -2., 3., 6.], None).unwrap();
    /// let line = line.with_knots(vec![-10., -10., 10., 10.]).unwrap();
    /// assert_eq!(line.knots_domain(), (-10., 10.));
    /// assert!(line.with_knots(vec![0., 1., 0.5, 1.]).is_err());
    /// ```
    pub fn with_knots(&self, knots: Vec<T>) -> Result<Self> {
        let knots = KnotVector::new(knots);
        knots.validate(self.degree, self.control_points.len())?;
        Ok(self.with_parts(self.control_points.clone(), knots))
    }

    /// Copy of the spline with a single knot replaced
    pub fn with_knot_at(&self, index: usize, knot: T) -> Result<Self> {
        self.knot_at(index)?;
        let mut knots = self.knots.to_vec();
        knots[index] = knot;
        self.with_knots(knots)
    }

    /// Convert a stored control point or net point into cartesian coordinates
    /// `parameter` is only used to report a degenerate weight.
    pub(crate) fn dehomogenize(&self, point: &DVector<T>, parameter: T) -> Result<DVector<T>> {
        if !self.rational {
            return Ok(point.clone());
        }
        let w = point[self.dimension];
        if w.abs() < weight_epsilon() {
            return Err(SplineError::DegenerateWeight {
                parameter: parameter.as_f64(),
                weight: w.as_f64(),
            });
        }
        Ok(point.rows(0, self.dimension) / w)
    }

    /// Convert the spline into a rational spline with unit weights
    /// Rational splines are returned unchanged.
    pub fn to_rational(&self) -> Self {
        if self.rational {
            return self.clone();
        }
        Self {
            degree: self.degree,
            dimension: self.dimension,
            rational: true,
            control_points: self
                .control_points
                .iter()
                .map(|p| p.clone().push(T::one()))
                .collect(),
            knots: self.knots.clone(),
        }
    }

    /// Cast the spline to a spline with another floating point type
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> Spline<F> {
        Spline {
            degree: self.degree,
            dimension: self.dimension,
            rational: self.rational,
            control_points: self
                .control_points
                .iter()
                .map(|p| p.clone().cast::<F>())
                .collect(),
            knots: self.knots.cast(),
        }
    }
}

impl<T: FloatingPoint> Invertible for Spline<T> {
    /// Reverse the direction of the curve
    /// # Example
    /// ```
    /// use splina::prelude::*;
    /// use nalgebra::dvector;
    /// use approx::assert_relative_eq;
    /// let spline = Spline::try_new(
    ///     2,
    ///     2,
    ///     vec![dvector![0., 0.], dvector![1., 0.], dvector![1., 1.], dvector![0., 1.]],
    ///     None,
    /// ).unwrap();
    /// let reversed = spline.inverse();
    /// let (start, end) = reversed.knots_domain();
    /// assert_relative_eq!(reversed.point_at(start).unwrap(), dvector![0., 1.]);
    /// assert_relative_eq!(reversed.point_at(end).unwrap(), dvector![0., 0.]);
    /// ```
    fn invert(&mut self) {
        self.control_points.reverse();
        self.knots.invert();
    }
}

/// Split a flat list of coordinates into points of the given dimension
pub(crate) fn chunk_coordinates<T: FloatingPoint>(
    coordinates: &[T],
    dimension: usize,
) -> Result<Vec<DVector<T>>> {
    if dimension == 0 {
        return Err(SplineError::DimensionZero);
    }
    if coordinates.len() % dimension != 0 {
        return Err(SplineError::DimensionMismatch {
            expected: dimension,
            given: coordinates.len() % dimension,
        });
    }
    Ok(coordinates
        .chunks_exact(dimension)
        .map(DVector::from_column_slice)
        .collect())
}

/// Ensure that every point has the given number of coordinates
pub(crate) fn check_dimensions<T: FloatingPoint>(
    points: &[DVector<T>],
    dimension: usize,
) -> Result<()> {
    if dimension == 0 {
        return Err(SplineError::DimensionZero);
    }
    match points.iter().find(|p| p.len() != dimension) {
        Some(p) => Err(SplineError::DimensionMismatch {
            expected: dimension,
            given: p.len(),
        }),
        None => Ok(()),
    }
}
