use nalgebra::DVector;

use super::FloatingPoint;

/// Two knots closer than this are considered equal.
pub const KNOT_EPSILON: f64 = 1e-4;

/// Two points closer than this are considered equal.
pub const POINT_EPSILON: f64 = 1e-5;

/// Vectors shorter than this have no direction.
pub const LENGTH_ZERO: f64 = 1e-4;

/// Homogeneous weights with a magnitude below this cannot be divided by.
pub const WEIGHT_EPSILON: f64 = 1e-12;

pub fn knot_epsilon<T: FloatingPoint>() -> T {
    T::from_constant(KNOT_EPSILON)
}

pub fn point_epsilon<T: FloatingPoint>() -> T {
    T::from_constant(POINT_EPSILON)
}

pub fn length_zero<T: FloatingPoint>() -> T {
    T::from_constant(LENGTH_ZERO)
}

pub fn weight_epsilon<T: FloatingPoint>() -> T {
    T::from_constant(WEIGHT_EPSILON)
}

/// Check if two knots are equal within [`KNOT_EPSILON`]
/// # Example
/// ```
/// use splina::prelude::*;
/// assert!(knots_equal(0.5, 0.50005));
/// assert!(!knots_equal(0.5, 0.5002));
/// ```
pub fn knots_equal<T: FloatingPoint>(a: T, b: T) -> bool {
    (a - b).abs() < knot_epsilon()
}

/// Check if two points are within the given distance
pub fn points_equal<T: FloatingPoint>(a: &DVector<T>, b: &DVector<T>, epsilon: T) -> bool {
    a.len() == b.len() && (a - b).norm() <= epsilon
}

#[cfg(test)]
mod tests {
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn knot_equality_is_absolute() {
        assert!(knots_equal(1000.0, 1000.00009));
        assert!(!knots_equal(1000.0, 1000.0002));
        assert!(knots_equal(0.0_f32, 0.00005));
    }

    #[test]
    fn point_equality() {
        let a = dvector![1.0, 2.0];
        assert!(points_equal(&a, &dvector![1.0, 2.000001], point_epsilon()));
        assert!(!points_equal(&a, &dvector![1.0, 2.1], point_epsilon()));
        assert!(!points_equal(&a, &dvector![1.0, 2.0, 0.0], point_epsilon()));
    }
}
