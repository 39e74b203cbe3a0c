use nalgebra::{convert, RealField};
use num_traits::ToPrimitive;

/// Trait for floating point types (f32, f64)
/// Mainly used to identify the type of the field in nalgebra
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Convert a count into the scalar type
    fn from_count(n: usize) -> Self {
        convert(n as f64)
    }

    /// Convert a constant into the scalar type
    fn from_constant(v: f64) -> Self {
        convert(v)
    }

    /// Lossy view of the scalar used for diagnostics
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}
