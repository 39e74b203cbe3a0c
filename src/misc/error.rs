use thiserror::Error;

/// Errors raised by spline construction and the operations on splines.
///
/// Scalars are reported as `f64` regardless of the scalar type of the spline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("invalid knot vector: {0}")]
    InvalidKnotVector(String),

    #[error("parameter {parameter} is outside of the domain [{min}, {max}]")]
    ParameterOutOfDomain { parameter: f64, min: f64, max: f64 },

    #[error("degenerate weight {weight} at parameter {parameter}")]
    DegenerateWeight { parameter: f64, weight: f64 },

    #[error("multiplicity of knot {knot} would be {multiplicity}, exceeding the order {order}")]
    MultiplicityExceeded {
        knot: f64,
        multiplicity: usize,
        order: usize,
    },

    #[error("spline is not differentiable at knot {knot}")]
    NonDifferentiable { knot: f64 },

    #[error("spline of degree {degree} cannot be derived")]
    DegreeTooLowToDerive { degree: usize },

    #[error("tangent vanishes at parameter {parameter}")]
    ZeroTangent { parameter: f64 },

    #[error("at least {required} points are required, got {given}")]
    InsufficientPoints { given: usize, required: usize },

    #[error("dimension must be at least 1")]
    DimensionZero,

    #[error("dimension mismatch: expected {expected}, got {given}")]
    DimensionMismatch { expected: usize, given: usize },

    #[error("degree {degree} requires more than {control_points} control points")]
    DegreeTooHigh { degree: usize, control_points: usize },

    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("domain [{min}, {max}] is empty")]
    EmptyDomain { min: f64, max: f64 },

    #[error("no result: {0}")]
    NoResult(String),
}

pub type Result<T> = std::result::Result<T, SplineError>;
