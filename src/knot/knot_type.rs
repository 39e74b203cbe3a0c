/// Layout of a generated knot vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnotType {
    /// Uniformly spaced knots, `knot[i] = i / (len - 1)`.
    /// The curve does not pass through its end control points.
    Opened,
    /// `degree + 1` copies of 0 and 1 at the ends, uniform interior.
    /// The curve starts and ends at its first and last control points.
    #[default]
    Clamped,
    /// Every distinct knot repeated `degree + 1` times,
    /// so that each block of `degree + 1` control points is a Bezier segment.
    Beziers,
}
