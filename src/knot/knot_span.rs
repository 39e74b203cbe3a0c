/// Location of a parameter inside a knot vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnotSpan<T> {
    /// Located parameter, moved onto the domain bound or onto a knot when snapping was requested
    parameter: T,
    /// Largest index `k` with `knots[k] <= parameter`
    index: usize,
    /// Number of knots equal to the parameter
    multiplicity: usize,
}

impl<T: Copy> KnotSpan<T> {
    pub fn new(parameter: T, index: usize, multiplicity: usize) -> Self {
        Self {
            parameter,
            index,
            multiplicity,
        }
    }

    pub fn parameter(&self) -> T {
        self.parameter
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    /// Number of insertions needed to raise the multiplicity to `degree`
    pub fn insertions(&self, degree: usize) -> usize {
        degree.saturating_sub(self.multiplicity)
    }
}
