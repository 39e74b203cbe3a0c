/// Types whose parametric direction can be reversed.
pub trait Invertible: Clone {
    /// Reverse the direction in place
    fn invert(&mut self);

    /// Return a reversed copy
    fn inverse(&self) -> Self {
        let mut reversed = self.clone();
        reversed.invert();
        reversed
    }
}
