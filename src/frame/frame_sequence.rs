use std::ops::Index;

use crate::misc::{FloatingPoint, Result, SplineError};

use super::Frame;

/// Frames aligned one to one with the parameters they were computed at.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSequence<T: FloatingPoint>(Vec<Frame<T>>);

impl<T: FloatingPoint> Default for FrameSequence<T> {
    fn default() -> Self {
        Self(vec![])
    }
}

impl<T: FloatingPoint> FrameSequence<T> {
    pub fn new(frames: Vec<Frame<T>>) -> Self {
        Self(frames)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame<T>> {
        self.0.get(index)
    }

    /// Frame at the given index
    pub fn at(&self, index: usize) -> Result<&Frame<T>> {
        self.0.get(index).ok_or(SplineError::IndexOutOfBounds {
            index,
            len: self.0.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame<T>> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Frame<T>] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Frame<T>> {
        self.0
    }
}

impl<T: FloatingPoint> Index<usize> for FrameSequence<T> {
    type Output = Frame<T>;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T: FloatingPoint> IntoIterator for FrameSequence<T> {
    type Item = Frame<T>;
    type IntoIter = std::vec::IntoIter<Frame<T>>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: FloatingPoint> IntoIterator for &'a FrameSequence<T> {
    type Item = &'a Frame<T>;
    type IntoIter = std::slice::Iter<'a, Frame<T>>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
