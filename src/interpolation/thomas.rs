use nalgebra::DVector;

use crate::misc::{FloatingPoint, Result, SplineError};

/// Solve a tridiagonal system with vector valued right hand sides by the Thomas algorithm
///
/// `lower[0]` and `upper[n - 1]` are ignored.
/// The system has to be strictly diagonally dominant.
pub(crate) fn solve_tridiagonal<T: FloatingPoint>(
    lower: &[T],
    diagonal: &[T],
    upper: &[T],
    rhs: &[DVector<T>],
) -> Result<Vec<DVector<T>>> {
    let n = rhs.len();
    if lower.len() != n || diagonal.len() != n || upper.len() != n {
        return Err(SplineError::InvalidParameters(format!(
            "tridiagonal system of size {} has bands of length {}, {}, {}",
            n,
            lower.len(),
            diagonal.len(),
            upper.len()
        )));
    }
    if n == 0 {
        return Ok(vec![]);
    }

    let dominant = (0..n).all(|i| {
        let below = if i == 0 { T::zero() } else { lower[i].abs() };
        let above = if i == n - 1 { T::zero() } else { upper[i].abs() };
        diagonal[i].abs() > below + above
    });
    if !dominant {
        return Err(SplineError::NoResult(
            "tridiagonal system is not diagonally dominant".to_string(),
        ));
    }

    let mut c = Vec::with_capacity(n);
    let mut d = Vec::with_capacity(n);
    c.push(upper[0] / diagonal[0]);
    d.push(&rhs[0] / diagonal[0]);
    for i in 1..n {
        let m = diagonal[i] - lower[i] * c[i - 1];
        c.push(upper[i] / m);
        d.push((&rhs[i] - &d[i - 1] * lower[i]) / m);
    }

    let mut x = d;
    for i in (0..n - 1).rev() {
        let next = x[i + 1].clone();
        x[i] -= next * c[i];
    }
    Ok(x)
}
