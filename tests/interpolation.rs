use approx::assert_relative_eq;
use nalgebra::{dvector, DVector};
use splina::prelude::*;

fn points() -> Vec<DVector<f64>> {
    vec![
        dvector![1., -1.],
        dvector![-1., 2.],
        dvector![1., 4.],
        dvector![4., 3.],
        dvector![7., 5.],
    ]
}

#[test]
fn natural_cubic_bezier_segments() -> anyhow::Result<()> {
    let points = points();
    let spline = Spline::try_interpolate_cubic_natural(&points)?;
    assert_eq!(spline.degree(), 3);
    assert_eq!(spline.dimension(), 2);
    assert_eq!(spline.num_control_points(), 16);

    let segments = spline.try_decompose()?;
    assert_eq!(segments.len(), points.len() - 1);
    for (i, segment) in segments.iter().enumerate() {
        let control_points = segment.control_points();
        assert_relative_eq!(control_points[0], points[i], epsilon = POINT_EPSILON);
        assert_relative_eq!(control_points[3], points[i + 1], epsilon = POINT_EPSILON);
    }

    let first = &segments[0];
    let expected = [
        dvector![1., -1.],
        dvector![0., 0.],
        dvector![-1., 1.],
        dvector![-1., 2.],
    ];
    for (p, q) in first.control_points().iter().zip(expected.iter()) {
        assert_relative_eq!(*p, *q, epsilon = POINT_EPSILON);
    }
    Ok(())
}

#[test]
fn natural_cubic_from_flat_coordinates() -> anyhow::Result<()> {
    let coordinates = points()
        .iter()
        .flat_map(|p| p.iter().copied())
        .collect::<Vec<_>>();
    let from_slice = Spline::try_interpolate_cubic_natural_slice(&coordinates, 2)?;
    let from_points = Spline::try_interpolate_cubic_natural(&points())?;
    assert_eq!(from_slice, from_points);

    assert!(matches!(
        Spline::try_interpolate_cubic_natural_slice(&coordinates[..3], 2),
        Err(SplineError::DimensionMismatch { .. })
    ));
    Ok(())
}

/// Left and right limits at a knot of full multiplicity
fn limits(spline: &Spline<f64>, u: f64) -> anyhow::Result<(DVector<f64>, DVector<f64>)> {
    match spline.evaluate(u)?.results() {
        [left, right] => Ok((left.clone(), right.clone())),
        results => anyhow::bail!("expected two limits at {u}, got {}", results.len()),
    }
}

#[test]
fn interpolated_curve_is_twice_differentiable() -> anyhow::Result<()> {
    let spline = Spline::try_interpolate_cubic_natural(&points())?;
    let first = spline.try_derive()?;
    let second = first.try_derive()?;

    // interior joins
    for u in [0.25, 0.5, 0.75] {
        let (left, right) = limits(&first, u)?;
        assert_relative_eq!(left, right, epsilon = 1e-8);
        let (left, right) = limits(&second, u)?;
        assert_relative_eq!(left, right, epsilon = 1e-8);
    }
    Ok(())
}

#[test]
fn join_limits_reveal_curvature_jumps() -> anyhow::Result<()> {
    // two parabolas meeting with equal slope but different curvature
    let spline = Spline::try_from_slice(
        2,
        1,
        &[0., 1., 2., 2., 3., 6.],
        Some(vec![0., 0., 0., 0.5, 0.5, 0.5, 1., 1., 1.]),
    )?;
    let first = spline.try_derive()?;
    let second = first.try_derive()?;

    let (left, right) = limits(&first, 0.5)?;
    assert_relative_eq!(left, right);
    assert_relative_eq!(left, dvector![4.]);

    let (left, right) = limits(&second, 0.5)?;
    assert_relative_eq!(left, dvector![0.]);
    assert_relative_eq!(right, dvector![16.]);
    Ok(())
}

#[test]
fn catmull_rom_passes_through_the_points() -> anyhow::Result<()> {
    let points = points();
    let spline = Spline::<f64>::interpolate(
        &points,
        InterpolationStyle::CatmullRom(CatmullRomOptions::default()),
    )?;
    assert_eq!(spline.num_control_points(), 16);
    for (segment, (a, b)) in spline
        .try_decompose()?
        .iter()
        .zip(points.iter().zip(points.iter().skip(1)))
    {
        let (start, end) = segment.knots_domain();
        assert_relative_eq!(segment.point_at(start)?, *a, epsilon = 1e-9);
        assert_relative_eq!(segment.point_at(end)?, *b, epsilon = 1e-9);
    }
    Ok(())
}
