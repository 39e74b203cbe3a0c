#![cfg(feature = "serde")]

use nalgebra::dvector;
use splina::prelude::*;

#[test]
fn spline_round_trips_through_json() -> anyhow::Result<()> {
    let w = std::f64::consts::FRAC_1_SQRT_2;
    let arc = Spline::try_new_rational(
        2,
        2,
        vec![dvector![1., 0.], dvector![1., 1.], dvector![0., 1.]],
        vec![1., w, 1.],
        None,
    )?;
    let json = serde_json::to_string_pretty(&arc)?;
    let restored: Spline<f64> = serde_json::from_str(&json)?;
    assert_eq!(restored, arc);
    Ok(())
}

#[test]
fn frames_serialize() -> anyhow::Result<()> {
    let spline = Spline::try_new(
        2,
        3,
        vec![dvector![0., 0., 0.], dvector![1., 1., 0.], dvector![2., 0., 1.]],
        None,
    )?;
    let frames = spline.try_compute_rmf(&spline.uniform_knot_seq(4))?;
    let json = serde_json::to_value(&frames)?;
    assert_eq!(json.as_array().map(|a| a.len()), Some(4));
    Ok(())
}
