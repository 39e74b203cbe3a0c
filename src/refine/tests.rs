use approx::assert_relative_eq;
use nalgebra::dvector;

use super::*;
use crate::curve::Spline;
use crate::misc::{Invertible, SplineError};

fn cubic() -> Spline<f64> {
    Spline::try_new(
        3,
        2,
        vec![
            dvector![120., 100.],
            dvector![270., 40.],
            dvector![370., 490.],
            dvector![590., 40.],
            dvector![570., 490.],
            dvector![420., 480.],
            dvector![220., 500.],
        ],
        None,
    )
    .unwrap()
}

fn assert_same_shape(a: &Spline<f64>, b: &Spline<f64>) {
    for u in a.uniform_knot_seq(33) {
        assert_relative_eq!(a.point_at(u).unwrap(), b.point_at(u).unwrap(), epsilon = 1e-9);
    }
}

#[test]
fn insert_at_an_existing_knot() {
    let spline = cubic();
    let (refined, index) = spline.try_insert_knot(0.5, 2).unwrap();
    assert_eq!(index, 7);
    assert_eq!(refined.num_control_points(), 9);
    assert_eq!(
        refined.knots().to_vec(),
        vec![0., 0., 0., 0., 0.25, 0.5, 0.5, 0.5, 0.75, 1., 1., 1., 1.]
    );
    assert_same_shape(&spline, &refined);
}

#[test]
fn insertion_beyond_the_order_fails() {
    let spline = cubic();
    assert_eq!(
        spline.try_insert_knot(0.5, 4).map(|(s, _)| s),
        Err(SplineError::MultiplicityExceeded {
            knot: 0.5,
            multiplicity: 5,
            order: 4
        })
    );
    assert!(matches!(
        spline.try_insert_knot(1.5, 1),
        Err(SplineError::ParameterOutOfDomain { .. })
    ));
}

#[test]
fn zero_insertions_leave_the_spline_unchanged() {
    let spline = cubic();
    let (same, index) = spline.try_insert_knot(0.3, 0).unwrap();
    assert_eq!(same, spline);
    assert_eq!(index, 4);
}

#[test]
fn split_knot_creates_full_multiplicity() {
    let spline = cubic();
    let (split, last) = spline.try_split_knot(0.6).unwrap();
    assert_eq!(split.knots().as_slice()[last - 3..=last], [0.6; 4]);
    assert!(split.evaluate(0.6).unwrap().results().len() == 2);

    let (again, again_last) = split.try_split_knot(0.6).unwrap();
    assert_eq!(again, split);
    assert_eq!(again_last, last);
}

#[test]
fn multiple_knots_are_grouped() {
    let spline = cubic();
    let refined = spline.try_insert_knots(&[0.1, 0.10001, 0.9]).unwrap();
    let multiplicity = refined.knots().multiplicity();
    let at = |u: f64| {
        multiplicity
            .iter()
            .find(|m| (m.knot() - u).abs() < 1e-3)
            .map(|m| m.multiplicity())
    };
    assert_eq!(at(0.1), Some(2));
    assert_eq!(at(0.9), Some(1));
    assert_same_shape(&spline, &refined);
}

#[test]
fn split_preserves_both_halves() {
    let spline = cubic();
    let (left, right) = spline.try_split(0.3).unwrap();
    assert_eq!(left.knots_domain(), (0., 0.3));
    assert_eq!(right.knots_domain(), (0.3, 1.));
    for u in [0., 0.1, 0.2, 0.3] {
        assert_relative_eq!(left.point_at(u).unwrap(), spline.point_at(u).unwrap(), epsilon = 1e-9);
    }
    for u in [0.3, 0.5, 0.8, 1.] {
        assert_relative_eq!(
            right.point_at(u).unwrap(),
            spline.point_at(u).unwrap(),
            epsilon = 1e-9,
        );
    }
    assert!(matches!(spline.try_split(0.), Err(SplineError::EmptyDomain { .. })));
    assert!(matches!(spline.try_split(1.), Err(SplineError::EmptyDomain { .. })));
}

#[test]
fn reversed_sub_spline() {
    let spline = cubic();
    let forward = spline.try_sub_spline(0.2, 0.7).unwrap();
    let backward = spline.try_sub_spline(0.7, 0.2).unwrap();
    assert_eq!(backward, forward.inverse());

    let (start, end) = backward.knots_domain();
    assert_relative_eq!(
        backward.point_at(start).unwrap(),
        spline.point_at(0.7).unwrap(),
        epsilon = 1e-9,
    );
    assert_relative_eq!(
        backward.point_at(end).unwrap(),
        spline.point_at(0.2).unwrap(),
        epsilon = 1e-9,
    );
    assert!(spline.try_sub_spline(0.4, 0.4).is_err());
}

#[test]
fn refinement_agrees_right_next_to_knots() {
    let spline = cubic();
    let refined = spline.try_insert_knots(&[0.3]).unwrap();
    for u in [0.3 - 5e-5, 0.3 + 5e-5, 0.30008, 0.5 - 5e-5, 0.5 + 5e-5, 0.50009] {
        let before = spline.point_at(u).unwrap();
        let after = refined.point_at(u).unwrap();
        assert!((&before - &after).norm() < 1e-5, "{u}: {before} vs {after}");
    }
    assert!((spline.point_at(0.50009).unwrap() - spline.point_at(0.5).unwrap()).norm() > 1e-6);
}

#[test]
fn insertion_next_to_a_knot_raises_its_multiplicity() {
    let spline = cubic();
    let (refined, index) = spline.try_insert_knot(0.50005, 1).unwrap();
    assert_eq!(index, 6);
    assert_eq!(
        refined.knots().to_vec(),
        vec![0., 0., 0., 0., 0.25, 0.5, 0.5, 0.75, 1., 1., 1., 1.]
    );
    assert_same_shape(&spline, &refined);
}
