//! Integration tests for coordinate mapping through accumulated transforms.

use quickcheck_macros::quickcheck;
use wallaby_geometry::{
    Offset, Point, Quad, Rect, TransformState,
    TransformationMatrix,
};

use wallaby_geometry::ApplyTransformDirection::{ApplyTransform, UnapplyInverseTransform};
use wallaby_geometry::TransformAccumulation::{AccumulateTransform, FlattenTransform};

fn approx_point(actual: Point, x: f32, y: f32) -> bool {
    (actual.x - x).abs() < 1e-3 && (actual.y - y).abs() < 1e-3
}

#[test]
fn test_offset_only_moves_accumulate() {
    let mut state = TransformState::new(ApplyTransform, Point::new(1.0, 1.0));
    state.move_by(Offset::new(10.0, 5.0), AccumulateTransform);
    state.move_by(Offset::new(10.0, 5.0), AccumulateTransform);

    assert!(!state.is_matrix_accumulated());
    assert_eq!(state.accumulated_offset(), Some(Offset::new(20.0, 10.0)));
    let mapped = state.mapped_point();
    assert_eq!(mapped.point, Point::new(21.0, 11.0));
    assert!(!mapped.was_clamped);
}

#[test]
fn test_unapply_subtracts_offsets() {
    let mut state = TransformState::new(UnapplyInverseTransform, Point::new(21.0, 11.0));
    state.move_by(Offset::new(20.0, 10.0), AccumulateTransform);
    assert_eq!(state.mapped_point().point, Point::new(1.0, 1.0));
}

#[test]
fn test_translation_matrix_stays_offset_only() {
    let mut state = TransformState::new(ApplyTransform, Point::ZERO);
    let still_invertible = state.apply_transform(
        &TransformationMatrix::translation(3.0, 4.0),
        AccumulateTransform,
    );
    assert!(still_invertible);
    assert!(!state.is_matrix_accumulated());
    assert_eq!(state.mapped_point().point, Point::new(3.0, 4.0));
}

#[test]
fn test_scale_promotes_to_matrix() {
    let mut state = TransformState::new(ApplyTransform, Point::new(1.0, 1.0));
    state.move_by(Offset::new(10.0, 0.0), AccumulateTransform);
    let _ = state.apply_transform(&TransformationMatrix::scale(2.0, 2.0), AccumulateTransform);

    assert!(state.is_matrix_accumulated());
    assert_eq!(state.accumulated_offset(), None);
    // Inner offset first, then the outer scale.
    assert!(approx_point(state.mapped_point().point, 22.0, 2.0));

    // Promotion is one-way.
    state.move_by(Offset::new(1.0, 1.0), AccumulateTransform);
    assert!(state.is_matrix_accumulated());
    assert!(approx_point(state.mapped_point().point, 23.0, 3.0));
}

#[test]
fn test_unapply_through_scale_and_offset() {
    // Walking top-down: outer scale, then the child's offset.
    let mut state = TransformState::new(UnapplyInverseTransform, Point::new(22.0, 2.0));
    let _ = state.apply_transform(&TransformationMatrix::scale(2.0, 2.0), AccumulateTransform);
    state.move_by(Offset::new(10.0, 0.0), AccumulateTransform);
    assert!(approx_point(state.mapped_point().point, 1.0, 1.0));
}

#[test]
fn test_flatten_resets_matrix_but_stays_promoted() {
    let mut state = TransformState::new(ApplyTransform, Point::new(1.0, 2.0));
    let _ = state.apply_transform(&TransformationMatrix::scale(3.0, 3.0), AccumulateTransform);
    assert!(state.flatten());

    assert!(state.is_matrix_accumulated());
    assert!(state.accumulated_transform().is_identity());
    assert!(approx_point(state.mapped_point().point, 3.0, 6.0));
}

#[test]
fn test_flatten_step_maps_immediately() {
    let mut state = TransformState::new(ApplyTransform, Point::new(1.0, 0.0));
    let _ = state.apply_transform(&TransformationMatrix::rotation(90.0), FlattenTransform);
    assert!(state.accumulated_transform().is_identity());
    assert!(approx_point(state.mapped_point().point, 0.0, 1.0));
}

#[test]
fn test_non_invertible_unapply_is_clamped() {
    let mut state = TransformState::new(UnapplyInverseTransform, Point::new(5.0, 5.0));
    let _ = state.apply_transform(&TransformationMatrix::scale(0.0, 0.0), AccumulateTransform);

    let mapped = state.mapped_point();
    assert!(mapped.was_clamped);
    // Identity fallback leaves the point where it was.
    assert_eq!(mapped.point, Point::new(5.0, 5.0));

    let flattened_cleanly = state.flatten();
    assert!(!flattened_cleanly);
    assert!(state.was_clamped());
}

#[test]
fn test_non_invertible_apply_is_not_clamped() {
    let mut state = TransformState::new(ApplyTransform, Point::new(5.0, 5.0));
    let ok = state.apply_transform(&TransformationMatrix::scale(0.0, 0.0), FlattenTransform);
    assert!(ok);
    assert_eq!(state.mapped_point().point, Point::ZERO);
    assert!(!state.was_clamped());
}

#[test]
fn test_quads_are_mapped() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    let mut state = TransformState::new_with_quad(ApplyTransform, Point::ZERO, Quad::from_rect(&rect));
    state.set_second_quad(Quad::from_rect(&Rect::new(0.0, 0.0, 1.0, 1.0)));
    state.move_by(Offset::new(5.0, 0.0), AccumulateTransform);

    let Some(first) = state.mapped_quad() else {
        panic!("quad is tracked");
    };
    assert_eq!(first.quad.bounding_box(), Rect::new(5.0, 0.0, 10.0, 10.0));

    let _ = state.apply_transform(&TransformationMatrix::rotation(90.0), AccumulateTransform);
    let Some(second) = state.mapped_second_quad() else {
        panic!("second quad is tracked");
    };
    let bounds = second.quad.bounding_box();
    assert!(approx_point(bounds.origin(), -1.0, 5.0));
}

#[test]
fn test_point_only_state_has_no_quad() {
    let state = TransformState::new(ApplyTransform, Point::ZERO);
    assert!(state.mapped_quad().is_none());
    assert!(state.mapped_second_quad().is_none());
}

/// Accumulating translations one at a time and then meeting an identity
/// matrix maps a point the same way as one translation matrix.
#[quickcheck]
fn prop_offset_accumulation_matches_matrix(steps: Vec<(i8, i8)>, x: i8, y: i8) -> bool {
    let start = Point::new(f32::from(x), f32::from(y));

    let mut incremental = TransformState::new(ApplyTransform, start);
    let (mut total_x, mut total_y) = (0.0_f64, 0.0_f64);
    for &(dx, dy) in &steps {
        incremental.move_by(
            Offset::new(f32::from(dx), f32::from(dy)),
            AccumulateTransform,
        );
        total_x += f64::from(dx);
        total_y += f64::from(dy);
    }
    let _ = incremental.apply_transform(&TransformationMatrix::IDENTITY, AccumulateTransform);

    let mut direct = TransformState::new(ApplyTransform, start);
    let _ = direct.apply_transform(
        &TransformationMatrix::translation(total_x, total_y),
        AccumulateTransform,
    );

    incremental.mapped_point() == direct.mapped_point()
}

/// Mapping a point down through a chain and then back up returns it.
#[quickcheck]
fn prop_apply_then_unapply_round_trips(dx: i8, dy: i8, scale: u8) -> bool {
    let factor = f64::from(scale % 8 + 1);
    let offset = Offset::new(f32::from(dx), f32::from(dy));
    let start = Point::new(3.0, -7.0);

    let mut up = TransformState::new(ApplyTransform, start);
    up.move_by(offset, AccumulateTransform);
    let _ = up.apply_transform(&TransformationMatrix::scale(factor, factor), AccumulateTransform);
    let ancestor_point = up.mapped_point().point;

    let mut down = TransformState::new(UnapplyInverseTransform, ancestor_point);
    let _ = down.apply_transform(&TransformationMatrix::scale(factor, factor), AccumulateTransform);
    down.move_by(offset, AccumulateTransform);

    approx_point(down.mapped_point().point, start.x, start.y)
}
