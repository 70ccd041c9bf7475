//! Integration tests for absolute, fixed, and relative positioning.

use wallaby_geometry::{Point, Rect, RectEdges, Size};
use wallaby_layout::style::{Position, TransformOperation};
use wallaby_layout::{
    BoxId, BoxKind, BoxStyle, BoxTree, Direction, LayoutConfig, LayoutEngine, Length, TextMetrics,
    absolute_border_box,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn assert_rect(actual: Rect, x: f32, y: f32, width: f32, height: f32) {
    assert!(
        approx(actual.x, x)
            && approx(actual.y, y)
            && approx(actual.width, width)
            && approx(actual.height, height),
        "expected ({x}, {y}, {width}x{height}), got {actual:?}"
    );
}

fn layout(tree: &mut BoxTree) {
    let _ = LayoutEngine::new(LayoutConfig {
        viewport: Size::new(800.0, 600.0),
        ..LayoutConfig::default()
    })
    .layout(tree, BoxId::VIEW)
    .expect("layout");
}

fn add(tree: &mut BoxTree, parent: BoxId, style: BoxStyle) -> BoxId {
    let id = tree.create_box(BoxKind::Block, style);
    tree.append_child(parent, id).expect("append child");
    id
}

fn frame(tree: &BoxTree, id: BoxId) -> Rect {
    tree.geometry(id).expect("live box").frame
}

/// A relatively positioned 500x300 box at the view's origin.
fn containing_block(tree: &mut BoxTree, direction: Direction) -> BoxId {
    add(
        tree,
        BoxId::VIEW,
        BoxStyle {
            position: Position::Relative,
            direction,
            width: Length::Fixed(500.0),
            height: Length::Fixed(300.0),
            ..BoxStyle::default()
        },
    )
}

fn insets(top: Length, right: Length, bottom: Length, left: Length) -> RectEdges<Length> {
    RectEdges::new(top, right, bottom, left)
}

fn absolute(inset: RectEdges<Length>) -> BoxStyle {
    BoxStyle {
        position: Position::Absolute,
        inset,
        ..BoxStyle::default()
    }
}

// ---------------------------------------------------------------------------
// Absolute widths
// ---------------------------------------------------------------------------

#[test]
fn test_left_only_shrinks_to_fit() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let abs = add(
        &mut tree,
        cb,
        absolute(insets(Length::Auto, Length::Auto, Length::Auto, Length::Fixed(10.0))),
    );
    let text = tree.create_box(
        BoxKind::Text(TextMetrics {
            min_content_width: 50.0,
            max_content_width: 150.0,
            line_height: 20.0,
        }),
        BoxStyle::default(),
    );
    tree.append_child(abs, text).expect("append text");
    layout(&mut tree);

    assert_rect(frame(&tree, abs), 10.0, 0.0, 150.0, 20.0);
}

#[test]
fn test_shrink_to_fit_respects_min_content() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let abs = add(
        &mut tree,
        cb,
        absolute(insets(Length::Auto, Length::Auto, Length::Auto, Length::Fixed(480.0))),
    );
    let text = tree.create_box(
        BoxKind::Text(TextMetrics {
            min_content_width: 50.0,
            max_content_width: 150.0,
            line_height: 20.0,
        }),
        BoxStyle::default(),
    );
    tree.append_child(abs, text).expect("append text");
    layout(&mut tree);

    // Only 20px are left, but the box never shrinks below min-content.
    assert!(approx(frame(&tree, abs).width, 50.0));
}

#[test]
fn test_both_insets_stretch_auto_size() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let abs = add(
        &mut tree,
        cb,
        absolute(insets(
            Length::Fixed(5.0),
            Length::Fixed(20.0),
            Length::Fixed(15.0),
            Length::Fixed(10.0),
        )),
    );
    layout(&mut tree);

    assert_rect(frame(&tree, abs), 10.0, 5.0, 470.0, 280.0);
}

#[test]
fn test_percentage_insets_use_containing_block() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let abs = add(
        &mut tree,
        cb,
        BoxStyle {
            width: Length::Fixed(40.0),
            height: Length::Fixed(40.0),
            ..absolute(insets(
                Length::Percent(10.0),
                Length::Auto,
                Length::Auto,
                Length::Percent(10.0),
            ))
        },
    );
    layout(&mut tree);

    assert_rect(frame(&tree, abs), 50.0, 30.0, 40.0, 40.0);
}

#[test]
fn test_right_inset_solves_for_left() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let abs = add(
        &mut tree,
        cb,
        BoxStyle {
            width: Length::Fixed(100.0),
            height: Length::Fixed(50.0),
            ..absolute(insets(Length::Auto, Length::Fixed(10.0), Length::Fixed(10.0), Length::Auto))
        },
    );
    layout(&mut tree);

    assert_rect(frame(&tree, abs), 390.0, 240.0, 100.0, 50.0);
}

#[test]
fn test_overconstrained_ignores_end_inset_in_ltr() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let abs = add(
        &mut tree,
        cb,
        BoxStyle {
            width: Length::Fixed(100.0),
            ..absolute(insets(Length::Auto, Length::Fixed(20.0), Length::Auto, Length::Fixed(10.0)))
        },
    );
    layout(&mut tree);

    assert!(approx(frame(&tree, abs).x, 10.0));
}

#[test]
fn test_overconstrained_ignores_left_in_rtl() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Rtl);
    let abs = add(
        &mut tree,
        cb,
        BoxStyle {
            width: Length::Fixed(100.0),
            ..absolute(insets(Length::Auto, Length::Fixed(20.0), Length::Auto, Length::Fixed(10.0)))
        },
    );
    layout(&mut tree);

    assert!(approx(frame(&tree, abs).x, 380.0));
}

#[test]
fn test_auto_margins_center_between_insets() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let abs = add(
        &mut tree,
        cb,
        BoxStyle {
            width: Length::Fixed(100.0),
            height: Length::Fixed(100.0),
            margin: RectEdges::uniform(Length::Auto),
            ..absolute(RectEdges::uniform(Length::ZERO))
        },
    );
    layout(&mut tree);

    let geometry = tree.geometry(abs).expect("live box");
    assert_rect(geometry.frame, 200.0, 100.0, 100.0, 100.0);
    assert!(approx(geometry.margin.left, 200.0));
    assert!(approx(geometry.margin.top, 100.0));
}

#[test]
fn test_max_width_re_solves_stretched_size() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let abs = add(
        &mut tree,
        cb,
        BoxStyle {
            max_width: Length::Fixed(200.0),
            ..absolute(insets(Length::ZERO, Length::ZERO, Length::ZERO, Length::ZERO))
        },
    );
    layout(&mut tree);

    assert_rect(frame(&tree, abs), 0.0, 0.0, 200.0, 300.0);
}

// ---------------------------------------------------------------------------
// Static position
// ---------------------------------------------------------------------------

#[test]
fn test_all_auto_insets_use_static_position() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let _ = add(
        &mut tree,
        cb,
        BoxStyle {
            height: Length::Fixed(100.0),
            ..BoxStyle::default()
        },
    );
    let abs = add(
        &mut tree,
        cb,
        BoxStyle {
            width: Length::Fixed(60.0),
            height: Length::Fixed(40.0),
            ..absolute(RectEdges::uniform(Length::Auto))
        },
    );
    layout(&mut tree);

    assert_rect(frame(&tree, abs), 0.0, 100.0, 60.0, 40.0);
}

#[test]
fn test_static_position_through_intermediate_ancestor() {
    let mut tree = BoxTree::new();
    let cb = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            position: Position::Relative,
            padding: RectEdges::uniform(Length::Fixed(10.0)),
            ..BoxStyle::default()
        },
    );
    let wrapper = add(&mut tree, cb, BoxStyle::default());
    let _ = add(
        &mut tree,
        wrapper,
        BoxStyle {
            height: Length::Fixed(30.0),
            ..BoxStyle::default()
        },
    );
    let abs = add(
        &mut tree,
        wrapper,
        BoxStyle {
            width: Length::Fixed(20.0),
            height: Length::Fixed(20.0),
            ..absolute(RectEdges::uniform(Length::Auto))
        },
    );
    layout(&mut tree);

    assert_eq!(tree.containing_block(abs), Some(cb));
    // The frame is relative to the parent, not the containing block.
    assert_rect(frame(&tree, abs), 0.0, 30.0, 20.0, 20.0);
    assert_rect(
        absolute_border_box(&tree, abs).expect("mapped"),
        10.0,
        40.0,
        20.0,
        20.0,
    );
}

#[test]
fn test_static_position_in_rtl_anchors_right_edge() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Rtl);
    let abs = add(
        &mut tree,
        cb,
        BoxStyle {
            width: Length::Fixed(100.0),
            height: Length::Fixed(10.0),
            ..absolute(RectEdges::uniform(Length::Auto))
        },
    );
    layout(&mut tree);

    let position = tree.static_position(abs).expect("live box");
    assert!(position.right_anchored);
    assert!(!position.bottom_anchored);
    assert_eq!(position.point, Point::new(500.0, 0.0));
    assert!(approx(frame(&tree, abs).x, 400.0));
}

#[test]
fn test_absolute_box_does_not_affect_flow() {
    let mut tree = BoxTree::new();
    let cb = containing_block(&mut tree, Direction::Ltr);
    let _ = add(
        &mut tree,
        cb,
        BoxStyle {
            height: Length::Fixed(80.0),
            ..absolute(insets(Length::ZERO, Length::Auto, Length::Auto, Length::ZERO))
        },
    );
    let after = add(
        &mut tree,
        cb,
        BoxStyle {
            height: Length::Fixed(10.0),
            ..BoxStyle::default()
        },
    );
    layout(&mut tree);

    assert!(approx(frame(&tree, after).y, 0.0));
}

// ---------------------------------------------------------------------------
// Containing blocks
// ---------------------------------------------------------------------------

#[test]
fn test_fixed_box_is_placed_against_viewport() {
    let mut tree = BoxTree::new();
    let _ = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            height: Length::Fixed(100.0),
            ..BoxStyle::default()
        },
    );
    let relative = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            position: Position::Relative,
            height: Length::Fixed(50.0),
            ..BoxStyle::default()
        },
    );
    let fixed = add(
        &mut tree,
        relative,
        BoxStyle {
            position: Position::Fixed,
            width: Length::Fixed(10.0),
            height: Length::Fixed(10.0),
            inset: insets(Length::Fixed(20.0), Length::Auto, Length::Auto, Length::Fixed(30.0)),
            ..BoxStyle::default()
        },
    );
    layout(&mut tree);

    assert_eq!(tree.containing_block(fixed), Some(BoxId::VIEW));
    assert_rect(frame(&tree, fixed), 30.0, -80.0, 10.0, 10.0);
    assert_rect(absolute_border_box(&tree, fixed).expect("mapped"), 30.0, 20.0, 10.0, 10.0);
}

#[test]
fn test_transformed_ancestor_contains_fixed_box() {
    let mut tree = BoxTree::new();
    let transformed = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(200.0),
            height: Length::Fixed(200.0),
            transform: vec![TransformOperation::Translate {
                x: Length::ZERO,
                y: Length::ZERO,
            }],
            ..BoxStyle::default()
        },
    );
    let fixed = add(
        &mut tree,
        transformed,
        BoxStyle {
            position: Position::Fixed,
            ..absolute(RectEdges::uniform(Length::ZERO))
        },
    );
    layout(&mut tree);

    assert_eq!(tree.containing_block(fixed), Some(transformed));
    assert_rect(frame(&tree, fixed), 0.0, 0.0, 200.0, 200.0);
}

#[test]
fn test_containing_block_padding_box_is_the_origin() {
    let mut tree = BoxTree::new();
    let cb = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            position: Position::Relative,
            width: Length::Fixed(200.0),
            height: Length::Fixed(100.0),
            border_width: RectEdges::uniform(5.0),
            padding: RectEdges::uniform(Length::Fixed(20.0)),
            ..BoxStyle::default()
        },
    );
    let abs = add(
        &mut tree,
        cb,
        absolute(RectEdges::uniform(Length::ZERO)),
    );
    layout(&mut tree);

    // Inset from the padding edge: inside the border, over the padding.
    assert_rect(frame(&tree, abs), 5.0, 5.0, 240.0, 140.0);
}

// ---------------------------------------------------------------------------
// Relative positioning
// ---------------------------------------------------------------------------

#[test]
fn test_relative_offset_shifts_box_only() {
    let mut tree = BoxTree::new();
    let shifted = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            position: Position::Relative,
            height: Length::Fixed(40.0),
            inset: insets(Length::Fixed(5.0), Length::Auto, Length::Auto, Length::Fixed(10.0)),
            ..BoxStyle::default()
        },
    );
    let next = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            height: Length::Fixed(10.0),
            ..BoxStyle::default()
        },
    );
    layout(&mut tree);

    assert!(approx(frame(&tree, shifted).x, 10.0));
    assert!(approx(frame(&tree, shifted).y, 5.0));
    assert!(approx(frame(&tree, next).y, 40.0));
}

#[test]
fn test_relative_left_wins_over_right_in_ltr() {
    let mut tree = BoxTree::new();
    let both = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            position: Position::Relative,
            inset: insets(Length::Auto, Length::Fixed(30.0), Length::Auto, Length::Fixed(10.0)),
            ..BoxStyle::default()
        },
    );
    let right_only = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            position: Position::Relative,
            inset: insets(Length::Auto, Length::Fixed(30.0), Length::Fixed(4.0), Length::Auto),
            ..BoxStyle::default()
        },
    );
    layout(&mut tree);

    assert!(approx(frame(&tree, both).x, 10.0));
    assert!(approx(frame(&tree, right_only).x, -30.0));
    assert!(approx(frame(&tree, right_only).y, -4.0));
}

#[test]
fn test_relative_right_wins_in_rtl_container() {
    let mut tree = BoxTree::new();
    let outer = add(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            direction: Direction::Rtl,
            ..BoxStyle::default()
        },
    );
    let shifted = add(
        &mut tree,
        outer,
        BoxStyle {
            position: Position::Relative,
            width: Length::Fixed(100.0),
            inset: insets(Length::Auto, Length::Fixed(30.0), Length::Auto, Length::Fixed(10.0)),
            ..BoxStyle::default()
        },
    );
    layout(&mut tree);

    // Normal flow puts it against the right edge at 700.
    assert!(approx(frame(&tree, shifted).x, 670.0));
}
