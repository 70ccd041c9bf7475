//! Integration tests for single-line flex containers.

use wallaby_geometry::{Rect, RectEdges, Size};
use wallaby_layout::style::{AlignItems, AlignSelf, FlexDirection, JustifyContent, Position};
use wallaby_layout::{
    BoxId, BoxKind, BoxStyle, BoxTree, LayoutConfig, LayoutEngine, Length, TextMetrics,
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

fn engine() -> LayoutEngine {
    LayoutEngine::new(LayoutConfig {
        viewport: Size::new(800.0, 600.0),
        ..LayoutConfig::default()
    })
}

fn container(tree: &mut BoxTree, style: BoxStyle) -> BoxId {
    let id = tree.create_box(BoxKind::FlexContainer, style);
    tree.append_child(BoxId::VIEW, id).expect("append container");
    id
}

fn row(width: f32) -> BoxStyle {
    BoxStyle {
        width: Length::Fixed(width),
        ..BoxStyle::default()
    }
}

fn item(tree: &mut BoxTree, parent: BoxId, style: BoxStyle) -> BoxId {
    let id = tree.create_box(BoxKind::Block, style);
    tree.append_child(parent, id).expect("append item");
    id
}

fn sized(width: f32, height: f32) -> BoxStyle {
    BoxStyle {
        width: Length::Fixed(width),
        height: Length::Fixed(height),
        ..BoxStyle::default()
    }
}

fn frame(tree: &BoxTree, id: BoxId) -> Rect {
    tree.geometry(id).expect("live box").frame
}

// ---------------------------------------------------------------------------
// Flexible lengths
// ---------------------------------------------------------------------------

#[test]
fn test_grow_distributes_free_space_by_factor() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(600.0));
    let a = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_grow: 1.0,
            ..sized(100.0, 20.0)
        },
    );
    let b = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_grow: 2.0,
            ..sized(100.0, 20.0)
        },
    );
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, a).width, 100.0 + 400.0 / 3.0));
    assert!(approx(frame(&tree, b).width, 100.0 + 800.0 / 3.0));
    assert!(approx(frame(&tree, b).x, 100.0 + 400.0 / 3.0));
}

#[test]
fn test_items_without_grow_keep_their_size() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(600.0));
    let a = item(&mut tree, flex, sized(100.0, 20.0));
    let b = item(&mut tree, flex, sized(150.0, 20.0));
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(frame(&tree, a), 0.0, 0.0, 100.0, 20.0);
    assert_rect(frame(&tree, b), 100.0, 0.0, 150.0, 20.0);
}

#[test]
fn test_shrink_distributes_overflow_by_base_size() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(300.0));
    let a = item(&mut tree, flex, sized(100.0, 20.0));
    let b = item(&mut tree, flex, sized(300.0, 20.0));
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    // 100px of overflow, split 1:3 by scaled shrink factor.
    assert!(approx(frame(&tree, a).width, 75.0));
    assert!(approx(frame(&tree, b).width, 225.0));
}

#[test]
fn test_min_width_freezes_shrinking_item() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(300.0));
    let a = item(
        &mut tree,
        flex,
        BoxStyle {
            min_width: Length::Fixed(180.0),
            ..sized(200.0, 20.0)
        },
    );
    let b = item(&mut tree, flex, sized(200.0, 20.0));
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, a).width, 180.0));
    assert!(approx(frame(&tree, b).width, 120.0));
}

#[test]
fn test_max_width_freezes_growing_item() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(600.0));
    let a = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_grow: 1.0,
            max_width: Length::Fixed(150.0),
            ..sized(100.0, 20.0)
        },
    );
    let b = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_grow: 1.0,
            ..sized(100.0, 20.0)
        },
    );
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, a).width, 150.0));
    assert!(approx(frame(&tree, b).width, 450.0));
}

#[test]
fn test_flex_basis_replaces_width() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(600.0));
    let a = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_basis: Length::Fixed(200.0),
            ..sized(50.0, 20.0)
        },
    );
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, a).width, 200.0));
}

#[test]
fn test_auto_basis_uses_max_content() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(600.0));
    let a = item(&mut tree, flex, BoxStyle::default());
    let text = tree.create_box(
        BoxKind::Text(TextMetrics {
            min_content_width: 40.0,
            max_content_width: 120.0,
            line_height: 16.0,
        }),
        BoxStyle::default(),
    );
    tree.append_child(a, text).expect("append text");
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(frame(&tree, a), 0.0, 0.0, 120.0, 16.0);
}

// ---------------------------------------------------------------------------
// Main-axis alignment
// ---------------------------------------------------------------------------

fn justified(justify_content: JustifyContent, count: usize) -> (BoxTree, Vec<BoxId>) {
    let mut tree = BoxTree::new();
    let flex = container(
        &mut tree,
        BoxStyle {
            justify_content,
            ..row(600.0)
        },
    );
    let items = (0..count)
        .map(|_| item(&mut tree, flex, sized(100.0, 20.0)))
        .collect();
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");
    (tree, items)
}

#[test]
fn test_justify_center() {
    let (tree, items) = justified(JustifyContent::Center, 2);
    assert!(approx(frame(&tree, items[0]).x, 200.0));
    assert!(approx(frame(&tree, items[1]).x, 300.0));
}

#[test]
fn test_justify_flex_end() {
    let (tree, items) = justified(JustifyContent::FlexEnd, 2);
    assert!(approx(frame(&tree, items[0]).x, 400.0));
    assert!(approx(frame(&tree, items[1]).x, 500.0));
}

#[test]
fn test_justify_space_between() {
    let (tree, items) = justified(JustifyContent::SpaceBetween, 3);
    assert!(approx(frame(&tree, items[0]).x, 0.0));
    assert!(approx(frame(&tree, items[1]).x, 250.0));
    assert!(approx(frame(&tree, items[2]).x, 500.0));
}

#[test]
fn test_justify_space_around_and_evenly() {
    let (tree, items) = justified(JustifyContent::SpaceAround, 3);
    assert!(approx(frame(&tree, items[0]).x, 50.0));
    assert!(approx(frame(&tree, items[1]).x, 250.0));

    let (tree, items) = justified(JustifyContent::SpaceEvenly, 3);
    assert!(approx(frame(&tree, items[0]).x, 75.0));
    assert!(approx(frame(&tree, items[2]).x, 425.0));
}

#[test]
fn test_row_reverse_places_first_item_at_end() {
    let mut tree = BoxTree::new();
    let flex = container(
        &mut tree,
        BoxStyle {
            flex_direction: FlexDirection::RowReverse,
            ..row(600.0)
        },
    );
    let a = item(&mut tree, flex, sized(100.0, 20.0));
    let b = item(&mut tree, flex, sized(100.0, 20.0));
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, a).x, 500.0));
    assert!(approx(frame(&tree, b).x, 400.0));
}

// ---------------------------------------------------------------------------
// Cross-axis alignment
// ---------------------------------------------------------------------------

#[test]
fn test_stretch_fills_line_cross_size() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(600.0));
    let _ = item(&mut tree, flex, sized(100.0, 50.0));
    let stretched = item(&mut tree, flex, row(100.0));
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(frame(&tree, stretched), 100.0, 0.0, 100.0, 50.0);
    assert!(approx(frame(&tree, flex).height, 50.0));
}

#[test]
fn test_stretch_respects_max_cross_size() {
    let mut tree = BoxTree::new();
    let flex = container(
        &mut tree,
        BoxStyle {
            height: Length::Fixed(100.0),
            ..row(600.0)
        },
    );
    let capped = item(
        &mut tree,
        flex,
        BoxStyle {
            max_height: Length::Fixed(30.0),
            ..row(100.0)
        },
    );
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, capped).height, 30.0));
}

#[test]
fn test_align_items_center_and_align_self() {
    let mut tree = BoxTree::new();
    let flex = container(
        &mut tree,
        BoxStyle {
            height: Length::Fixed(100.0),
            align_items: AlignItems::Center,
            ..row(600.0)
        },
    );
    let centered = item(&mut tree, flex, sized(100.0, 40.0));
    let at_end = item(
        &mut tree,
        flex,
        BoxStyle {
            align_self: AlignSelf::FlexEnd,
            ..sized(100.0, 40.0)
        },
    );
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, centered).y, 30.0));
    assert!(approx(frame(&tree, at_end).y, 60.0));
}

#[test]
fn test_auto_cross_margin_absorbs_free_space() {
    let mut tree = BoxTree::new();
    let flex = container(
        &mut tree,
        BoxStyle {
            height: Length::Fixed(100.0),
            ..row(600.0)
        },
    );
    let pushed = item(
        &mut tree,
        flex,
        BoxStyle {
            margin: RectEdges::new(Length::Auto, Length::ZERO, Length::ZERO, Length::ZERO),
            ..sized(100.0, 40.0)
        },
    );
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, pushed).y, 60.0));
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[test]
fn test_column_grows_along_block_axis() {
    let mut tree = BoxTree::new();
    let flex = container(
        &mut tree,
        BoxStyle {
            flex_direction: FlexDirection::Column,
            height: Length::Fixed(300.0),
            ..row(400.0)
        },
    );
    let a = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_grow: 1.0,
            height: Length::Fixed(50.0),
            ..BoxStyle::default()
        },
    );
    let b = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_grow: 1.0,
            height: Length::Fixed(50.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(frame(&tree, a), 0.0, 0.0, 400.0, 150.0);
    assert_rect(frame(&tree, b), 0.0, 150.0, 400.0, 150.0);
}

#[test]
fn test_auto_height_column_sums_items() {
    let mut tree = BoxTree::new();
    let flex = container(
        &mut tree,
        BoxStyle {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::FlexStart,
            ..row(400.0)
        },
    );
    let a = item(&mut tree, flex, sized(80.0, 50.0));
    let b = item(&mut tree, flex, sized(60.0, 70.0));
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(frame(&tree, a), 0.0, 0.0, 80.0, 50.0);
    assert_rect(frame(&tree, b), 0.0, 50.0, 60.0, 70.0);
    assert!(approx(frame(&tree, flex).height, 120.0));
}

// ---------------------------------------------------------------------------
// Overrides and out-of-flow children
// ---------------------------------------------------------------------------

#[test]
fn test_overrides_are_cleared_after_layout() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(600.0));
    let a = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_grow: 1.0,
            ..sized(100.0, 20.0)
        },
    );
    let mut engine = engine();
    let _ = engine.layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(engine.overrides().is_empty());
    assert!(!engine.overrides().has_entry(a));
}

#[test]
fn test_relayout_keeps_flexed_sizes() {
    let mut tree = BoxTree::new();
    let flex = container(&mut tree, row(600.0));
    let a = item(
        &mut tree,
        flex,
        BoxStyle {
            flex_grow: 1.0,
            ..sized(100.0, 20.0)
        },
    );
    let mut engine = engine();
    let _ = engine.layout(&mut tree, BoxId::VIEW).expect("first layout");
    let first = frame(&tree, a);

    tree.mark_needs_layout(flex).expect("mark");
    let _ = engine.layout(&mut tree, BoxId::VIEW).expect("second layout");
    assert_eq!(frame(&tree, a), first);
    assert!(approx(first.width, 600.0));
}

#[test]
fn test_absolute_child_does_not_take_part() {
    let mut tree = BoxTree::new();
    let flex = container(
        &mut tree,
        BoxStyle {
            position: Position::Relative,
            justify_content: JustifyContent::Center,
            ..row(600.0)
        },
    );
    let abs = item(
        &mut tree,
        flex,
        BoxStyle {
            position: Position::Absolute,
            ..sized(50.0, 50.0)
        },
    );
    let a = item(&mut tree, flex, sized(100.0, 20.0));
    let _ = engine().layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(frame(&tree, a).x, 250.0));
    assert_rect(frame(&tree, abs), 0.0, 0.0, 50.0, 50.0);
    assert!(approx(frame(&tree, flex).height, 20.0));
}
