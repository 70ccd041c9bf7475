//! Integration tests for width, height, and margin resolution in normal
//! flow.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use wallaby_geometry::{Rect, RectEdges, Size};
use wallaby_layout::style::{AspectRatio, BoxSizing, FloatSide};
use wallaby_layout::{
    BoxGeometry, BoxId, BoxKind, BoxStyle, BoxTree, Direction, IntrinsicSize, LayoutConfig,
    LayoutEngine, Length, TextMetrics, WritingMode,
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

fn engine(width: f32, height: f32) -> LayoutEngine {
    LayoutEngine::new(LayoutConfig {
        viewport: Size::new(width, height),
        ..LayoutConfig::default()
    })
}

fn add(tree: &mut BoxTree, parent: BoxId, kind: BoxKind, style: BoxStyle) -> BoxId {
    let id = tree.create_box(kind, style);
    tree.append_child(parent, id).expect("append child");
    id
}

fn block(tree: &mut BoxTree, parent: BoxId, style: BoxStyle) -> BoxId {
    add(tree, parent, BoxKind::Block, style)
}

fn text(tree: &mut BoxTree, parent: BoxId, min: f32, max: f32, line_height: f32) -> BoxId {
    add(
        tree,
        parent,
        BoxKind::Text(TextMetrics {
            min_content_width: min,
            max_content_width: max,
            line_height,
        }),
        BoxStyle::default(),
    )
}

fn geometry(tree: &BoxTree, id: BoxId) -> BoxGeometry {
    *tree.geometry(id).expect("live box")
}

fn fixed_width(width: f32) -> BoxStyle {
    BoxStyle {
        width: Length::Fixed(width),
        ..BoxStyle::default()
    }
}

fn inline_margins(left: Length, right: Length) -> RectEdges<Length> {
    RectEdges::new(Length::ZERO, right, Length::ZERO, left)
}

// ---------------------------------------------------------------------------
// Widths
// ---------------------------------------------------------------------------

#[test]
fn test_view_takes_viewport_size() {
    let mut tree = BoxTree::new();
    let _ = engine(1024.0, 768.0)
        .layout(&mut tree, BoxId::VIEW)
        .expect("layout");
    assert_rect(geometry(&tree, BoxId::VIEW).frame, 0.0, 0.0, 1024.0, 768.0);
}

#[test]
fn test_auto_width_fills_containing_block() {
    let mut tree = BoxTree::new();
    let child = block(&mut tree, BoxId::VIEW, BoxStyle::default());
    let _ = text(&mut tree, child, 20.0, 100.0, 18.0);
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(geometry(&tree, child).frame, 0.0, 0.0, 800.0, 18.0);
}

#[test]
fn test_fit_content_width_is_centered_by_auto_margins() {
    let mut tree = BoxTree::new();
    let outer = block(&mut tree, BoxId::VIEW, BoxStyle::default());
    let centered = block(
        &mut tree,
        outer,
        BoxStyle {
            width: Length::FitContent,
            margin: inline_margins(Length::Auto, Length::Auto),
            ..BoxStyle::default()
        },
    );
    let _ = text(&mut tree, centered, 100.0, 400.0, 20.0);
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, centered);
    assert!(approx(geometry.frame.width, 400.0));
    assert!(approx(geometry.margin.left, 200.0));
    assert!(approx(geometry.margin.right, 200.0));
    assert!(approx(geometry.frame.x, 200.0));
}

#[test]
fn test_auto_width_inline_block_shrinks_to_fit() {
    // min(max(preferred minimum, available), preferred)
    for (available, expected) in [(400.0, 150.0), (100.0, 100.0), (30.0, 50.0)] {
        let mut tree = BoxTree::new();
        let outer = block(&mut tree, BoxId::VIEW, fixed_width(available));
        let inline_block = add(&mut tree, outer, BoxKind::InlineBlock, BoxStyle::default());
        let _ = text(&mut tree, inline_block, 50.0, 150.0, 20.0);
        let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

        let geometry = geometry(&tree, inline_block);
        assert!(
            approx(geometry.frame.width, expected),
            "available {available}: got {}",
            geometry.frame.width
        );
        assert!(approx(geometry.frame.x, 0.0));
    }
}

#[test]
fn test_auto_width_float_shrinks_to_fit() {
    let mut tree = BoxTree::new();
    let outer = block(&mut tree, BoxId::VIEW, fixed_width(400.0));
    let float = block(
        &mut tree,
        outer,
        BoxStyle {
            float: FloatSide::Left,
            ..BoxStyle::default()
        },
    );
    let _ = text(&mut tree, float, 50.0, 150.0, 20.0);
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, float).frame.width, 150.0));
}

#[test]
fn test_only_content_keywords_compute_preferred_widths() {
    let mut tree = BoxTree::new();
    let filling = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::FillAvailable,
            ..BoxStyle::default()
        },
    );
    let _ = text(&mut tree, filling, 50.0, 150.0, 20.0);
    let fixed = block(&mut tree, BoxId::VIEW, fixed_width(300.0));
    let _ = text(&mut tree, fixed, 50.0, 150.0, 20.0);
    let fitting = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::FitContent,
            ..BoxStyle::default()
        },
    );
    let _ = text(&mut tree, fitting, 50.0, 150.0, 20.0);
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, filling).frame.width, 800.0));
    assert!(!tree.has_preferred_widths(filling));
    assert!(!tree.has_preferred_widths(fixed));
    assert!(tree.has_preferred_widths(fitting));
}

#[test]
fn test_percentage_width_resolves_against_content_box() {
    let mut tree = BoxTree::new();
    let outer = block(&mut tree, BoxId::VIEW, fixed_width(600.0));
    let child = block(
        &mut tree,
        outer,
        BoxStyle {
            width: Length::Percent(50.0),
            padding: RectEdges::uniform(Length::Fixed(10.0)),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, child);
    assert!(approx(geometry.content_box_rect().width, 300.0));
    assert!(approx(geometry.frame.width, 320.0));
}

#[test]
fn test_border_box_sizing_includes_padding_and_border() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(200.0),
            box_sizing: BoxSizing::BorderBox,
            padding: RectEdges::uniform(Length::Fixed(20.0)),
            border_width: RectEdges::uniform(5.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, child);
    assert!(approx(geometry.frame.width, 200.0));
    assert_rect(geometry.padding_box_rect(), 5.0, 5.0, 190.0, 40.0);
    assert!(approx(geometry.content_box_rect().width, 150.0));
}

#[test]
fn test_percentage_padding_uses_containing_block_width() {
    let mut tree = BoxTree::new();
    let outer = block(&mut tree, BoxId::VIEW, fixed_width(400.0));
    let child = block(
        &mut tree,
        outer,
        BoxStyle {
            padding: RectEdges::uniform(Length::Percent(10.0)),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, child);
    assert!(approx(geometry.padding.top, 40.0));
    assert!(approx(geometry.frame.width, 400.0));
    assert!(approx(geometry.content_box_rect().width, 320.0));
    assert!(approx(geometry.frame.height, 80.0));
}

#[test]
fn test_calc_width_mixes_pixels_and_percentage() {
    let mut tree = BoxTree::new();
    let outer = block(&mut tree, BoxId::VIEW, fixed_width(400.0));
    let child = block(
        &mut tree,
        outer,
        BoxStyle {
            width: Length::Calc {
                px: 20.0,
                percent: 50.0,
            },
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, child).frame.width, 220.0));
}

#[test]
fn test_max_width_clamps_and_min_width_wins() {
    let mut tree = BoxTree::new();
    let clamped = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(500.0),
            max_width: Length::Fixed(300.0),
            ..BoxStyle::default()
        },
    );
    let conflicting = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(500.0),
            max_width: Length::Fixed(300.0),
            min_width: Length::Fixed(400.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, clamped).frame.width, 300.0));
    assert!(approx(geometry(&tree, conflicting).frame.width, 400.0));
}

#[test]
fn test_min_content_and_max_content_keywords() {
    let mut tree = BoxTree::new();
    let min = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::MinContent,
            ..BoxStyle::default()
        },
    );
    let _ = text(&mut tree, min, 60.0, 240.0, 10.0);
    let max = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::MaxContent,
            ..BoxStyle::default()
        },
    );
    let _ = text(&mut tree, max, 60.0, 240.0, 10.0);
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, min).frame.width, 60.0));
    // 240 wide text in a 60 wide box wraps onto four lines.
    assert!(approx(geometry(&tree, min).frame.height, 40.0));
    assert!(approx(geometry(&tree, max).frame.width, 240.0));
    assert!(approx(geometry(&tree, max).frame.height, 10.0));
}

// ---------------------------------------------------------------------------
// Margins
// ---------------------------------------------------------------------------

#[test]
fn test_overconstrained_end_margin_absorbs_remainder() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(300.0),
            margin: inline_margins(Length::Fixed(100.0), Length::Fixed(100.0)),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, child);
    assert!(approx(geometry.margin.left, 100.0));
    assert!(approx(geometry.margin.right, 400.0));
    assert!(approx(geometry.frame.x, 100.0));
}

#[test]
fn test_overconstrained_in_rtl_container_absorbs_into_left_margin() {
    let mut tree = BoxTree::new();
    let outer = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            direction: Direction::Rtl,
            ..BoxStyle::default()
        },
    );
    let child = block(
        &mut tree,
        outer,
        BoxStyle {
            width: Length::Fixed(300.0),
            margin: inline_margins(Length::Fixed(100.0), Length::Fixed(100.0)),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, child);
    assert!(approx(geometry.margin.left, 400.0));
    assert!(approx(geometry.margin.right, 100.0));
    assert!(approx(geometry.frame.x, 400.0));
}

#[test]
fn test_single_auto_margin_takes_remaining_space() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(300.0),
            margin: inline_margins(Length::Auto, Length::Fixed(100.0)),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, child);
    assert!(approx(geometry.margin.left, 400.0));
    assert!(approx(geometry.frame.x, 400.0));
}

#[test]
fn test_centering_never_pushes_past_start_edge() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(1000.0),
            margin: inline_margins(Length::Auto, Length::Auto),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, child);
    assert!(approx(geometry.margin.left, 0.0));
    assert!(approx(geometry.frame.x, 0.0));
}

#[test]
fn test_float_keeps_specified_margins() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            float: FloatSide::Left,
            width: Length::Fixed(300.0),
            margin: inline_margins(Length::Fixed(100.0), Length::Fixed(100.0)),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    let geometry = geometry(&tree, child);
    assert!(approx(geometry.margin.left, 100.0));
    assert!(approx(geometry.margin.right, 100.0));
}

#[quickcheck]
fn prop_auto_margins_center_fixed_width(width: u16, container: u16) -> TestResult {
    let (width, container) = (f32::from(width % 2000), f32::from(container % 2000 + 1));
    let mut tree = BoxTree::new();
    let outer = block(&mut tree, BoxId::VIEW, fixed_width(container));
    let child = block(
        &mut tree,
        outer,
        BoxStyle {
            width: Length::Fixed(width),
            margin: inline_margins(Length::Auto, Length::Auto),
            ..BoxStyle::default()
        },
    );
    if engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).is_err() {
        return TestResult::failed();
    }

    let geometry = geometry(&tree, child);
    let expected_start = ((container - width) / 2.0).max(0.0);
    TestResult::from_bool(
        approx(geometry.margin.left, expected_start) && geometry.margin.left >= 0.0,
    )
}

// ---------------------------------------------------------------------------
// Heights
// ---------------------------------------------------------------------------

#[test]
fn test_auto_height_sums_stacked_children() {
    let mut tree = BoxTree::new();
    let outer = block(&mut tree, BoxId::VIEW, BoxStyle::default());
    let first = block(
        &mut tree,
        outer,
        BoxStyle {
            height: Length::Fixed(50.0),
            ..BoxStyle::default()
        },
    );
    let second = block(
        &mut tree,
        outer,
        BoxStyle {
            height: Length::Fixed(70.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, first).frame.y, 0.0));
    assert!(approx(geometry(&tree, second).frame.y, 50.0));
    assert!(approx(geometry(&tree, outer).frame.height, 120.0));
}

#[test]
fn test_sibling_margins_collapse() {
    let mut tree = BoxTree::new();
    let outer = block(&mut tree, BoxId::VIEW, BoxStyle::default());
    let first = block(
        &mut tree,
        outer,
        BoxStyle {
            height: Length::Fixed(50.0),
            margin: RectEdges::new(Length::ZERO, Length::ZERO, Length::Fixed(30.0), Length::ZERO),
            ..BoxStyle::default()
        },
    );
    let second = block(
        &mut tree,
        outer,
        BoxStyle {
            height: Length::Fixed(50.0),
            margin: RectEdges::new(Length::Fixed(20.0), Length::ZERO, Length::ZERO, Length::ZERO),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, first).frame.y, 0.0));
    assert!(approx(geometry(&tree, second).frame.y, 80.0));
    assert!(approx(geometry(&tree, outer).frame.height, 130.0));
}

#[test]
fn test_percentage_height_needs_definite_containing_block() {
    let mut tree = BoxTree::new();
    let definite = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            height: Length::Fixed(400.0),
            ..BoxStyle::default()
        },
    );
    let resolved = block(
        &mut tree,
        definite,
        BoxStyle {
            height: Length::Percent(50.0),
            ..BoxStyle::default()
        },
    );
    let indefinite = block(&mut tree, BoxId::VIEW, BoxStyle::default());
    let treated_as_auto = block(
        &mut tree,
        indefinite,
        BoxStyle {
            height: Length::Percent(50.0),
            ..BoxStyle::default()
        },
    );
    let _ = text(&mut tree, treated_as_auto, 10.0, 100.0, 20.0);
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, resolved).frame.height, 200.0));
    assert!(approx(geometry(&tree, treated_as_auto).frame.height, 20.0));
}

#[test]
fn test_percentage_height_against_view_uses_viewport() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            height: Length::Percent(50.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, child).frame.height, 300.0));
}

#[test]
fn test_min_height_raises_fixed_height() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            height: Length::Fixed(50.0),
            min_height: Length::Fixed(100.0),
            ..BoxStyle::default()
        },
    );
    let capped = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            height: Length::Fixed(500.0),
            max_height: Length::Fixed(120.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, child).frame.height, 100.0));
    assert!(approx(geometry(&tree, capped).frame.height, 120.0));
}

#[test]
fn test_aspect_ratio_derives_height_from_width() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(200.0),
            aspect_ratio: AspectRatio::Ratio(2.0, 1.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(geometry(&tree, child).frame, 0.0, 0.0, 200.0, 100.0);
}

#[test]
fn test_aspect_ratio_derives_width_from_height() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            height: Length::Fixed(100.0),
            aspect_ratio: AspectRatio::Ratio(3.0, 1.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(approx(geometry(&tree, child).frame.width, 300.0));
}

#[test]
fn test_degenerate_aspect_ratio_is_reported() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            width: Length::Fixed(200.0),
            aspect_ratio: AspectRatio::Ratio(0.0, 1.0),
            ..BoxStyle::default()
        },
    );
    let report = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert!(
        report
            .diagnostics
            .contains(&wallaby_layout::LayoutError::UnresolvableAspectRatio(child))
    );
    assert!(approx(geometry(&tree, child).frame.height, 0.0));
}

// ---------------------------------------------------------------------------
// Replaced content
// ---------------------------------------------------------------------------

#[test]
fn test_replaced_uses_natural_size() {
    let mut tree = BoxTree::new();
    let image = add(
        &mut tree,
        BoxId::VIEW,
        BoxKind::Replaced(IntrinsicSize::new(320.0, 240.0)),
        BoxStyle::default(),
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(geometry(&tree, image).frame, 0.0, 0.0, 320.0, 240.0);
}

#[test]
fn test_replaced_keeps_ratio_when_one_axis_is_set() {
    let mut tree = BoxTree::new();
    let image = add(
        &mut tree,
        BoxId::VIEW,
        BoxKind::Replaced(IntrinsicSize::new(300.0, 150.0)),
        fixed_width(150.0),
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(geometry(&tree, image).frame, 0.0, 0.0, 150.0, 75.0);
}

#[test]
fn test_replaced_without_natural_size_uses_default() {
    let mut tree = BoxTree::new();
    let image = add(
        &mut tree,
        BoxId::VIEW,
        BoxKind::Replaced(IntrinsicSize::default()),
        BoxStyle::default(),
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(geometry(&tree, image).frame, 0.0, 0.0, 300.0, 150.0);
}

// ---------------------------------------------------------------------------
// Writing modes
// ---------------------------------------------------------------------------

#[test]
fn test_vertical_box_maps_logical_sizes_to_physical() {
    let mut tree = BoxTree::new();
    let child = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            writing_mode: WritingMode::VerticalLr,
            width: Length::Fixed(100.0),
            height: Length::Fixed(200.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    assert_rect(geometry(&tree, child).frame, 0.0, 0.0, 100.0, 200.0);
}

#[test]
fn test_vertical_rl_children_stack_from_the_right() {
    let mut tree = BoxTree::new();
    let outer = block(
        &mut tree,
        BoxId::VIEW,
        BoxStyle {
            writing_mode: WritingMode::VerticalRl,
            width: Length::Fixed(300.0),
            height: Length::Fixed(200.0),
            ..BoxStyle::default()
        },
    );
    let first = block(
        &mut tree,
        outer,
        BoxStyle {
            writing_mode: WritingMode::VerticalRl,
            width: Length::Fixed(50.0),
            ..BoxStyle::default()
        },
    );
    let _ = engine(800.0, 600.0).layout(&mut tree, BoxId::VIEW).expect("layout");

    // The block axis runs right to left; the inline axis fills the height.
    assert_rect(geometry(&tree, first).frame, 250.0, 0.0, 50.0, 200.0);
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

#[test]
fn test_keywords_parse_and_print_kebab_case() {
    assert_eq!("vertical-rl".parse::<WritingMode>(), Ok(WritingMode::VerticalRl));
    assert_eq!("rtl".parse::<Direction>(), Ok(Direction::Rtl));
    assert_eq!("border-box".parse::<BoxSizing>(), Ok(BoxSizing::BorderBox));
    assert!("sideways".parse::<WritingMode>().is_err());

    assert_eq!(WritingMode::SidewaysLr.to_string(), "sideways-lr");
    assert_eq!(BoxSizing::ContentBox.to_string(), "content-box");
}
