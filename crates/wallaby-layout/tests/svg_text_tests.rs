//! Integration tests for SVG text layout.

use wallaby_geometry::{Point, Rect, RectEdges, Size};
use wallaby_layout::overflow::visual_overflow_rect;
use wallaby_layout::style::{TextAnchor, TextShadow};
use wallaby_layout::svg_text::layout_characters;
use wallaby_layout::{
    ApproximateGlyphMetrics, BoxId, BoxKind, BoxStyle, BoxTree, GlyphMetrics, LayoutConfig,
    LayoutEngine, Length, SvgTextContent,
};

/// Every glyph is 8 wide with a 12 / 4 ascent / descent split, regardless
/// of font size, so bounds come out exact.
struct Mono;

impl GlyphMetrics for Mono {
    fn advance(&self, _ch: char, _font_size: f32) -> f32 {
        8.0
    }

    fn ascent(&self, _font_size: f32) -> f32 {
        12.0
    }

    fn descent(&self, _font_size: f32) -> f32 {
        4.0
    }
}

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

fn assert_point(actual: Point, x: f32, y: f32) {
    assert!(
        approx(actual.x, x) && approx(actual.y, y),
        "expected ({x}, {y}), got {actual:?}"
    );
}

fn content(text: &str, x: &[f32], y: &[f32]) -> SvgTextContent {
    SvgTextContent {
        text: text.to_owned(),
        x: x.to_vec(),
        y: y.to_vec(),
        font_size: 16.0,
        ..SvgTextContent::default()
    }
}

fn origins(text: &SvgTextContent, style: &BoxStyle) -> Vec<Point> {
    layout_characters(text, style, &Mono)
        .fragments
        .iter()
        .map(|fragment| fragment.origin)
        .collect()
}

// ---------------------------------------------------------------------------
// Character positioning
// ---------------------------------------------------------------------------

#[test]
fn test_characters_advance_from_start_position() {
    let layout = layout_characters(&content("AB", &[5.0], &[20.0]), &BoxStyle::default(), &Mono);

    assert_eq!(layout.fragments.len(), 2);
    assert_eq!(layout.fragments[0].character, 'A');
    assert_point(layout.fragments[0].origin, 5.0, 20.0);
    assert_point(layout.fragments[1].origin, 13.0, 20.0);
    assert_rect(layout.fragments[0].bounds, 5.0, 8.0, 8.0, 16.0);
    assert_rect(layout.object_bounding_box, 5.0, 8.0, 16.0, 16.0);
}

#[test]
fn test_absolute_x_resets_current_position() {
    let positions = origins(&content("AB", &[0.0, 50.0], &[]), &BoxStyle::default());
    assert_point(positions[0], 0.0, 0.0);
    assert_point(positions[1], 50.0, 0.0);
}

#[test]
fn test_relative_shifts_accumulate() {
    let text = SvgTextContent {
        dx: vec![1.0, 2.0],
        dy: vec![0.0, 3.0],
        ..content("AB", &[], &[])
    };
    let positions = origins(&text, &BoxStyle::default());
    assert_point(positions[0], 1.0, 0.0);
    assert_point(positions[1], 11.0, 3.0);
}

#[test]
fn test_last_rotate_value_repeats() {
    let text = SvgTextContent {
        rotate: vec![10.0, 20.0],
        ..content("ABC", &[], &[])
    };
    let layout = layout_characters(&text, &BoxStyle::default(), &Mono);
    let rotations: Vec<f32> = layout.fragments.iter().map(|fragment| fragment.rotation).collect();
    assert_eq!(rotations.len(), 3);
    assert!(approx(rotations[0], 10.0));
    assert!(approx(rotations[1], 20.0));
    assert!(approx(rotations[2], 20.0));
}

#[test]
fn test_rotated_glyph_bounds_grow() {
    let text = SvgTextContent {
        rotate: vec![45.0],
        ..content("A", &[], &[])
    };
    let layout = layout_characters(&text, &BoxStyle::default(), &Mono);
    let bounds = layout.fragments[0].bounds;
    assert!(bounds.width > 8.0);
    assert!(bounds.height > 8.0);
}

#[test]
fn test_empty_text_has_no_fragments() {
    let layout = layout_characters(&content("", &[10.0], &[10.0]), &BoxStyle::default(), &Mono);
    assert!(layout.fragments.is_empty());
    assert_rect(layout.object_bounding_box, 0.0, 0.0, 0.0, 0.0);
}

// ---------------------------------------------------------------------------
// Anchoring
// ---------------------------------------------------------------------------

#[test]
fn test_middle_anchor_centers_chunk() {
    let style = BoxStyle {
        text_anchor: TextAnchor::Middle,
        ..BoxStyle::default()
    };
    let positions = origins(&content("AB", &[100.0], &[]), &style);
    assert_point(positions[0], 92.0, 0.0);
    assert_point(positions[1], 100.0, 0.0);
}

#[test]
fn test_end_anchor_shifts_each_chunk() {
    let style = BoxStyle {
        text_anchor: TextAnchor::End,
        ..BoxStyle::default()
    };
    let positions = origins(&content("AB", &[100.0, 200.0], &[]), &style);
    assert_point(positions[0], 92.0, 0.0);
    assert_point(positions[1], 192.0, 0.0);
}

// ---------------------------------------------------------------------------
// Paint bounds
// ---------------------------------------------------------------------------

#[test]
fn test_stroke_and_shadow_grow_paint_bounds() {
    let style = BoxStyle {
        stroke_width: 2.0,
        text_shadow: vec![TextShadow {
            offset_x: 3.0,
            offset_y: 4.0,
            blur: 0.0,
        }],
        ..BoxStyle::default()
    };
    let layout = layout_characters(&content("AB", &[5.0], &[20.0]), &style, &Mono);

    assert_rect(layout.object_bounding_box, 5.0, 8.0, 16.0, 16.0);
    assert_rect(layout.stroke_bounding_box, 3.0, 6.0, 20.0, 20.0);
    assert_rect(layout.repaint_rect, 3.0, 6.0, 23.0, 24.0);
}

#[test]
fn test_approximate_metrics_ratios() {
    let metrics = ApproximateGlyphMetrics;
    assert!(approx(metrics.advance('x', 10.0), 6.0));
    assert!(approx(metrics.ascent(10.0), 8.0));
    assert!(approx(metrics.descent(10.0), 2.0));
}

// ---------------------------------------------------------------------------
// In a tree
// ---------------------------------------------------------------------------

fn svg_scene(style: BoxStyle) -> (BoxTree, BoxId, BoxId, BoxId) {
    let mut tree = BoxTree::new();
    let parent = tree.create_box(
        BoxKind::Block,
        BoxStyle {
            padding: RectEdges::uniform(Length::Fixed(10.0)),
            ..BoxStyle::default()
        },
    );
    tree.append_child(BoxId::VIEW, parent).expect("append parent");
    let svg = tree.create_box(BoxKind::SvgText(content("AB", &[5.0], &[20.0])), style);
    tree.append_child(parent, svg).expect("append svg");
    let sibling = tree.create_box(
        BoxKind::Block,
        BoxStyle {
            height: Length::Fixed(20.0),
            ..BoxStyle::default()
        },
    );
    tree.append_child(parent, sibling).expect("append sibling");

    let _ = LayoutEngine::new(LayoutConfig {
        viewport: Size::new(800.0, 600.0),
        ..LayoutConfig::default()
    })
    .with_glyph_metrics(Mono)
    .layout(&mut tree, BoxId::VIEW)
    .expect("layout");
    (tree, parent, svg, sibling)
}

#[test]
fn test_svg_text_frame_in_parent_user_space() {
    let (tree, _, svg, _) = svg_scene(BoxStyle::default());

    let frame = tree.geometry(svg).expect("geometry").frame;
    assert_rect(frame, 15.0, 18.0, 16.0, 16.0);

    let layout = tree.svg_text_layout(svg).expect("svg layout");
    assert_point(layout.fragments[0].origin, 0.0, 12.0);
    assert_point(layout.fragments[1].origin, 8.0, 12.0);
    // The bounding boxes stay in user space.
    assert_rect(layout.object_bounding_box, 5.0, 8.0, 16.0, 16.0);
}

#[test]
fn test_svg_text_stroke_becomes_visual_overflow() {
    let (tree, _, svg, _) = svg_scene(BoxStyle {
        stroke_width: 2.0,
        ..BoxStyle::default()
    });

    assert_rect(visual_overflow_rect(&tree, svg).expect("rect"), -2.0, -2.0, 20.0, 20.0);
}

#[test]
fn test_svg_text_does_not_affect_sibling_flow() {
    let (tree, parent, _, sibling) = svg_scene(BoxStyle::default());

    let frame = tree.geometry(sibling).expect("geometry").frame;
    assert_rect(frame, 10.0, 10.0, 780.0, 20.0);
    assert!(approx(tree.geometry(parent).expect("geometry").frame.height, 40.0));
}
