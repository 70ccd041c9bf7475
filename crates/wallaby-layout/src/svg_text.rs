//! SVG text layout.
//!
//! [SVG 2 § 11.5 Text layout](https://www.w3.org/TR/SVG2/text.html#TextLayout)
//!
//! An SVG `<text>` box does not take part in CSS flow. Each character is
//! placed at an explicit or running "current text position" in its
//! parent's user space, and the box's frame is then derived from the
//! union of the placed glyphs.

use serde::Serialize;
use wallaby_geometry::{Offset, Point, Rect, TransformationMatrix};

use crate::box_model::BoxGeometry;
use crate::context::LayoutContext;
use crate::error::Result;
use crate::overflow::{add_visual_overflow, clear_overflow};
use crate::style::{BoxStyle, TextAnchor, text_shadow_outsets};
use crate::tree::{BoxId, BoxKind, BoxTree, SvgTextContent};

/// Glyph measurement for SVG text.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
pub trait GlyphMetrics {
    /// Horizontal advance of `ch` at `font_size`.
    fn advance(&self, ch: char, font_size: f32) -> f32;

    /// Height above the baseline.
    fn ascent(&self, font_size: f32) -> f32;

    /// Depth below the baseline.
    fn descent(&self, font_size: f32) -> f32;
}

/// Approximate glyph metrics using fixed ratios.
///
/// Every glyph advances 0.6× the font size; ascent and descent split the
/// em box 0.8 / 0.2. Used when no font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateGlyphMetrics;

impl GlyphMetrics for ApproximateGlyphMetrics {
    fn advance(&self, _ch: char, font_size: f32) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        font_size * CHAR_WIDTH_RATIO
    }

    fn ascent(&self, font_size: f32) -> f32 {
        const ASCENT_RATIO: f32 = 0.8;
        font_size * ASCENT_RATIO
    }

    fn descent(&self, font_size: f32) -> f32 {
        const DESCENT_RATIO: f32 = 0.2;
        font_size * DESCENT_RATIO
    }
}

/// One positioned character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacterFragment {
    /// The character.
    pub character: char,
    /// Start of the glyph on the baseline.
    pub origin: Point,
    /// Horizontal advance.
    pub advance: f32,
    /// Rotation about `origin`, in degrees.
    pub rotation: f32,
    /// Bounding box of the rotated glyph cell.
    pub bounds: Rect,
}

/// The result of laying out one `<text>` element.
///
/// Straight out of [`layout_characters`] everything is in the parent's user
/// space. Once stored on a box by [`update_position_and_overflow`], the
/// fragments are relative to the box's frame origin while the bounding
/// boxes stay in user space.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SvgTextLayout {
    /// The placed characters.
    pub fragments: Vec<CharacterFragment>,
    /// Union of the glyph cells.
    pub object_bounding_box: Rect,
    /// The object bounding box grown by the stroke width.
    pub stroke_bounding_box: Rect,
    /// The stroke bounding box grown by the text shadows.
    pub repaint_rect: Rect,
}

/// [§ 11.5.2 Per-character positioning](https://www.w3.org/TR/SVG2/text.html#TextLayoutAlgorithm)
///
/// "If the attribute is specified, then the current text position is set
/// to the specified value. ... The dx and dy attributes shift the current
/// text position."
///
/// Missing list entries leave the running position alone. The last
/// `rotate` value applies to every character after it.
#[must_use]
pub fn layout_characters(
    content: &SvgTextContent,
    style: &BoxStyle,
    metrics: &dyn GlyphMetrics,
) -> SvgTextLayout {
    let font_size = content.font_size.max(0.0);
    let ascent = metrics.ascent(font_size);
    let descent = metrics.descent(font_size);

    let mut fragments = Vec::new();
    // Index of the first fragment of each anchored chunk.
    let mut chunk_starts = Vec::new();
    let mut current = Point::ZERO;
    let mut rotation = 0.0;

    for (index, character) in content.text.chars().enumerate() {
        let x = content.x.get(index).copied();
        let y = content.y.get(index).copied();
        // STEP 1: An absolute position starts a new anchored chunk.
        if index == 0 || x.is_some() || y.is_some() {
            chunk_starts.push(fragments.len());
        }
        if let Some(x) = x {
            current.x = x;
        }
        if let Some(y) = y {
            current.y = y;
        }

        // STEP 2: Relative shifts.
        current += Offset::new(
            content.dx.get(index).copied().unwrap_or(0.0),
            content.dy.get(index).copied().unwrap_or(0.0),
        );

        // STEP 3: The last rotate value repeats.
        if let Some(&angle) = content.rotate.get(index).or(content.rotate.last()) {
            rotation = angle;
        }

        let advance = metrics.advance(character, font_size);
        fragments.push(CharacterFragment {
            character,
            origin: current,
            advance,
            rotation,
            bounds: Rect::ZERO,
        });
        current.x += advance;
    }

    // STEP 4: text-anchor shifts each chunk as a whole.
    chunk_starts.push(fragments.len());
    for window in chunk_starts.windows(2) {
        let (start, end) = (window[0], window[1]);
        let Some(chunk) = fragments.get_mut(start..end) else {
            continue;
        };
        let shift = anchor_shift(style.text_anchor, chunk);
        if shift != 0.0 {
            for fragment in chunk.iter_mut() {
                fragment.origin.x += shift;
            }
        }
    }

    let mut object_bounding_box = Rect::ZERO;
    for (index, fragment) in fragments.iter_mut().enumerate() {
        fragment.bounds = glyph_cell_bounds(fragment, ascent, descent);
        object_bounding_box = if index == 0 {
            fragment.bounds
        } else {
            object_bounding_box.union_even_if_empty(&fragment.bounds)
        };
    }

    let stroke_bounding_box = if style.stroke_width > 0.0 {
        object_bounding_box.inflate(style.stroke_width)
    } else {
        object_bounding_box
    };
    let repaint_rect = stroke_bounding_box.inflate_edges(&text_shadow_outsets(&style.text_shadow));

    SvgTextLayout {
        fragments,
        object_bounding_box,
        stroke_bounding_box,
        repaint_rect,
    }
}

/// [§ 11.10.1 Text alignment properties](https://www.w3.org/TR/SVG2/text.html#TextAnchoringProperties)
///
/// "middle: The rendered characters are aligned such that the middle of
/// the typographic character unit is at the current text position."
fn anchor_shift(anchor: TextAnchor, chunk: &[CharacterFragment]) -> f32 {
    let (Some(first), Some(last)) = (chunk.first(), chunk.last()) else {
        return 0.0;
    };
    let length = last.origin.x + last.advance - first.origin.x;
    match anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Middle => -length / 2.0,
        TextAnchor::End => -length,
    }
}

fn glyph_cell_bounds(fragment: &CharacterFragment, ascent: f32, descent: f32) -> Rect {
    let cell = Rect::new(
        fragment.origin.x,
        fragment.origin.y - ascent,
        fragment.advance,
        ascent + descent,
    );
    if fragment.rotation == 0.0 {
        return cell;
    }
    let (ox, oy) = (f64::from(fragment.origin.x), f64::from(fragment.origin.y));
    TransformationMatrix::translation(ox, oy)
        .multiply(&TransformationMatrix::rotation(f64::from(fragment.rotation)))
        .multiply(&TransformationMatrix::translation(-ox, -oy))
        .map_rect(&cell)
}

/// Lay out an SVG text box against its parent's content box, which serves
/// as the user coordinate space.
pub(crate) fn layout_svg_text(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> Result<()> {
    let node = tree.node(id)?;
    let BoxKind::SvgText(content) = &node.kind else {
        return Ok(());
    };
    let layout = layout_characters(content, &node.style, ctx.glyph_metrics);
    update_position_and_overflow(tree, id, layout)
}

/// Size the frame to the enclosing integral rect of the object bounding
/// box and record the repaint rect as visual overflow.
///
/// The user space origin is the parent's content-box origin.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn update_position_and_overflow(
    tree: &mut BoxTree,
    id: BoxId,
    mut layout: SvgTextLayout,
) -> Result<()> {
    let user_space_origin = match tree.parent(id) {
        Some(parent) => tree.node(parent)?.geometry.content_box_rect().origin(),
        None => Point::ZERO,
    };

    clear_overflow(tree, id)?;
    let bounding_rect = layout.object_bounding_box.enclosing_integral();
    let to_local = -bounding_rect.origin().to_offset();
    for fragment in &mut layout.fragments {
        fragment.origin += to_local;
        fragment.bounds = fragment.bounds.moved_by(to_local);
    }
    let overflow_rect = layout.repaint_rect.moved_by(to_local);

    let node = tree.node_mut(id)?;
    node.geometry = BoxGeometry {
        frame: bounding_rect.moved_by(user_space_origin.to_offset()),
        ..BoxGeometry::default()
    };
    node.svg_text_layout = Some(layout);

    add_visual_overflow(tree, id, overflow_rect)
}
