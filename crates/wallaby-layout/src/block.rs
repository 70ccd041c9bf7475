//! Block formatting.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block. The vertical
//! distance between two sibling boxes is determined by the 'margin'
//! properties. Vertical margins between adjacent block-level boxes in a
//! block formatting context collapse."
//!
//! Children are stacked along the container's block axis in logical
//! coordinates. The container converts them to physical positions once
//! its own block size is known, because a flipped block axis places the
//! first child against the far edge.

use crate::context::LayoutContext;
use crate::engine::layout_box;
use crate::error::Result;
use crate::style::{Direction, FloatSide, LogicalSide};
use crate::tree::{BoxId, BoxTree, TextMetrics};

/// Where a child goes, relative to the inline-start and block-start edges
/// of its parent's content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FlowPlacement {
    /// The child.
    pub(crate) child: BoxId,
    /// Offset of the child's border box from the inline-start edge.
    pub(crate) inline_offset: f32,
    /// Offset of the child's border box from the block-start edge.
    pub(crate) block_offset: f32,
}

/// The result of laying out a container's children.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlowLayout {
    /// In-flow children to place.
    pub(crate) placements: Vec<FlowPlacement>,
    /// Out-of-flow children and the point they would have started at in
    /// normal flow. Their extents are zero.
    pub(crate) static_positions: Vec<FlowPlacement>,
    /// The block size the children occupy.
    pub(crate) content_block_size: f32,
}

/// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
///
/// "When two or more margins collapse, the resulting margin width is the
/// maximum of the collapsing margins' widths. In the case of negative
/// margins, the maximum of the absolute values of the negative adjoining
/// margins is deducted from the maximum of the positive adjoining margins.
/// If there are no positive margins, the maximum of the absolute values
/// of the adjoining margins is deducted from zero."
pub(crate) fn collapse_two_margins(a: f32, b: f32) -> f32 {
    if a >= 0.0 && b >= 0.0 {
        a.max(b)
    } else if a < 0.0 && b < 0.0 {
        a.min(b)
    } else {
        a + b
    }
}

/// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
///
/// "Floats, absolutely positioned elements, block containers (such as
/// inline-blocks, table-cells, and table-captions) that are not block
/// boxes, and block boxes with 'overflow' other than 'visible' (except
/// when that value has been propagated to the viewport) establish new
/// block formatting contexts for their contents."
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead
/// id.
pub fn establishes_block_formatting_context(tree: &BoxTree, id: BoxId) -> Result<bool> {
    let node = tree.node(id)?;
    let style = &node.style;
    if node.kind.is_view()
        || node.kind.is_inline()
        || node.kind.is_flex_container()
        || style.is_floating()
        || style.position.is_out_of_flow()
        || style.has_non_visible_overflow()
    {
        return Ok(true);
    }
    let Some(parent) = node.parent else {
        return Ok(false);
    };
    let parent_node = tree.node(parent)?;
    // [§ 4 Flex Items](https://www.w3.org/TR/css-flexbox-1/#flex-items)
    //
    // "A flex item establishes an independent formatting context for its
    // contents." So does a box in an orthogonal flow.
    Ok(parent_node.kind.is_flex_container()
        || style.flow().is_perpendicular_to(parent_node.style.flow()))
}

/// [§ 10.6.1 Inline, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-non-replaced)
///
/// The block size of atomic text wrapped to `available` inline space: one
/// line height per line, with the line count from the max-content width.
/// Text never breaks narrower than its longest unbreakable run.
#[must_use]
pub fn text_content_height(metrics: &TextMetrics, available: f32) -> f32 {
    let line_width = available.max(metrics.min_content_width);
    if metrics.max_content_width <= 0.0 || line_width <= 0.0 {
        return metrics.line_height;
    }
    let lines = (metrics.max_content_width / line_width).ceil().max(1.0);
    lines * metrics.line_height
}

/// Lay out the children of a block container and stack them.
///
/// # Errors
/// Propagates errors from laying out the children.
pub(crate) fn layout_block_children(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<FlowLayout> {
    let node = tree.node(id)?;
    let flow = node.style.flow();
    let content_inline_size = flow.inline_size(node.geometry.content_size());
    let children = node.children.clone();
    let contains_floats = establishes_block_formatting_context(tree, id)?;

    // STEP 1: Initialize the current block position.
    //
    // "...boxes are laid out one after the other, vertically, beginning at
    // the top of a containing block."
    let mut layout = FlowLayout::default();
    let mut current_block = 0.0_f32;

    // STEP 2: Track the previous sibling's block-end margin so it can
    // collapse with the next sibling's block-start margin.
    let mut previous_margin_end: Option<f32> = None;

    // Floats line up along each inline edge without moving the flow.
    let mut float_start_cursor = 0.0_f32;
    let mut float_end_cursor = 0.0_f32;
    let mut float_block_end = 0.0_f32;

    for child in children {
        let child_node = tree.node(child)?;

        // [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
        //
        // "In the absolute positioning model, a box is removed from the
        // normal flow entirely."
        //
        // Only the static position is recorded here. The containing block
        // lays the box out once its own size is known.
        if child_node.style.position.is_out_of_flow() {
            layout.static_positions.push(FlowPlacement {
                child,
                inline_offset: 0.0,
                block_offset: current_block + previous_margin_end.unwrap_or(0.0),
            });
            continue;
        }

        // SVG text sits in its parent's user space, outside the flow.
        if child_node.kind.is_svg_text() {
            layout_box(tree, ctx, child)?;
            continue;
        }

        let float = child_node.style.float;
        layout_box(tree, ctx, child)?;

        let geometry = tree.node(child)?.geometry;
        let margin_inline_start = flow.get(&geometry.margin, LogicalSide::InlineStart);
        let margin_inline_end = flow.get(&geometry.margin, LogicalSide::InlineEnd);
        let margin_block_start = flow.get(&geometry.margin, LogicalSide::BlockStart);
        let margin_block_end = flow.get(&geometry.margin, LogicalSide::BlockEnd);
        let inline_extent = flow.inline_size(geometry.size());
        let block_extent = flow.block_size(geometry.size());

        // [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
        //
        // "Since a float is not in the flow, non-positioned block boxes
        // created before and after the float box flow vertically as if the
        // float did not exist."
        if float != FloatSide::None {
            let on_line_left = float == FloatSide::Left;
            let at_inline_start = on_line_left == (flow.direction == Direction::Ltr);
            let margin_box = margin_inline_start + inline_extent + margin_inline_end;
            let inline_offset = if at_inline_start {
                let offset = float_start_cursor + margin_inline_start;
                float_start_cursor += margin_box;
                offset
            } else {
                float_end_cursor += margin_box;
                content_inline_size - float_end_cursor + margin_inline_start
            };
            let block_offset =
                current_block + previous_margin_end.unwrap_or(0.0) + margin_block_start;
            float_block_end = float_block_end.max(block_offset + block_extent + margin_block_end);
            layout.placements.push(FlowPlacement {
                child,
                inline_offset,
                block_offset,
            });
            continue;
        }

        // STEP 3: Collapse adjoining margins and stack.
        let collapsed = previous_margin_end.map_or(margin_block_start, |previous| {
            collapse_two_margins(previous, margin_block_start)
        });
        let block_offset = current_block + collapsed;
        layout.placements.push(FlowPlacement {
            child,
            inline_offset: margin_inline_start,
            block_offset,
        });
        current_block = block_offset + block_extent;
        previous_margin_end = Some(margin_block_end);
    }

    // STEP 4: The last block-end margin stays inside this box.
    current_block += previous_margin_end.unwrap_or(0.0);

    // [§ 10.6.7 'Auto' heights for block formatting context roots](https://www.w3.org/TR/CSS2/visudet.html#root-height)
    //
    // "In addition, if the element has any floating descendants whose
    // bottom margin edge is below the element's bottom content edge, then
    // the height is increased to include those edges."
    layout.content_block_size = if contains_floats {
        current_block.max(float_block_end)
    } else {
        current_block
    };
    Ok(layout)
}
