//! Min-content and max-content inline sizes.
//!
//! [CSS Box Sizing Level 3 § 5 Intrinsic Size Determination](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
//!
//! "The min-content size of a box in each axis is the size it would have if
//! it was a float given an auto size in that axis (and no minimum or
//! maximum size in that axis) and if its containing block was zero-sized in
//! that axis."
//!
//! These are measurements only: nothing here positions a box. Results are
//! memoized on the box until [`BoxTree::mark_needs_layout`] drops them.

use crate::context::LayoutContext;
use crate::error::Result;
use crate::sizing::{
    adjust_content_box_logical_width_for_box_sizing, border_and_padding,
    replaced_natural_logical_width,
};
use crate::style::{BoxStyle, IntrinsicSizes, LogicalSide, minimum_value_for_length};
use crate::tree::{BoxId, BoxKind, BoxTree};

/// The min and max preferred border-box inline sizes of `id`.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead
/// id.
pub fn preferred_logical_widths(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<IntrinsicSizes> {
    if let Some(sizes) = tree.node(id)?.preferred_widths {
        return Ok(sizes);
    }
    let sizes = compute_preferred_logical_widths(tree, ctx, id)?;
    tree.node_mut(id)?.preferred_widths = Some(sizes);

    #[cfg(feature = "layout-trace")]
    tracing::trace!(box_id = %id, min = sizes.min, max = sizes.max, "preferred widths");

    Ok(sizes)
}

/// The min-content border-box inline size.
///
/// # Errors
/// As [`preferred_logical_widths`].
pub fn min_preferred_logical_width(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<f32> {
    Ok(preferred_logical_widths(tree, ctx, id)?.min)
}

/// The max-content border-box inline size.
///
/// # Errors
/// As [`preferred_logical_widths`].
pub fn max_preferred_logical_width(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<f32> {
    Ok(preferred_logical_widths(tree, ctx, id)?.max)
}

fn compute_preferred_logical_widths(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<IntrinsicSizes> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let kind = node.kind.clone();
    let flow = style.flow();
    // Percentages have no basis while measuring.
    let border_padding = flow.inline_sum(&border_and_padding(&style, 0.0));

    // Case 1: A fixed width is both preferred widths.
    if let Some(width) = style.logical_width().fixed_value().filter(|&width| width >= 0.0) {
        let content =
            adjust_content_box_logical_width_for_box_sizing(style.box_sizing, width, border_padding);
        return Ok(IntrinsicSizes::new(content, content).expanded_by(border_padding));
    }

    let content = match &kind {
        // Case 2: Text was measured upstream.
        BoxKind::Text(metrics) => {
            IntrinsicSizes::new(metrics.min_content_width, metrics.max_content_width)
        }
        // Case 3: Replaced content uses its natural size.
        BoxKind::Replaced(intrinsic) => {
            let width = replaced_natural_logical_width(&style, *intrinsic);
            IntrinsicSizes::new(width, width)
        }
        // Case 4: SVG text lives in its own coordinate space.
        BoxKind::SvgText(_) => IntrinsicSizes::default(),
        // Case 5: Containers measure their in-flow children.
        BoxKind::View
        | BoxKind::Block
        | BoxKind::InlineBlock
        | BoxKind::FlexContainer
        | BoxKind::FragmentedFlow => {
            let sums = kind.is_flex_container() && style.flex_direction.is_row();
            children_preferred_widths(tree, ctx, id, &style, sums)?
        }
    };

    Ok(clamp_by_fixed_min_max(&style, content, border_padding).expanded_by(border_padding))
}

fn children_preferred_widths(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    style: &BoxStyle,
    sums: bool,
) -> Result<IntrinsicSizes> {
    let flow = style.flow();
    let children = tree.children(id).to_vec();
    let mut min = 0.0_f32;
    let mut max = 0.0_f32;
    for child in children {
        let child_node = tree.node(child)?;
        if child_node.style.position.is_out_of_flow() || child_node.kind.is_svg_text() {
            continue;
        }
        let child_style = child_node.style.clone();
        let child_flow = child_style.flow();

        let sizes = if child_flow.is_perpendicular_to(flow) {
            // An orthogonal child contributes its block size along our
            // inline axis, which is only known up front when fixed.
            let block = child_style.logical_height().fixed_value().unwrap_or(0.0);
            IntrinsicSizes::new(block, block)
        } else {
            preferred_logical_widths(tree, ctx, child)?
        };
        let margin = |side| minimum_value_for_length(child_style.margin_for(side), || 0.0);
        let sizes =
            sizes.expanded_by(margin(LogicalSide::InlineStart) + margin(LogicalSide::InlineEnd));

        if sums {
            min += sizes.min;
            max += sizes.max;
        } else {
            min = min.max(sizes.min);
            max = max.max(sizes.max);
        }
    }
    Ok(IntrinsicSizes::new(min, max))
}

/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
///
/// Only fixed limits apply while measuring.
fn clamp_by_fixed_min_max(
    style: &BoxStyle,
    content: IntrinsicSizes,
    border_padding: f32,
) -> IntrinsicSizes {
    let mut sizes = content;
    if let Some(max) = style.logical_max_width().fixed_value() {
        let max =
            adjust_content_box_logical_width_for_box_sizing(style.box_sizing, max, border_padding);
        sizes.min = sizes.min.min(max);
        sizes.max = sizes.max.min(max);
    }
    if let Some(min) = style.logical_min_width().fixed_value() {
        let min =
            adjust_content_box_logical_width_for_box_sizing(style.box_sizing, min, border_padding);
        sizes.min = sizes.min.max(min);
        sizes.max = sizes.max.max(min);
    }
    sizes
}
