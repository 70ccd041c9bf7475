//! Inline-size and block-size resolution.
//!
//! [CSS 2.1 § 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//!
//! [CSS Box Sizing Module Level 3](https://www.w3.org/TR/css-sizing-3/)
//!
//! Everything here works in the box's logical axes: "width" is the inline
//! size and "height" the block size, whatever the writing mode. Every
//! extent is a border-box extent unless the function name says otherwise.

use wallaby_geometry::{Rect, RectEdges};

use crate::box_model::LogicalExtentComputedValues;
use crate::context::LayoutContext;
use crate::error::{LayoutError, Result};
use crate::positioned;
use crate::preferred::preferred_logical_widths;
use crate::style::{
    AlignItems, AspectRatio, BoxSizing, BoxStyle, Length, LogicalFlow, LogicalSide,
    intrinsic_value_for_length, minimum_value_for_length, value_for_length,
};
use crate::tree::{BoxId, BoxKind, BoxTree, IntrinsicSize};

/// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// "Otherwise, if 'width' has a computed value of 'auto', but none of the
/// conditions above are met, then the used value of 'width' becomes 300px."
pub const DEFAULT_REPLACED_WIDTH: f32 = 300.0;

/// [§ 10.6.2 Inline replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-height)
///
/// "Otherwise, if 'height' has a computed value of 'auto', and the element
/// has an intrinsic ratio ... Otherwise ... the used value of 'height' must
/// be set to the height of the largest rectangle that has a 2:1 ratio, has
/// a height not greater than 150px".
pub const DEFAULT_REPLACED_HEIGHT: f32 = 150.0;

/// Which sizing property is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeType {
    /// `width` / `height`
    MainOrPreferredSize,
    /// `min-width` / `min-height`
    MinSize,
    /// `max-width` / `max-height`
    MaxSize,
}

/// The containing block of a box as seen by the sizing code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainingBlockInfo {
    /// The containing block; `None` for the view and for detached boxes.
    pub id: Option<BoxId>,
    /// The containing block's writing mode and direction.
    pub flow: LogicalFlow,
    /// The content box (in-flow boxes) or padding box (out-of-flow boxes),
    /// in the containing block's coordinate space.
    pub rect: Rect,
    /// The containing block's own inline size, the basis for percentage
    /// margins and padding.
    pub inline_size: f32,
    /// The containing block is a flex container.
    pub is_flex_container: bool,
}

/// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
///
/// "The containing block in which the root element lives is a rectangle
/// called the initial containing block. For continuous media, it has the
/// dimensions of the viewport".
///
/// A detached box has no containing block. That is recorded as a
/// diagnostic and the viewport stands in.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn containing_block_info(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<ContainingBlockInfo> {
    let node = tree.node(id)?;
    let viewport = Rect::from_size(ctx.viewport());

    let Some(cb) = tree.containing_block(id) else {
        if !node.kind.is_view() {
            ctx.record(LayoutError::MissingContainingBlock(id));
        }
        let flow = if node.kind.is_view() {
            node.style.flow()
        } else {
            LogicalFlow::HORIZONTAL_LTR
        };
        return Ok(ContainingBlockInfo {
            id: None,
            flow,
            rect: viewport,
            inline_size: flow.inline_size(viewport.size()),
            is_flex_container: false,
        });
    };

    let cb_node = tree.node(cb)?;
    let flow = cb_node.style.flow();
    let rect = if cb_node.kind.is_view() {
        viewport
    } else if node.style.position.is_out_of_flow() {
        cb_node.geometry.padding_box_rect()
    } else {
        cb_node.geometry.content_box_rect()
    };
    Ok(ContainingBlockInfo {
        id: Some(cb),
        flow,
        rect,
        inline_size: flow.inline_size(rect.size()),
        is_flex_container: cb_node.kind.is_flex_container(),
    })
}

/// Resolved border widths. Negative widths clamp to zero.
pub(crate) fn resolved_border(style: &BoxStyle) -> RectEdges<f32> {
    style.border_width.map(|width| width.max(0.0))
}

/// [§ 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
///
/// "The percentage is calculated with respect to the width of the
/// generated box's containing block". "Values for padding values cannot be
/// negative."
pub(crate) fn resolved_padding(style: &BoxStyle, basis: f32) -> RectEdges<f32> {
    style
        .padding
        .map(|padding| minimum_value_for_length(padding, || basis).max(0.0))
}

/// Border plus padding on each side.
pub(crate) fn border_and_padding(style: &BoxStyle, basis: f32) -> RectEdges<f32> {
    resolved_border(style).plus(&resolved_padding(style, basis))
}

/// [§ 4 Box sizing](https://www.w3.org/TR/css-sizing-3/#box-sizing)
///
/// Turn a `width` value into a border-box inline size.
#[must_use]
pub fn adjust_border_box_logical_width_for_box_sizing(
    box_sizing: BoxSizing,
    width: f32,
    border_and_padding: f32,
) -> f32 {
    match box_sizing {
        BoxSizing::ContentBox => width.max(0.0) + border_and_padding,
        BoxSizing::BorderBox => width.max(border_and_padding),
    }
}

/// Turn a `width` value into a content-box inline size.
#[must_use]
pub fn adjust_content_box_logical_width_for_box_sizing(
    box_sizing: BoxSizing,
    width: f32,
    border_and_padding: f32,
) -> f32 {
    match box_sizing {
        BoxSizing::ContentBox => width.max(0.0),
        BoxSizing::BorderBox => (width - border_and_padding).max(0.0),
    }
}

/// Turn a `height` value into a border-box block size.
#[must_use]
pub fn adjust_border_box_logical_height_for_box_sizing(
    box_sizing: BoxSizing,
    height: f32,
    border_and_padding: f32,
) -> f32 {
    match box_sizing {
        BoxSizing::ContentBox => height.max(0.0) + border_and_padding,
        BoxSizing::BorderBox => height.max(border_and_padding),
    }
}

/// Turn a `height` value into a content-box block size.
#[must_use]
pub fn adjust_content_box_logical_height_for_box_sizing(
    box_sizing: BoxSizing,
    height: f32,
    border_and_padding: f32,
) -> f32 {
    match box_sizing {
        BoxSizing::ContentBox => height.max(0.0),
        BoxSizing::BorderBox => (height - border_and_padding).max(0.0),
    }
}

/// [§ 5.1 Aspect ratio](https://www.w3.org/TR/css-sizing-4/#aspect-ratio)
///
/// The border-box inline size matching `block_size` under `ratio`.
///
/// "If box-sizing is border-box, the ratio applies to the border box";
/// replaced elements always apply it to the content box.
#[must_use]
pub fn inline_size_from_aspect_ratio(
    border_padding_inline: f32,
    border_padding_block: f32,
    ratio: f32,
    box_sizing: BoxSizing,
    block_size: f32,
    is_replaced: bool,
) -> f32 {
    if box_sizing == BoxSizing::BorderBox && !is_replaced {
        return (block_size * ratio).max(border_padding_inline);
    }
    (block_size - border_padding_block) * ratio + border_padding_inline
}

/// The border-box block size matching `inline_size` under `ratio`.
#[must_use]
pub fn block_size_from_aspect_ratio(
    border_padding_inline: f32,
    border_padding_block: f32,
    ratio: f32,
    box_sizing: BoxSizing,
    inline_size: f32,
    is_replaced: bool,
) -> f32 {
    if box_sizing == BoxSizing::BorderBox && !is_replaced {
        return (inline_size / ratio).max(border_padding_block);
    }
    (inline_size - border_padding_inline) / ratio + border_padding_block
}

/// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
///
/// The inline space left for the border box once the margins are taken.
#[must_use]
pub fn fill_available_measure(available: f32, margin_start: f32, margin_end: f32) -> f32 {
    (available - margin_start - margin_end).max(0.0)
}

/// The inline size of the containing block that this box's `width`
/// resolves against.
///
/// When the containing block's writing mode is perpendicular to the box's,
/// the box's inline axis runs along the containing block's block axis and
/// that block size is used instead.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn containing_block_logical_width_for_content(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<f32> {
    let info = containing_block_info(tree, ctx, id)?;
    container_logical_width(tree, ctx, id, &info)
}

fn container_logical_width(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    info: &ContainingBlockInfo,
) -> Result<f32> {
    let node = tree.node(id)?;
    let flow = node.style.flow();
    if flow.is_perpendicular_to(info.flow) && !node.style.position.is_out_of_flow() {
        return perpendicular_containing_block_logical_height(tree, ctx, info);
    }
    Ok(flow.inline_size(info.rect.size()).max(0.0))
}

/// The block size of a containing block whose block axis is a child's
/// inline axis.
///
/// An override or a fixed height is used as is. Anything else falls back
/// to the space available for percentages, capped by the viewport's extent
/// in that axis.
fn perpendicular_containing_block_logical_height(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    info: &ContainingBlockInfo,
) -> Result<f32> {
    let fallback = info.flow.block_size(ctx.viewport());
    let Some(cb) = info.id else {
        return Ok(fallback);
    };
    let cb_node = tree.node(cb)?;
    if cb_node.kind.is_view() {
        return Ok(fallback);
    }
    let border_padding = info.flow.block_sum(&cb_node.geometry.border_and_padding());
    if let Some(height) = ctx.overrides.border_box_logical_height(cb) {
        return Ok((height - border_padding).max(0.0));
    }
    if let Some(height) = cb_node.style.logical_height().fixed_value() {
        return Ok(adjust_content_box_logical_height_for_box_sizing(
            cb_node.style.box_sizing,
            height,
            border_padding,
        ));
    }
    let fill = available_logical_height_for_percentage_computation(tree, ctx, cb)?;
    Ok(fill.unwrap_or(fallback).min(fallback))
}

/// Whether an `auto` inline size shrinks to fit the content instead of
/// filling the containing block.
///
/// [§ 10.3.5 Floating, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#float-width)
/// and [§ 10.3.9 'Inline-block', non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#inlineblock-width):
/// "If 'width' is 'auto', the used value is the shrink-to-fit width".
/// Flex items that are not stretched across a column, and boxes in an
/// orthogonal flow, shrink to fit as well.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn sizes_preferred_width_to_fit_content(tree: &BoxTree, id: BoxId) -> Result<bool> {
    let node = tree.node(id)?;
    let style = &node.style;
    if style.is_floating() || node.kind.is_inline() || style.position.is_out_of_flow() {
        return Ok(true);
    }
    let Some(parent) = node.parent else {
        return Ok(false);
    };
    let parent_node = tree.node(parent)?;
    if parent_node.kind.is_flex_container() {
        let parent_style = &parent_node.style;
        if parent_style.flex_direction.is_row() {
            return Ok(true);
        }
        let alignment = style.align_self.resolve(parent_style.align_items);
        return Ok(alignment != AlignItems::Stretch);
    }
    Ok(style.flow().is_perpendicular_to(parent_node.style.flow()))
}

/// [§ 10.2 Content width](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
///
/// Resolve one of `width`, `min-width` or `max-width` to a border-box
/// inline size against `available`.
///
/// - A numeric length resolves against `available` and is adjusted for
///   `box-sizing`.
/// - A content-based keyword resolves through the memoized preferred
///   widths.
/// - `auto` fills the available space, or shrinks to fit for boxes that do
///   ([`sizes_preferred_width_to_fit_content`]). An `auto` minimum is zero.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_logical_width_using(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    size_type: SizeType,
    length: Length,
    available: f32,
) -> Result<f32> {
    let info = containing_block_info(tree, ctx, id)?;
    let style = &tree.node(id)?.style;
    let flow = style.flow();
    let box_sizing = style.box_sizing;
    let border_padding = flow.inline_sum(&border_and_padding(style, info.inline_size));
    let margin_basis = info.inline_size;
    let margin_start =
        minimum_value_for_length(style.margin_for(LogicalSide::InlineStart), || margin_basis);
    let margin_end =
        minimum_value_for_length(style.margin_for(LogicalSide::InlineEnd), || margin_basis);

    if length.is_specified() {
        return Ok(adjust_border_box_logical_width_for_box_sizing(
            box_sizing,
            value_for_length(length, || available),
            border_padding,
        ));
    }

    let fill = fill_available_measure(available, margin_start, margin_end);
    if matches!(length, Length::FillAvailable) {
        return Ok(fill.max(border_padding));
    }
    // Preferred widths walk the subtree, so only the content keywords ask.
    if length.is_intrinsic() {
        let sizes = preferred_logical_widths(tree, ctx, id)?;
        return Ok(intrinsic_value_for_length(length, fill, || sizes)
            .unwrap_or(fill)
            .max(border_padding));
    }

    if size_type == SizeType::MinSize {
        return Ok(adjust_border_box_logical_width_for_box_sizing(
            box_sizing,
            0.0,
            border_padding,
        ));
    }

    // [§ 10.3.5](https://www.w3.org/TR/CSS2/visudet.html#float-width)
    //
    // "Then the shrink-to-fit width is: min(max(preferred minimum width,
    //  available width), preferred width)."
    if sizes_preferred_width_to_fit_content(tree, id)? {
        let sizes = preferred_logical_widths(tree, ctx, id)?;
        return Ok(sizes.min.max(fill).min(sizes.max));
    }
    Ok(fill)
}

/// Clamp a border-box inline size into `[min-width, max-width]`.
///
/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
///
/// "If the tentative used width is greater than 'max-width', the rules
/// above are applied again ... If the resulting width is smaller than
/// 'min-width', the rules above are applied again". `min-width` wins.
///
/// With an `auto` width and an aspect ratio, the block-axis limits are
/// transferred through the ratio and stand in for unset inline limits.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn constrain_logical_width_by_min_max(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    width: f32,
    available: f32,
) -> Result<f32> {
    let node = tree.node(id)?;
    let style = &node.style;
    let min_length = style.logical_min_width();
    let max_length = style.logical_max_width();
    let transfers = !style.logical_width().is_specified()
        && style.logical_aspect_ratio().is_some()
        && !node.kind.is_replaced();

    let transferred = if transfers {
        Some(compute_min_max_logical_width_from_aspect_ratio(tree, ctx, id)?)
    } else {
        None
    };

    let mut result = width;
    let max_width = if max_length.is_none() {
        transferred.map(|(_, max)| max)
    } else {
        Some(compute_logical_width_using(
            tree,
            ctx,
            id,
            SizeType::MaxSize,
            max_length,
            available,
        )?)
    };
    if let Some(max_width) = max_width {
        result = result.min(max_width);
    }

    let mut min_width =
        compute_logical_width_using(tree, ctx, id, SizeType::MinSize, min_length, available)?;
    if let Some((transferred_min, _)) = transferred.filter(|_| min_length.is_auto()) {
        min_width = min_width.max(transferred_min.min(max_width.unwrap_or(f32::INFINITY)));
    }
    Ok(result.max(min_width))
}

/// [§ 5.1 Aspect ratio](https://www.w3.org/TR/css-sizing-4/#aspect-ratio-size-transfers)
///
/// "the min and max constraints in the ratio-dependent axis are
/// transferred through the aspect ratio".
///
/// Returns the transferred `(min, max)` border-box inline sizes. The
/// minimum wins over the maximum.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_min_max_logical_width_from_aspect_ratio(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<(f32, f32)> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let is_replaced = node.kind.is_replaced();
    let Some(ratio) = style.logical_aspect_ratio() else {
        return Ok((0.0, f32::INFINITY));
    };
    let info = containing_block_info(tree, ctx, id)?;
    let flow = style.flow();
    let edges = border_and_padding(&style, info.inline_size);
    let (inline_bp, block_bp) = (flow.inline_sum(&edges), flow.block_sum(&edges));
    let box_sizing = style.box_sizing_for_aspect_ratio();

    let min_height = compute_logical_height_using(
        tree,
        ctx,
        id,
        SizeType::MinSize,
        style.logical_min_height(),
        0.0,
    )?
    .filter(|_| style.logical_min_height().is_specified());
    let max_height = if style.logical_max_height().is_none() {
        None
    } else {
        compute_logical_height_using(
            tree,
            ctx,
            id,
            SizeType::MaxSize,
            style.logical_max_height(),
            0.0,
        )?
    };

    let transfer = |block: f32| {
        inline_size_from_aspect_ratio(inline_bp, block_bp, ratio, box_sizing, block, is_replaced)
    };
    let transferred_min = min_height.map_or(0.0, transfer);
    let transferred_max = max_height.map_or(f32::INFINITY, transfer);
    Ok((transferred_min, transferred_max.max(transferred_min)))
}

/// The block-axis counterpart of
/// [`compute_min_max_logical_width_from_aspect_ratio`]: `(min, max)`
/// border-box block sizes transferred from the inline-axis limits.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_min_max_logical_height_from_aspect_ratio(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<(f32, f32)> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let is_replaced = node.kind.is_replaced();
    let Some(ratio) = style.logical_aspect_ratio() else {
        return Ok((0.0, f32::INFINITY));
    };
    let info = containing_block_info(tree, ctx, id)?;
    let available = container_logical_width(tree, ctx, id, &info)?;
    let flow = style.flow();
    let edges = border_and_padding(&style, info.inline_size);
    let (inline_bp, block_bp) = (flow.inline_sum(&edges), flow.block_sum(&edges));
    let box_sizing = style.box_sizing_for_aspect_ratio();

    let min_width = if style.logical_min_width().is_specified() {
        Some(compute_logical_width_using(
            tree,
            ctx,
            id,
            SizeType::MinSize,
            style.logical_min_width(),
            available,
        )?)
    } else {
        None
    };
    let max_width = if style.logical_max_width().is_specified() {
        Some(compute_logical_width_using(
            tree,
            ctx,
            id,
            SizeType::MaxSize,
            style.logical_max_width(),
            available,
        )?)
    } else {
        None
    };

    let transfer = |inline: f32| {
        block_size_from_aspect_ratio(inline_bp, block_bp, ratio, box_sizing, inline, is_replaced)
    };
    let transferred_min = min_width.map_or(0.0, transfer);
    let transferred_max = max_width.map_or(f32::INFINITY, transfer);
    Ok((transferred_min, transferred_max.max(transferred_min)))
}

/// Record a degenerate `aspect-ratio` once; the box then sizes as if the
/// ratio were `auto`.
fn check_aspect_ratio(ctx: &mut LayoutContext<'_>, id: BoxId, aspect_ratio: AspectRatio) {
    if aspect_ratio.is_degenerate() {
        ctx.record(LayoutError::UnresolvableAspectRatio(id));
    }
}

/// The definite border-box block size of a box, if its height does not
/// depend on its content.
fn definite_logical_height(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<Option<f32>> {
    if let Some(height) = ctx.overrides.border_box_logical_height(id) {
        return Ok(Some(height));
    }
    let length = tree.node(id)?.style.logical_height();
    if !length.is_specified() {
        return Ok(None);
    }
    compute_logical_height_using(tree, ctx, id, SizeType::MainOrPreferredSize, length, 0.0)
}

/// Whether an `auto` inline size comes from the block size through the
/// aspect ratio: the box has a usable ratio and a definite block size.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn should_compute_logical_width_from_aspect_ratio(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<bool> {
    let node = tree.node(id)?;
    if node.kind.is_replaced() || node.style.logical_aspect_ratio().is_none() {
        return Ok(false);
    }
    Ok(definite_logical_height(tree, ctx, id)?.is_some())
}

/// Whether an `auto` block size comes from the inline size through the
/// aspect ratio.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn should_compute_logical_height_from_aspect_ratio(
    tree: &BoxTree,
    ctx: &LayoutContext<'_>,
    id: BoxId,
) -> Result<bool> {
    let node = tree.node(id)?;
    Ok(!node.kind.is_replaced()
        && node.style.logical_aspect_ratio().is_some()
        && ctx.overrides.border_box_logical_height(id).is_none())
}

/// The border-box inline size derived from the definite block size.
pub(crate) fn compute_logical_width_from_aspect_ratio(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    border_padding: RectEdges<f32>,
) -> Result<f32> {
    let style = tree.node(id)?.style.clone();
    let Some(ratio) = style.logical_aspect_ratio() else {
        return Ok(0.0);
    };
    let Some(block) = definite_logical_height(tree, ctx, id)? else {
        return Ok(0.0);
    };
    let block = constrain_logical_height_by_min_max(tree, ctx, id, block, 0.0)?;
    let flow = style.flow();
    Ok(inline_size_from_aspect_ratio(
        flow.inline_sum(&border_padding),
        flow.block_sum(&border_padding),
        ratio,
        style.box_sizing_for_aspect_ratio(),
        block,
        false,
    ))
}

/// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
///
/// "'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
/// 'padding-right' + 'border-right-width' + 'margin-right' = width of
/// containing block"
///
/// Margins are given and returned in the containing block's inline
/// direction.
///
/// CASE 1: both margins `auto`: the margin box is centered, never pushed
/// past the start edge.
/// CASE 2: only the end margin is `auto`: it takes the remaining space.
/// CASE 3: only the start margin is `auto`: it takes the remaining space.
/// CASE 4: the box is at least as wide as the container, or nothing is
/// `auto`: each margin resolves on its own, `auto` as zero.
#[must_use]
pub fn compute_inline_direction_margins(
    margin_start: Length,
    margin_end: Length,
    container_width: f32,
    child_width: f32,
) -> (f32, f32) {
    let fits = child_width < container_width;

    // CASE 1
    if margin_start.is_auto() && margin_end.is_auto() && fits {
        let start = ((container_width - child_width) / 2.0).max(0.0);
        return (start, container_width - child_width - start);
    }

    // CASE 2
    if margin_end.is_auto() && fits {
        let start = value_for_length(margin_start, || container_width);
        return (start, container_width - child_width - start);
    }

    // CASE 3
    if margin_start.is_auto() && fits {
        let end = value_for_length(margin_end, || container_width);
        return (container_width - child_width - end, end);
    }

    // CASE 4
    (
        minimum_value_for_length(margin_start, || container_width),
        minimum_value_for_length(margin_end, || container_width),
    )
}

/// [§ 10.3 Calculating widths and margins](https://www.w3.org/TR/CSS2/visudet.html#Computing_widths_and_margins)
///
/// Resolve the border-box inline size and the inline margins of `id`.
/// Margins come back in the box's own inline direction.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_logical_width(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<LogicalExtentComputedValues> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let flow = style.flow();
    let is_replaced = node.kind.is_replaced();
    let is_inline = node.kind.is_inline();

    // STEP 0: The view is the initial containing block.
    if node.kind.is_view() {
        return Ok(LogicalExtentComputedValues {
            extent: flow.inline_size(ctx.viewport()),
            ..LogicalExtentComputedValues::default()
        });
    }

    // STEP 1: Out-of-flow boxes solve against their containing block's
    // padding box.
    if style.position.is_out_of_flow() {
        return positioned::compute_positioned_logical_width(tree, ctx, id);
    }

    let info = containing_block_info(tree, ctx, id)?;
    let container_width = container_logical_width(tree, ctx, id, &info)?;
    let perpendicular = flow.is_perpendicular_to(info.flow);
    let edges = border_and_padding(&style, info.inline_size);
    let border_padding = flow.inline_sum(&edges);
    let is_flex_item = info.is_flex_container;
    check_aspect_ratio(ctx, id, style.aspect_ratio);

    let extent = if let Some(width) = ctx.overrides.border_box_logical_width(id) {
        // STEP 2: The flex container already decided.
        width
    } else if is_replaced {
        // STEP 3: Replaced content sizes from its natural dimensions.
        compute_replaced_logical_width(tree, ctx, id)? + border_padding
    } else {
        // STEP 4: A flex-basis override stands in for `width`.
        let width_length = ctx
            .overrides
            .flex_basis_logical_width(id)
            .unwrap_or_else(|| style.logical_width());
        let preferred = if width_length.is_auto()
            && should_compute_logical_width_from_aspect_ratio(tree, ctx, id)?
        {
            compute_logical_width_from_aspect_ratio(tree, ctx, id, edges)?
        } else {
            compute_logical_width_using(
                tree,
                ctx,
                id,
                SizeType::MainOrPreferredSize,
                width_length,
                container_width,
            )?
        };
        constrain_logical_width_by_min_max(tree, ctx, id, preferred, container_width)?
    };

    // STEP 5: Margins.
    let opposing = info.flow.is_inline_opposing(flow);
    let exempt = is_flex_item || style.is_floating() || is_inline || perpendicular;
    let (margin_start, margin_end) = if exempt {
        // RULE A: Flex items, floats and inline-level boxes never take up
        // free space with `auto` margins here.
        (
            minimum_value_for_length(style.margin_for(LogicalSide::InlineStart), || {
                container_width
            }),
            minimum_value_for_length(style.margin_for(LogicalSide::InlineEnd), || {
                container_width
            }),
        )
    } else {
        // RULE B: Margins resolve in the containing block's direction.
        let (cb_start, cb_end) = compute_inline_direction_margins(
            info.flow.get(&style.margin, LogicalSide::InlineStart),
            info.flow.get(&style.margin, LogicalSide::InlineEnd),
            container_width,
            extent,
        );
        if opposing {
            (cb_end, cb_start)
        } else {
            (cb_start, cb_end)
        }
    };

    let mut computed = LogicalExtentComputedValues {
        extent,
        position: 0.0,
        margin_start,
        margin_end,
    };

    // RULE C: Overconstrained. The margin on the containing block's end
    // side absorbs the difference.
    let total = extent + margin_start + margin_end;
    if !perpendicular
        && container_width > 0.0
        && (container_width - total).abs() > f32::EPSILON
        && !style.is_floating()
        && !is_inline
        && !is_flex_item
    {
        let margin_on_cb_start = if opposing { margin_end } else { margin_start };
        let new_margin = container_width - extent - margin_on_cb_start;
        if opposing {
            computed.margin_start = new_margin;
        } else {
            computed.margin_end = new_margin;
        }
    }

    #[cfg(feature = "layout-trace")]
    tracing::trace!(
        box_id = %id,
        depth = ctx.depth,
        extent = computed.extent,
        margin_start = computed.margin_start,
        margin_end = computed.margin_end,
        "computed logical width"
    );

    Ok(computed)
}

/// [§ 10.5 Content height](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
///
/// "The percentage is calculated with respect to the height of the
/// generated box's containing block. If the height of the containing block
/// is not specified explicitly (i.e., it depends on content height), and
/// this element is not absolutely positioned, the value computes to
/// 'auto'."
///
/// The content-box block size of the containing block that a percentage
/// `height` of `id` resolves against, or `None` when that size depends on
/// content.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_percentage_logical_height(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<Option<f32>> {
    let node = tree.node(id)?;
    let flow = node.style.flow();
    if node.kind.is_view() {
        return Ok(Some(flow.block_size(ctx.viewport())));
    }

    let info = containing_block_info(tree, ctx, id)?;
    let extent_along_block_axis = flow.block_size(info.rect.size()).max(0.0);

    // Out-of-flow boxes run after their containing block is sized, and an
    // orthogonal child's block axis is the containing block's inline axis.
    let Some(cb) = info.id else {
        return Ok(Some(extent_along_block_axis));
    };
    if node.style.position.is_out_of_flow() || flow.is_perpendicular_to(info.flow) {
        return Ok(Some(extent_along_block_axis));
    }
    available_logical_height_for_percentage_computation(tree, ctx, cb)
}

/// The content-box block size of `cb`, if it is definite.
///
/// Definite means: the view, a flex-stretched (overridden) box, a fixed
/// height, a percentage height that itself resolves, or an out-of-flow box
/// whose block-axis insets are both set.
fn available_logical_height_for_percentage_computation(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    cb: BoxId,
) -> Result<Option<f32>> {
    let node = tree.node(cb)?;
    let style = &node.style;
    let flow = style.flow();
    if node.kind.is_view() {
        return Ok(Some(flow.block_size(ctx.viewport())));
    }
    let border_padding = flow.block_sum(&node.geometry.border_and_padding());
    if let Some(height) = ctx.overrides.border_box_logical_height(cb) {
        return Ok(Some((height - border_padding).max(0.0)));
    }

    let height = style.logical_height();
    let border_box = match height {
        Length::Fixed(value) => Some(adjust_border_box_logical_height_for_box_sizing(
            style.box_sizing,
            value,
            border_padding,
        )),
        Length::Percent(_) | Length::Calc { .. } => {
            compute_percentage_logical_height(tree, ctx, cb)?.map(|basis| {
                adjust_border_box_logical_height_for_box_sizing(
                    style.box_sizing,
                    value_for_length(height, || basis),
                    border_padding,
                )
            })
        }
        _ if style.position.is_out_of_flow()
            && !style.inset_for(LogicalSide::BlockStart).is_auto()
            && !style.inset_for(LogicalSide::BlockEnd).is_auto() =>
        {
            let info = containing_block_info(tree, ctx, cb)?;
            let range = flow.block_size(info.rect.size());
            let resolve = |length: Length| minimum_value_for_length(length, || range);
            let margins = minimum_value_for_length(style.margin_for(LogicalSide::BlockStart), || {
                info.inline_size
            }) + minimum_value_for_length(style.margin_for(LogicalSide::BlockEnd), || {
                info.inline_size
            });
            Some(
                range
                    - resolve(style.inset_for(LogicalSide::BlockStart))
                    - resolve(style.inset_for(LogicalSide::BlockEnd))
                    - margins,
            )
        }
        _ => None,
    };

    Ok(border_box.map(|border_box| {
        let clamped = clamp_by_fixed_min_max_height(style, border_box, border_padding);
        (clamped - border_padding).max(0.0)
    }))
}

fn clamp_by_fixed_min_max_height(style: &BoxStyle, height: f32, border_padding: f32) -> f32 {
    let mut result = height;
    if let Some(max) = style.logical_max_height().fixed_value() {
        result = result.min(adjust_border_box_logical_height_for_box_sizing(
            style.box_sizing,
            max,
            border_padding,
        ));
    }
    if let Some(min) = style.logical_min_height().fixed_value() {
        result = result.max(adjust_border_box_logical_height_for_box_sizing(
            style.box_sizing,
            min,
            border_padding,
        ));
    }
    result.max(border_padding)
}

/// [§ 10.5 Content height](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
///
/// Resolve one of `height`, `min-height` or `max-height` to a border-box
/// block size. `intrinsic_content` is the content-box block size the
/// children produced, used by the content-based keywords.
///
/// `None` means the length behaves as `auto`: an unresolvable percentage,
/// `auto` itself, or `none`.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_logical_height_using(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    size_type: SizeType,
    length: Length,
    intrinsic_content: f32,
) -> Result<Option<f32>> {
    let style = &tree.node(id)?.style;
    let info = containing_block_info(tree, ctx, id)?;
    let border_padding = style
        .flow()
        .block_sum(&border_and_padding(style, info.inline_size));
    let box_sizing = style.box_sizing;

    Ok(match length {
        Length::Fixed(value) => Some(adjust_border_box_logical_height_for_box_sizing(
            box_sizing,
            value,
            border_padding,
        )),
        Length::Percent(_) | Length::Calc { .. } => compute_percentage_logical_height(tree, ctx, id)?
            .map(|basis| {
                adjust_border_box_logical_height_for_box_sizing(
                    box_sizing,
                    value_for_length(length, || basis),
                    border_padding,
                )
            }),
        Length::MinContent | Length::MaxContent | Length::FitContent => {
            Some(intrinsic_content.max(0.0) + border_padding)
        }
        Length::FillAvailable => {
            let margins = minimum_value_for_length(style.margin_for(LogicalSide::BlockStart), || {
                info.inline_size
            }) + minimum_value_for_length(style.margin_for(LogicalSide::BlockEnd), || {
                info.inline_size
            });
            compute_percentage_logical_height(tree, ctx, id)?
                .map(|basis| (basis - margins).max(border_padding))
        }
        Length::Auto if size_type == SizeType::MinSize => Some(border_padding),
        Length::Auto | Length::Normal | Length::None => None,
    })
}

/// Clamp a border-box block size into `[min-height, max-height]`, with
/// limits transferred through the aspect ratio standing in for unset ones.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn constrain_logical_height_by_min_max(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    height: f32,
    intrinsic_content: f32,
) -> Result<f32> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let transfers = !style.logical_height().is_specified()
        && style.logical_aspect_ratio().is_some()
        && !node.kind.is_replaced();
    let transferred = if transfers {
        Some(compute_min_max_logical_height_from_aspect_ratio(tree, ctx, id)?)
    } else {
        None
    };

    let mut result = height;
    let max_height = if style.logical_max_height().is_none() {
        transferred.map(|(_, max)| max)
    } else {
        compute_logical_height_using(
            tree,
            ctx,
            id,
            SizeType::MaxSize,
            style.logical_max_height(),
            intrinsic_content,
        )?
    };
    if let Some(max_height) = max_height {
        result = result.min(max_height);
    }

    let mut min_height = compute_logical_height_using(
        tree,
        ctx,
        id,
        SizeType::MinSize,
        style.logical_min_height(),
        intrinsic_content,
    )?
    .unwrap_or(0.0);
    if let Some((transferred_min, _)) =
        transferred.filter(|_| style.logical_min_height().is_auto())
    {
        min_height = min_height.max(transferred_min.min(max_height.unwrap_or(f32::INFINITY)));
    }
    Ok(result.max(min_height))
}

/// [§ 10.6 Calculating heights and margins](https://www.w3.org/TR/CSS2/visudet.html#Computing_heights_and_margins)
///
/// Resolve the border-box block size and the block margins of `id` once
/// its children have been laid out. `content_height` is the content-box
/// block size the children produced.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_logical_height(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    content_height: f32,
) -> Result<LogicalExtentComputedValues> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let flow = style.flow();
    let is_replaced = node.kind.is_replaced();
    let current_inline_size = flow.inline_size(node.geometry.size());

    if node.kind.is_view() {
        return Ok(LogicalExtentComputedValues {
            extent: flow.block_size(ctx.viewport()),
            ..LogicalExtentComputedValues::default()
        });
    }
    if style.position.is_out_of_flow() {
        return positioned::compute_positioned_logical_height(tree, ctx, id, content_height);
    }

    let info = containing_block_info(tree, ctx, id)?;
    let edges = border_and_padding(&style, info.inline_size);
    let border_padding = flow.block_sum(&edges);

    let extent = if let Some(height) = ctx.overrides.border_box_logical_height(id) {
        height
    } else if is_replaced {
        compute_replaced_logical_height(tree, ctx, id)? + border_padding
    } else {
        let length = ctx
            .overrides
            .flex_basis_logical_height(id)
            .unwrap_or_else(|| style.logical_height());
        let height = match style.logical_aspect_ratio() {
            Some(ratio)
                if length.is_auto()
                    && should_compute_logical_height_from_aspect_ratio(tree, ctx, id)? =>
            {
                block_size_from_aspect_ratio(
                    flow.inline_sum(&edges),
                    border_padding,
                    ratio,
                    style.box_sizing_for_aspect_ratio(),
                    current_inline_size,
                    false,
                )
            }
            _ => compute_logical_height_using(
                tree,
                ctx,
                id,
                SizeType::MainOrPreferredSize,
                length,
                content_height,
            )?
            .unwrap_or(content_height + border_padding),
        };
        constrain_logical_height_by_min_max(tree, ctx, id, height, content_height)?
    };

    // [§ 10.6.3](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    //
    // "If 'margin-top', or 'margin-bottom' are 'auto', their used value
    //  is 0."
    Ok(LogicalExtentComputedValues {
        extent,
        position: 0.0,
        margin_start: minimum_value_for_length(style.margin_for(LogicalSide::BlockStart), || {
            info.inline_size
        }),
        margin_end: minimum_value_for_length(style.margin_for(LogicalSide::BlockEnd), || {
            info.inline_size
        }),
    })
}

/// The natural size of replaced content along the box's inline and block
/// axes.
fn logical_intrinsic_size(intrinsic: IntrinsicSize, flow: LogicalFlow) -> (Option<f32>, Option<f32>) {
    if flow.is_horizontal() {
        (intrinsic.width, intrinsic.height)
    } else {
        (intrinsic.height, intrinsic.width)
    }
}

/// The aspect ratio (inline over block) a replaced box sizes with.
///
/// An explicit ratio beats the natural one; `auto <ratio>` only applies
/// when the content has no natural ratio.
fn replaced_logical_aspect_ratio(style: &BoxStyle, intrinsic: IntrinsicSize) -> Option<f32> {
    let natural = intrinsic.ratio().map(|ratio| {
        if style.is_horizontal_writing_mode() {
            ratio
        } else {
            1.0 / ratio
        }
    });
    match style.aspect_ratio {
        AspectRatio::Ratio(..) => style.logical_aspect_ratio(),
        AspectRatio::AutoAndRatio(..) => natural.or_else(|| style.logical_aspect_ratio()),
        AspectRatio::Auto => natural,
    }
}

fn replaced_intrinsic(tree: &BoxTree, id: BoxId) -> Result<IntrinsicSize> {
    Ok(match tree.node(id)?.kind {
        BoxKind::Replaced(intrinsic) => intrinsic,
        _ => IntrinsicSize::default(),
    })
}

/// The definite content-box block size of a replaced box, if any.
fn replaced_definite_logical_height(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    border_padding: f32,
) -> Result<Option<f32>> {
    if let Some(height) = ctx.overrides.border_box_logical_height(id) {
        return Ok(Some((height - border_padding).max(0.0)));
    }
    let length = ctx
        .overrides
        .flex_basis_logical_height(id)
        .unwrap_or_else(|| tree.node(id).map_or(Length::Auto, |node| node.style.logical_height()));
    if !length.is_specified() {
        return Ok(None);
    }
    Ok(
        compute_logical_height_using(tree, ctx, id, SizeType::MainOrPreferredSize, length, 0.0)?
            .map(|height| (height - border_padding).max(0.0)),
    )
}

/// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// The content-box inline size of replaced content, min/max applied.
///
/// "If 'height' and 'width' both have computed values of 'auto' and the
/// element also has an intrinsic width, then that intrinsic width is the
/// used value of 'width'."
///
/// "If 'height' and 'width' both have computed values of 'auto' and the
/// element has no intrinsic width, but does have an intrinsic height and
/// intrinsic ratio; or if 'width' has a computed value of 'auto', 'height'
/// has some other computed value, and the element does have an intrinsic
/// ratio; then the used value of 'width' is: (used height) * (intrinsic
/// ratio)"
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_replaced_logical_width(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<f32> {
    let style = tree.node(id)?.style.clone();
    let intrinsic = replaced_intrinsic(tree, id)?;
    let flow = style.flow();
    let info = containing_block_info(tree, ctx, id)?;
    let container_width = container_logical_width(tree, ctx, id, &info)?;
    let edges = border_and_padding(&style, info.inline_size);
    let (inline_bp, block_bp) = (flow.inline_sum(&edges), flow.block_sum(&edges));
    let (intrinsic_inline, intrinsic_block) = logical_intrinsic_size(intrinsic, flow);
    let ratio = replaced_logical_aspect_ratio(&style, intrinsic);

    let width_length = ctx
        .overrides
        .flex_basis_logical_width(id)
        .unwrap_or_else(|| style.logical_width());

    let content = if width_length.is_specified() {
        adjust_content_box_logical_width_for_box_sizing(
            style.box_sizing,
            value_for_length(width_length, || container_width),
            inline_bp,
        )
    } else if let Some(width) = replaced_definite_logical_height(tree, ctx, id, block_bp)?
        .zip(ratio)
        .map(|(height, ratio)| height * ratio)
    {
        width
    } else if let Some(width) = intrinsic_inline {
        width
    } else if let Some((height, ratio)) = intrinsic_block.zip(ratio) {
        height * ratio
    } else if ratio.is_some() {
        // "If 'width' has a computed value of 'auto', and 'height' has a
        //  computed value of 'auto' and the element has an intrinsic ratio
        //  but no intrinsic height or width, then the used value of 'width'
        //  is undefined in CSS 2. However, it is suggested that, if the
        //  containing block's width does not itself depend on the replaced
        //  element's width, then the used value of 'width' is calculated
        //  from the constraint equation used for block-level, non-replaced
        //  elements in normal flow."
        let margins = minimum_value_for_length(style.margin_for(LogicalSide::InlineStart), || {
            container_width
        }) + minimum_value_for_length(style.margin_for(LogicalSide::InlineEnd), || {
            container_width
        });
        (container_width - margins - inline_bp).max(0.0)
    } else {
        DEFAULT_REPLACED_WIDTH
    };

    let mut border_box = content + inline_bp;
    let max_length = style.logical_max_width();
    if !max_length.is_none() {
        border_box = border_box.min(compute_logical_width_using(
            tree,
            ctx,
            id,
            SizeType::MaxSize,
            max_length,
            container_width,
        )?);
    }
    border_box = border_box.max(compute_logical_width_using(
        tree,
        ctx,
        id,
        SizeType::MinSize,
        style.logical_min_width(),
        container_width,
    )?);
    Ok((border_box - inline_bp).max(0.0))
}

/// [§ 10.6.2 Inline replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-height)
///
/// The content-box block size of replaced content, min/max applied.
///
/// "Otherwise, if 'height' has a computed value of 'auto', and the element
/// has an intrinsic ratio then the used value of 'height' is: (used width)
/// / (intrinsic ratio)". "Otherwise, if 'height' has a computed value of
/// 'auto', and the element has an intrinsic height, then that intrinsic
/// height is the used value of 'height'."
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn compute_replaced_logical_height(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<f32> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let current_inline_size = style.flow().inline_size(node.geometry.size());
    let intrinsic = replaced_intrinsic(tree, id)?;
    let flow = style.flow();
    let info = containing_block_info(tree, ctx, id)?;
    let edges = border_and_padding(&style, info.inline_size);
    let (inline_bp, block_bp) = (flow.inline_sum(&edges), flow.block_sum(&edges));
    let (_, intrinsic_block) = logical_intrinsic_size(intrinsic, flow);
    let ratio = replaced_logical_aspect_ratio(&style, intrinsic);

    let content = if let Some(height) = replaced_definite_logical_height(tree, ctx, id, block_bp)? {
        height
    } else if let Some(ratio) = ratio {
        (current_inline_size - inline_bp).max(0.0) / ratio
    } else if let Some(height) = intrinsic_block {
        height
    } else {
        DEFAULT_REPLACED_HEIGHT
    };

    let mut border_box = content + block_bp;
    if let Some(max) = compute_logical_height_using(
        tree,
        ctx,
        id,
        SizeType::MaxSize,
        style.logical_max_height(),
        content,
    )? {
        border_box = border_box.min(max);
    }
    if let Some(min) = compute_logical_height_using(
        tree,
        ctx,
        id,
        SizeType::MinSize,
        style.logical_min_height(),
        content,
    )? {
        border_box = border_box.max(min);
    }
    Ok((border_box - block_bp).max(0.0))
}

/// The natural content-box inline size of replaced content, used for its
/// preferred widths.
pub(crate) fn replaced_natural_logical_width(style: &BoxStyle, intrinsic: IntrinsicSize) -> f32 {
    let flow = style.flow();
    let (inline, block) = logical_intrinsic_size(intrinsic, flow);
    let ratio = replaced_logical_aspect_ratio(style, intrinsic);
    if let Some(width) = inline {
        return width;
    }
    let block = style
        .logical_height()
        .fixed_value()
        .map(|height| {
            let edges = border_and_padding(style, 0.0);
            adjust_content_box_logical_height_for_box_sizing(
                style.box_sizing,
                height,
                flow.block_sum(&edges),
            )
        })
        .or(block);
    block
        .zip(ratio)
        .map_or(DEFAULT_REPLACED_WIDTH, |(block, ratio)| block * ratio)
}
