//! Flex layout.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! This module implements a single-line subset of CSS Flexbox:
//! - `flex-direction` in all four directions
//! - `flex-grow` / `flex-shrink` distribution with min/max clamping (§ 9.7)
//! - `flex-basis` (definite length, content keyword, or auto)
//! - `justify-content` (6 keywords)
//! - `align-items` / `align-self`, with stretch re-layout
//!
//! Not yet implemented: multi-line containers, `order`, `align-content`,
//! baseline alignment, automatic minimum sizes.
//!
//! The container tells an item its resolved sizes through the override
//! table and lays it out again. Overrides are cleared once the container is
//! done.

use wallaby_common::warning::warn_once;

use crate::block::{FlowLayout, FlowPlacement};
use crate::context::LayoutContext;
use crate::engine::layout_box;
use crate::error::Result;
use crate::sizing::{
    SizeType, border_and_padding, compute_logical_height_using, compute_logical_width,
    compute_logical_width_using, containing_block_info,
};
use crate::style::{
    AlignItems, FlexWrap, JustifyContent, Length, LogicalFlow, LogicalSide,
    minimum_value_for_length,
};
use crate::tree::{BoxId, BoxTree};

/// Per-item data collected during flex layout.
///
/// [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
///
/// Main sizes are border-box sizes.
#[derive(Debug, Clone)]
struct FlexItem {
    child: BoxId,
    /// The container's main axis runs along the item's inline axis.
    main_is_inline: bool,
    /// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// The flex base size.
    base_size: f32,
    /// [§ 9.2 step 3E](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// "The hypothetical main size is the item's flex base size clamped
    /// according to its used min and max main sizes."
    hypothetical_size: f32,
    min_size: f32,
    max_size: f32,
    /// Border and padding along the main axis.
    border_padding: f32,
    grow: f32,
    shrink: f32,
    /// The resolved target main size after § 9.7.
    target_size: f32,
    /// Whether this item is frozen during the § 9.7 loop.
    frozen: bool,
    /// Main-axis margins, start then end.
    margin_main: (f32, f32),
    /// Cross-axis margins, start then end, with `auto` as `None`.
    margin_cross: (Option<f32>, Option<f32>),
    alignment: AlignItems,
    /// The cross-size property is `auto`.
    cross_size_is_auto: bool,
}

impl FlexItem {
    const fn outer_main(&self) -> f32 {
        self.margin_main.0 + self.margin_main.1
    }

    fn clamp(&self, size: f32) -> f32 {
        size.min(self.max_size).max(self.min_size)
    }
}

/// Main entry point for flex layout.
///
/// [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
///
/// Called once the container's inline size is resolved. Returns the item
/// placements in the container's logical coordinates and the content block
/// size.
pub(crate) fn layout_flex_children(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<FlowLayout> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let flow = style.flow();
    let content_size = node.geometry.content_size();
    let children = node.children.clone();
    let row = style.flex_direction.is_row();
    let reverse = style.flex_direction.is_reverse();

    if style.flex_wrap != FlexWrap::Nowrap {
        warn_once("Flex", "flex-wrap is laid out as a single line");
    }

    // STEP 1 (§ 9.2): The container's inner main and cross sizes. The
    // inline size is known; the block size only when definite.
    let inline_size = flow.inline_size(content_size);
    let definite_block_size = definite_content_block_size(tree, ctx, id)?;
    let available_main = if row {
        Some(inline_size)
    } else {
        definite_block_size
    };

    // STEP 2 (§ 9.2 step 3): Collect items and determine flex base sizes.
    //
    // [§ 4.1 Absolutely-Positioned Flex Children](https://www.w3.org/TR/css-flexbox-1/#abspos-items)
    //
    // "An absolutely-positioned child of a flex container does not
    // participate in flex layout."
    let mut layout = FlowLayout::default();
    let mut items = Vec::with_capacity(children.len());
    for child in children {
        let child_node = tree.node(child)?;
        if child_node.style.position.is_out_of_flow() {
            layout.static_positions.push(FlowPlacement {
                child,
                inline_offset: 0.0,
                block_offset: 0.0,
            });
            continue;
        }
        if child_node.kind.is_svg_text() {
            layout_box(tree, ctx, child)?;
            continue;
        }
        items.push(collect_item(
            tree,
            ctx,
            child,
            flow,
            row,
            inline_size,
            available_main,
        )?);
    }

    // STEP 3 (§ 9.7): Resolve flexible lengths.
    let available_main = available_main.unwrap_or_else(|| {
        items
            .iter()
            .map(|item| item.hypothetical_size + item.outer_main())
            .sum()
    });
    resolve_flexible_lengths(&mut items, available_main);

    // STEP 4 (§ 9.4): Lay each item out at its target main size to find
    // its hypothetical cross size.
    for item in &items {
        set_main_override(ctx, item, item.target_size);
        layout_box(tree, ctx, item.child)?;
    }

    // STEP 5 (§ 9.4 step 8): "If the flex container is single-line and has
    // a definite cross size, the outer cross size of the flex line is the
    // flex container's inner cross size." Otherwise the largest outer
    // hypothetical cross size.
    let definite_cross = if row {
        definite_block_size
    } else {
        Some(inline_size)
    };
    let mut line_cross = 0.0_f32;
    for item in &items {
        let cross = cross_extent(tree, item)?;
        let outer = cross + item.margin_cross.0.unwrap_or(0.0) + item.margin_cross.1.unwrap_or(0.0);
        line_cross = line_cross.max(outer);
    }
    let line_cross = definite_cross.unwrap_or(line_cross);

    // STEP 6 (§ 9.4 step 11): "If a flex item has align-self: stretch, its
    // computed cross size property is auto, and neither of its cross-axis
    // margins are auto, the used outer cross size is the used cross size
    // of its flex line, clamped according to the item's used min and max
    // cross sizes."
    for item in &items {
        let stretches = item.alignment == AlignItems::Stretch
            && item.cross_size_is_auto
            && item.margin_cross.0.is_some()
            && item.margin_cross.1.is_some();
        if !stretches {
            continue;
        }
        let margins = item.margin_cross.0.unwrap_or(0.0) + item.margin_cross.1.unwrap_or(0.0);
        let cross = (line_cross - margins).max(0.0);
        let cross = clamp_cross(tree, ctx, item, cross, line_cross)?;
        set_cross_override(ctx, item, cross);
        layout_box(tree, ctx, item.child)?;
    }

    // STEP 7 (§ 9.5): Main-axis alignment.
    let total_outer: f32 = items
        .iter()
        .map(|item| item.target_size + item.outer_main())
        .sum();
    let free_space = available_main - total_outer;
    let (initial_offset, gap) =
        compute_justify_offsets(style.justify_content, free_space, items.len());

    let mut current_main = initial_offset;
    for (index, item) in items.iter().enumerate() {
        let main_start = current_main + item.margin_main.0;
        let main_position = if reverse {
            available_main - main_start - item.target_size
        } else {
            main_start
        };

        // STEP 8 (§ 9.6): Cross-axis alignment.
        let cross = cross_extent(tree, item)?;
        let cross_position = cross_offset(item, cross, line_cross);

        let (inline_offset, block_offset) = if row {
            (main_position, cross_position)
        } else {
            (cross_position, main_position)
        };
        layout.placements.push(FlowPlacement {
            child: item.child,
            inline_offset,
            block_offset,
        });

        current_main = main_start + item.target_size + item.margin_main.1;
        if index + 1 < items.len() {
            current_main += gap;
        }
    }

    // STEP 9 (§ 9.9): "If the cross size property is a definite size, use
    // that; otherwise, use the largest of the flex lines' cross sizes."
    layout.content_block_size = if row {
        line_cross
    } else {
        available_main
    };

    for item in &items {
        ctx.overrides.clear(item.child);
    }

    #[cfg(feature = "layout-trace")]
    tracing::trace!(
        box_id = %id,
        items = items.len(),
        available_main,
        line_cross,
        "flex layout"
    );

    Ok(layout)
}

/// The container's content-box block size, when it does not depend on its
/// items.
fn definite_content_block_size(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<Option<f32>> {
    let node = tree.node(id)?;
    let flow = node.style.flow();
    let border_padding = flow.block_sum(&node.geometry.border_and_padding());
    if let Some(height) = ctx.overrides.border_box_logical_height(id) {
        return Ok(Some((height - border_padding).max(0.0)));
    }
    let length = node.style.logical_height();
    if !length.is_specified() {
        return Ok(None);
    }
    Ok(
        compute_logical_height_using(tree, ctx, id, SizeType::MainOrPreferredSize, length, 0.0)?
            .map(|height| (height - border_padding).max(0.0)),
    )
}

/// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
///
/// Determine the flex base size and hypothetical main size of one item:
///   A. "If the item has a definite used flex basis, that's the flex base
///      size."
///   B. `flex-basis: auto` defers to the main size property.
///   C. "Otherwise, size the item into the available space using its used
///      flex basis in place of its main size, treating a value of content
///      as max-content."
fn collect_item(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    child: BoxId,
    container_flow: LogicalFlow,
    row: bool,
    container_inline_size: f32,
    available_main: Option<f32>,
) -> Result<FlexItem> {
    let info = containing_block_info(tree, ctx, child)?;
    let style = tree.node(child)?.style.clone();
    let child_flow = style.flow();
    let main_is_horizontal = container_flow.is_horizontal() == row;
    let main_is_inline = child_flow.is_horizontal() == main_is_horizontal;
    let edges = border_and_padding(&style, info.inline_size);
    let margin = |side: LogicalSide| {
        let length = container_flow.get(&style.margin, side);
        (!length.is_auto())
            .then(|| minimum_value_for_length(length, || container_inline_size))
    };
    let (main_start, main_end, cross_start, cross_end) = if row {
        (
            LogicalSide::InlineStart,
            LogicalSide::InlineEnd,
            LogicalSide::BlockStart,
            LogicalSide::BlockEnd,
        )
    } else {
        (
            LogicalSide::BlockStart,
            LogicalSide::BlockEnd,
            LogicalSide::InlineStart,
            LogicalSide::InlineEnd,
        )
    };

    let basis = if style.flex_basis.is_auto() {
        if main_is_inline {
            style.logical_width()
        } else {
            style.logical_height()
        }
    } else {
        style.flex_basis
    };
    let main_basis = available_main.unwrap_or(0.0);

    let (base_size, hypothetical_size, min_size, max_size, border_padding) = if main_is_inline {
        // The item's inline size is the main size: measure through the
        // width algorithm with the basis standing in for `width`.
        let basis = if basis.is_auto() {
            Length::MaxContent
        } else {
            basis
        };
        ctx.overrides.set_flex_basis_logical_width(child, basis);
        let base = compute_logical_width_using(
            tree,
            ctx,
            child,
            SizeType::MainOrPreferredSize,
            basis,
            main_basis,
        )?;
        let hypothetical = compute_logical_width(tree, ctx, child)?.extent;
        let min = compute_logical_width_using(
            tree,
            ctx,
            child,
            SizeType::MinSize,
            style.logical_min_width(),
            main_basis,
        )?;
        let max = if style.logical_max_width().is_none() {
            f32::INFINITY
        } else {
            compute_logical_width_using(
                tree,
                ctx,
                child,
                SizeType::MaxSize,
                style.logical_max_width(),
                main_basis,
            )?
        };
        (base, hypothetical, min, max, child_flow.inline_sum(&edges))
    } else {
        // The item's block size is the main size: lay it out with the
        // basis standing in for `height` and read the result.
        ctx.overrides.set_flex_basis_logical_height(child, basis);
        layout_box(tree, ctx, child)?;
        let extent = child_flow.block_size(tree.node(child)?.geometry.size());
        let min = compute_logical_height_using(
            tree,
            ctx,
            child,
            SizeType::MinSize,
            style.logical_min_height(),
            0.0,
        )?
        .unwrap_or(0.0);
        let max = compute_logical_height_using(
            tree,
            ctx,
            child,
            SizeType::MaxSize,
            style.logical_max_height(),
            0.0,
        )?
        .unwrap_or(f32::INFINITY);
        (extent, extent, min, max, child_flow.block_sum(&edges))
    };
    ctx.overrides.clear(child);

    let cross_size_is_auto = if main_is_inline {
        style.logical_height().is_auto()
    } else {
        style.logical_width().is_auto()
    };

    Ok(FlexItem {
        child,
        main_is_inline,
        base_size,
        hypothetical_size: hypothetical_size.min(max_size).max(min_size),
        min_size,
        max_size: max_size.max(min_size),
        border_padding,
        grow: style.flex_grow.max(0.0),
        shrink: style.flex_shrink.max(0.0),
        target_size: 0.0,
        frozen: false,
        margin_main: (
            margin(main_start).unwrap_or(0.0),
            margin(main_end).unwrap_or(0.0),
        ),
        margin_cross: (margin(cross_start), margin(cross_end)),
        alignment: style.align_self.resolve(
            tree.parent(child)
                .and_then(|parent| tree.style(parent))
                .map_or(AlignItems::Stretch, |parent| parent.align_items),
        ),
        cross_size_is_auto,
    })
}

fn set_main_override(ctx: &mut LayoutContext<'_>, item: &FlexItem, size: f32) {
    if item.main_is_inline {
        ctx.overrides.set_border_box_logical_width(item.child, size);
    } else {
        ctx.overrides.set_border_box_logical_height(item.child, size);
    }
}

fn set_cross_override(ctx: &mut LayoutContext<'_>, item: &FlexItem, size: f32) {
    if item.main_is_inline {
        ctx.overrides.set_border_box_logical_height(item.child, size);
    } else {
        ctx.overrides.set_border_box_logical_width(item.child, size);
    }
}

/// The item's border-box extent along the container's cross axis.
fn cross_extent(tree: &BoxTree, item: &FlexItem) -> Result<f32> {
    let node = tree.node(item.child)?;
    let flow = node.style.flow();
    let size = node.geometry.size();
    Ok(if item.main_is_inline {
        flow.block_size(size)
    } else {
        flow.inline_size(size)
    })
}

/// Clamp a stretched cross size by the item's min and max cross sizes.
fn clamp_cross(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    item: &FlexItem,
    size: f32,
    line_cross: f32,
) -> Result<f32> {
    let style = tree.node(item.child)?.style.clone();
    let (min, max) = if item.main_is_inline {
        (
            compute_logical_height_using(
                tree,
                ctx,
                item.child,
                SizeType::MinSize,
                style.logical_min_height(),
                0.0,
            )?,
            compute_logical_height_using(
                tree,
                ctx,
                item.child,
                SizeType::MaxSize,
                style.logical_max_height(),
                0.0,
            )?,
        )
    } else {
        let min = compute_logical_width_using(
            tree,
            ctx,
            item.child,
            SizeType::MinSize,
            style.logical_min_width(),
            line_cross,
        )?;
        let max = if style.logical_max_width().is_none() {
            None
        } else {
            Some(compute_logical_width_using(
                tree,
                ctx,
                item.child,
                SizeType::MaxSize,
                style.logical_max_width(),
                line_cross,
            )?)
        };
        (Some(min), max)
    };
    Ok(size
        .min(max.unwrap_or(f32::INFINITY))
        .max(min.unwrap_or(0.0)))
}

/// [§ 8.3 Cross-axis Alignment](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
///
/// Offset of the item's border box from the cross-start edge of the line.
/// Auto cross margins absorb the free space first.
fn cross_offset(item: &FlexItem, cross: f32, line_cross: f32) -> f32 {
    let free = line_cross - cross
        - item.margin_cross.0.unwrap_or(0.0)
        - item.margin_cross.1.unwrap_or(0.0);
    match item.margin_cross {
        (None, None) => return free.max(0.0) / 2.0,
        (None, Some(_)) => return free.max(0.0),
        (Some(start), None) => return start,
        (Some(_), Some(_)) => {}
    }
    let start = item.margin_cross.0.unwrap_or(0.0);
    match item.alignment {
        AlignItems::Stretch | AlignItems::FlexStart => start,
        AlignItems::FlexEnd => start + free,
        AlignItems::Center => start + free / 2.0,
    }
}

/// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
///
/// Full iterative freeze-loop algorithm.
fn resolve_flexible_lengths(items: &mut [FlexItem], available_main: f32) {
    if items.is_empty() {
        return;
    }

    // STEP 1: "Determine the used flex factor."
    //
    // "If the sum of the outer hypothetical main sizes of all items on the
    // line is less than the flex container's inner main size, use the flex
    // grow factor for the rest of this algorithm; otherwise, use the flex
    // shrink factor."
    let sum_outer_hypothetical: f32 = items
        .iter()
        .map(|item| item.hypothetical_size + item.outer_main())
        .sum();
    let growing = sum_outer_hypothetical < available_main;

    // STEP 2: "Size inflexible items."
    //
    // "Freeze, setting its target main size to its hypothetical main size…
    //   - any item that has a flex factor of zero
    //   - if using the flex grow factor: any item that has a flex base size
    //     greater than its hypothetical main size
    //   - if using the flex shrink factor: any item that has a flex base size
    //     less than its hypothetical main size"
    for item in items.iter_mut() {
        let factor = if growing { item.grow } else { item.shrink };
        item.target_size = item.hypothetical_size;
        item.frozen = factor == 0.0
            || (growing && item.base_size > item.hypothetical_size)
            || (!growing && item.base_size < item.hypothetical_size);
    }

    // STEP 3: "Calculate initial free space."
    let used_space = |items: &[FlexItem]| -> f32 {
        items
            .iter()
            .map(|item| {
                let size = if item.frozen {
                    item.target_size
                } else {
                    item.base_size
                };
                size + item.outer_main()
            })
            .sum()
    };
    let initial_free_space = available_main - used_space(items);

    // STEP 4: Loop until all items are frozen.
    loop {
        // 4a. Check for all frozen.
        if items.iter().all(|item| item.frozen) {
            break;
        }

        // 4b. Calculate remaining free space.
        let remaining_free = available_main - used_space(items);

        // 4c. "If the sum of the unfrozen flex factors is less than one,
        //      multiply the initial free space by this sum."
        let unfrozen_factor_sum: f32 = items
            .iter()
            .filter(|item| !item.frozen)
            .map(|item| if growing { item.grow } else { item.shrink })
            .sum();
        let free_space = if unfrozen_factor_sum < 1.0 && unfrozen_factor_sum > 0.0 {
            let scaled = initial_free_space * unfrozen_factor_sum;
            // "…if the magnitude of this value is less than the magnitude
            // of the remaining free space, use this as the used free space."
            if scaled.abs() < remaining_free.abs() {
                scaled
            } else {
                remaining_free
            }
        } else {
            remaining_free
        };

        // 4d. Distribute free space.
        if growing {
            // "If using the flex grow factor: Find the ratio of the item's
            // flex grow factor to the sum of the flex grow factors of all
            // unfrozen items on the line. Set the item's target main size
            // to its flex base size plus a fraction of the remaining free
            // space proportional to the ratio."
            let grow_sum: f32 = items
                .iter()
                .filter(|item| !item.frozen)
                .map(|item| item.grow)
                .sum();
            if grow_sum > 0.0 {
                for item in items.iter_mut().filter(|item| !item.frozen) {
                    let ratio = item.grow / grow_sum;
                    item.target_size = free_space.mul_add(ratio, item.base_size);
                }
            }
        } else {
            // "If using the flex shrink factor: For every unfrozen item on
            // the line, multiply its flex shrink factor by its inner flex
            // base size, and note this as its scaled flex shrink factor.
            // Find the ratio of the item's scaled flex shrink factor to the
            // sum of the scaled flex shrink factors of all unfrozen items on
            // the line. Set the item's target main size to its flex base size
            // minus a fraction of the absolute value of the remaining free
            // space proportional to the ratio."
            let scaled_shrink = |item: &FlexItem| {
                item.shrink * (item.base_size - item.border_padding).max(0.0)
            };
            let scaled_shrink_sum: f32 = items
                .iter()
                .filter(|item| !item.frozen)
                .map(scaled_shrink)
                .sum();
            if scaled_shrink_sum > 0.0 {
                for item in items.iter_mut().filter(|item| !item.frozen) {
                    let ratio = scaled_shrink(item) / scaled_shrink_sum;
                    item.target_size = free_space.abs().mul_add(-ratio, item.base_size);
                }
            }
        }

        // 4e. "Fix min/max violations. Clamp each non-frozen item's target
        //      main size by its used min and max main sizes and floor its
        //      content-box size at zero."
        let mut total_violation = 0.0_f32;
        for item in items.iter_mut().filter(|item| !item.frozen) {
            let clamped = item.clamp(item.target_size).max(item.border_padding);
            total_violation += clamped - item.target_size;
            item.target_size = clamped;
        }

        // 4f. "Freeze over-flexed items."
        //
        // "If the total violation is:
        //   - Zero: freeze all items.
        //   - Positive: freeze all items with min violations.
        //   - Negative: freeze all items with max violations."
        let before = items.iter().filter(|item| item.frozen).count();
        if total_violation.abs() < 0.01 {
            for item in items.iter_mut() {
                item.frozen = true;
            }
        } else if total_violation > 0.0 {
            for item in items.iter_mut().filter(|item| !item.frozen) {
                if item.target_size <= item.min_size.max(item.border_padding) + 0.01 {
                    item.frozen = true;
                }
            }
        } else {
            for item in items.iter_mut().filter(|item| !item.frozen) {
                if item.target_size >= item.max_size - 0.01 {
                    item.frozen = true;
                }
            }
        }
        // Nothing froze: the remaining items are already at their limits.
        if items.iter().filter(|item| item.frozen).count() == before {
            for item in items.iter_mut() {
                item.frozen = true;
            }
        }
    }
}

/// Compute justify-content alignment offsets.
///
/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// Returns `(initial_offset, gap_between_items)`.
fn compute_justify_offsets(
    justify: JustifyContent,
    free_space: f32,
    item_count: usize,
) -> (f32, f32) {
    if item_count == 0 {
        return (0.0, 0.0);
    }
    #[allow(clippy::cast_precision_loss)]
    let count = item_count as f32;

    match justify {
        // "Flex items are packed toward the start of the line."
        JustifyContent::FlexStart => (0.0, 0.0),

        // "Flex items are packed toward the end of the line."
        JustifyContent::FlexEnd => (free_space, 0.0),

        // "Flex items are packed toward the center of the line."
        JustifyContent::Center => (free_space / 2.0, 0.0),

        // "Flex items are evenly distributed in the line. If the leftover
        // free-space is negative or there is only a single flex item on the
        // line, this value is identical to flex-start."
        JustifyContent::SpaceBetween => {
            if item_count <= 1 || free_space <= 0.0 {
                (0.0, 0.0)
            } else {
                (0.0, free_space / (count - 1.0))
            }
        }

        // "Flex items are evenly distributed in the line, with half-size
        // spaces on either end. If the leftover free-space is negative or
        // there is only a single flex item on the line, this value is
        // identical to center."
        JustifyContent::SpaceAround => {
            if free_space <= 0.0 {
                (free_space / 2.0, 0.0)
            } else {
                let gap = free_space / count;
                (gap / 2.0, gap)
            }
        }

        // "with a full-size space on either end"
        JustifyContent::SpaceEvenly => {
            if free_space <= 0.0 {
                (free_space / 2.0, 0.0)
            } else {
                let gap = free_space / (count + 1.0);
                (gap, gap)
            }
        }
    }
}
