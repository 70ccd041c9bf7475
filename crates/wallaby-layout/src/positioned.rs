//! Positioned layout.
//!
//! [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
//!
//! "In the absolute positioning model, a box is removed from the normal
//! flow entirely and assigned a position with respect to a containing
//! block."
//!
//! The constraint equations are solved per physical axis of the containing
//! block's padding box. The results are then mapped back to the box's own
//! logical axes.

use wallaby_geometry::{Offset, PhysicalSide};

use crate::box_model::LogicalExtentComputedValues;
use crate::context::LayoutContext;
use crate::error::Result;
use crate::preferred::preferred_logical_widths;
use crate::sizing::{
    SizeType, block_size_from_aspect_ratio, border_and_padding,
    compute_logical_height_using, compute_logical_width_from_aspect_ratio,
    compute_logical_width_using, compute_replaced_logical_height, compute_replaced_logical_width,
    containing_block_info, should_compute_logical_width_from_aspect_ratio,
};
use crate::style::{Length, LogicalFlow, LogicalSide, Position, minimum_value_for_length};
use crate::tree::{BoxId, BoxTree};

/// A physical axis of the containing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    const fn inline_axis_of(flow: LogicalFlow) -> Self {
        if flow.is_horizontal() {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    const fn block_axis_of(flow: LogicalFlow) -> Self {
        if flow.is_horizontal() {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// The physical end side of this axis: right or bottom.
    const fn end_side(self) -> PhysicalSide {
        match self {
            Self::Horizontal => PhysicalSide::Right,
            Self::Vertical => PhysicalSide::Bottom,
        }
    }
}

/// Whether the left (or top) inset wins when the equation is
/// overconstrained: the containing block's own flow starts on that side.
fn start_wins(flow: LogicalFlow, axis: Axis) -> bool {
    let end = axis.end_side();
    flow.physical_side(LogicalSide::InlineStart) != end
        && flow.physical_side(LogicalSide::BlockStart) != end
}

/// The inputs of the constraint equation along one physical axis.
///
/// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
///
/// "'left' + 'margin-left' + 'border-left-width' + 'padding-left' + 'width'
/// + 'padding-right' + 'border-right-width' + 'margin-right' + 'right' =
/// width of containing block"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedLayoutConstraints {
    /// Extent of the containing block's padding box along the axis.
    pub containing_size: f32,
    /// The left (or top) inset; `None` for `auto`.
    pub inset_start: Option<f32>,
    /// The right (or bottom) inset; `None` for `auto`.
    pub inset_end: Option<f32>,
    /// The left (or top) margin as authored.
    pub margin_start: Length,
    /// The right (or bottom) margin as authored.
    pub margin_end: Length,
    /// Basis for percentage margins: the containing block's inline size.
    pub margin_basis: f32,
    /// Border plus padding along the axis.
    pub border_padding: f32,
    /// The static position, from the padding box's left (or top) edge.
    pub static_offset: f32,
    /// The static position is the margin box's right (or bottom) edge.
    pub static_end_anchored: bool,
    /// The left (or top) inset wins an overconstrained equation.
    pub start_wins: bool,
}

/// The solved equation along one physical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisSolution {
    /// Border-box start from the padding box's left (or top) edge.
    pub position: f32,
    /// Border-box extent.
    pub extent: f32,
    /// Used left (or top) margin.
    pub margin_start: f32,
    /// Used right (or bottom) margin.
    pub margin_end: f32,
}

impl PositionedLayoutConstraints {
    /// Solve for position, extent and margins.
    ///
    /// `size` is the border-box extent when the size property is not
    /// `auto`. Otherwise `auto_size` is asked for a border-box extent given
    /// the space available to the margin box.
    #[must_use]
    pub fn solve(&self, size: Option<f32>, auto_size: &dyn Fn(f32) -> f32) -> AxisSolution {
        let containing = self.containing_size;
        let margin = |length: Length| minimum_value_for_length(length, || self.margin_basis);
        let auto_extent = |available: f32| auto_size(available).max(self.border_padding);

        match (self.inset_start, size, self.inset_end) {
            // "If all three of 'left', 'width', and 'right' are 'auto': First
            //  set any 'auto' values for 'margin-left' and 'margin-right' to
            //  0. Then, if the 'direction' property of the element
            //  establishing the static-position containing block is 'ltr' set
            //  'left' to the static position and apply rule number three
            //  below; otherwise, set 'right' to the static position and apply
            //  rule number one below."
            //
            // RULE 2: "If 'left' and 'right' are 'auto' and 'width' is not
            // 'auto', then if the 'direction' property of the element
            // establishing the static-position containing block is 'ltr' set
            // 'left' to the static position, otherwise set 'right' to the
            // static position."
            (None, _, None) => {
                let (margin_start, margin_end) = (margin(self.margin_start), margin(self.margin_end));
                let extent = size.unwrap_or_else(|| {
                    let available = if self.static_end_anchored {
                        self.static_offset
                    } else {
                        containing - self.static_offset
                    };
                    auto_extent(available - margin_start - margin_end)
                });
                let margin_box_start = if self.static_end_anchored {
                    self.static_offset - margin_end - extent - margin_start
                } else {
                    self.static_offset
                };
                AxisSolution {
                    position: margin_box_start + margin_start,
                    extent,
                    margin_start,
                    margin_end,
                }
            }

            // "If none of the three is 'auto': If both 'margin-left' and
            //  'margin-right' are 'auto', solve the equation under the extra
            //  constraint that the two margins get equal values, unless this
            //  would make them negative, in which case when direction of the
            //  containing block is 'ltr' ('rtl'), set 'margin-left'
            //  ('margin-right') to zero and solve for 'margin-right'
            //  ('margin-left'). If one of 'margin-left' or 'margin-right' is
            //  'auto', solve the equation for that value. If the values are
            //  over-constrained, ignore the value for 'left' (in case the
            //  'direction' property of the containing block is 'rtl') or
            //  'right' (in case 'direction' is 'ltr') and solve for that
            //  value."
            (Some(start), Some(extent), Some(end)) => {
                let remaining = containing - start - end - extent;
                let (margin_start, margin_end) =
                    match (self.margin_start.is_auto(), self.margin_end.is_auto()) {
                        (true, true) if remaining >= 0.0 => (remaining / 2.0, remaining / 2.0),
                        (true, true) if self.start_wins => (0.0, remaining),
                        (true, true) => (remaining, 0.0),
                        (true, false) => {
                            let margin_end = margin(self.margin_end);
                            (remaining - margin_end, margin_end)
                        }
                        (false, true) => {
                            let margin_start = margin(self.margin_start);
                            (margin_start, remaining - margin_start)
                        }
                        (false, false) => (margin(self.margin_start), margin(self.margin_end)),
                    };
                let position = if self.start_wins {
                    start + margin_start
                } else {
                    containing - end - margin_end - extent
                };
                AxisSolution {
                    position,
                    extent,
                    margin_start,
                    margin_end,
                }
            }

            // "Otherwise, set 'auto' values for 'margin-left' and
            //  'margin-right' to 0, and pick the one of the following six
            //  rules that applies."
            (start, size, end) => {
                let (margin_start, margin_end) = (margin(self.margin_start), margin(self.margin_end));
                let (margin_box_start, extent) = match (start, size, end) {
                    // RULE 1: "'left' and 'width' are 'auto' and 'right' is
                    // not 'auto', then the width is shrink-to-fit. Then solve
                    // for 'left'"
                    (None, None, Some(end)) => {
                        let extent = auto_extent(containing - end - margin_start - margin_end);
                        (containing - end - margin_end - extent - margin_start, extent)
                    }
                    // RULE 3: "'width' and 'right' are 'auto' and 'left' is
                    // not 'auto', then the width is shrink-to-fit. Then solve
                    // for 'right'"
                    (Some(start), None, None) => {
                        (start, auto_extent(containing - start - margin_start - margin_end))
                    }
                    // RULE 4: "'left' is 'auto', 'width' and 'right' are not
                    // 'auto', then solve for 'left'"
                    (None, Some(extent), Some(end)) => {
                        (containing - end - margin_end - extent - margin_start, extent)
                    }
                    // RULE 5: "'width' is 'auto', 'left' and 'right' are not
                    // 'auto', then solve for 'width'"
                    (Some(start), None, Some(end)) => (
                        start,
                        (containing - start - end - margin_start - margin_end)
                            .max(self.border_padding),
                    ),
                    // RULE 6: "'right' is 'auto', 'left' and 'width' are not
                    // 'auto', then solve for 'right'"
                    (Some(start), Some(extent), None) => (start, extent),
                    // Both insets auto and none auto are handled above.
                    (None, _, None) | (Some(_), Some(_), Some(_)) => (0.0, size.unwrap_or(0.0)),
                };
                AxisSolution {
                    position: margin_box_start + margin_start,
                    extent,
                    margin_start,
                    margin_end,
                }
            }
        }
    }

    /// Solve, then re-solve with `max` and `min` as the size if the
    /// tentative extent violates them.
    ///
    /// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    #[must_use]
    pub fn solve_with_min_max(
        &self,
        size: Option<f32>,
        min: f32,
        max: Option<f32>,
        auto_size: &dyn Fn(f32) -> f32,
    ) -> AxisSolution {
        let mut solution = self.solve(size, auto_size);
        if let Some(max) = max.filter(|&max| solution.extent > max) {
            solution = self.solve(Some(max), auto_size);
        }
        if solution.extent < min {
            solution = self.solve(Some(min), auto_size);
        }
        solution
    }
}

/// Build the constraint equation of out-of-flow box `id` along `axis`.
fn constraints_for_axis(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    axis: Axis,
) -> Result<PositionedLayoutConstraints> {
    let info = containing_block_info(tree, ctx, id)?;
    let node = tree.node(id)?;
    let style = &node.style;
    let edges = border_and_padding(style, info.inline_size);

    let horizontal = axis == Axis::Horizontal;
    let containing_size = if horizontal {
        info.rect.width
    } else {
        info.rect.height
    };
    let (inset_start, inset_end, margin_start, margin_end, border_padding) = if horizontal {
        (
            style.inset.left,
            style.inset.right,
            style.margin.left,
            style.margin.right,
            edges.horizontal_sum(),
        )
    } else {
        (
            style.inset.top,
            style.inset.bottom,
            style.margin.top,
            style.margin.bottom,
            edges.vertical_sum(),
        )
    };
    let inset = |length: Length| {
        (!length.is_auto()).then(|| minimum_value_for_length(length, || containing_size))
    };

    // The static position is recorded against the parent's border box.
    // Carry it up to the containing block's padding box.
    let mut static_point = node.static_position.point;
    if let Some(cb) = info.id {
        let mut current = node.parent;
        while let Some(ancestor) = current.filter(|&ancestor| ancestor != cb) {
            let ancestor_node = tree.node(ancestor)?;
            static_point += ancestor_node.geometry.location().to_offset();
            current = ancestor_node.parent;
        }
        let padding_origin = tree.node(cb)?.geometry.padding_box_rect().origin();
        static_point -= padding_origin.to_offset();
    }

    let (static_offset, static_end_anchored) = if horizontal {
        (static_point.x, node.static_position.right_anchored)
    } else {
        (static_point.y, node.static_position.bottom_anchored)
    };

    Ok(PositionedLayoutConstraints {
        containing_size,
        inset_start: inset(inset_start),
        inset_end: inset(inset_end),
        margin_start,
        margin_end,
        margin_basis: info.inline_size,
        border_padding,
        static_offset,
        static_end_anchored,
        start_wins: start_wins(info.flow, axis),
    })
}

/// Map a physical solution onto the box's logical axis. `flipped` is true
/// when the box's logical start side is the right (or bottom) one.
fn to_logical(solution: AxisSolution, flipped: bool) -> LogicalExtentComputedValues {
    let (margin_start, margin_end) = if flipped {
        (solution.margin_end, solution.margin_start)
    } else {
        (solution.margin_start, solution.margin_end)
    };
    LogicalExtentComputedValues {
        extent: solution.extent,
        position: solution.position,
        margin_start,
        margin_end,
    }
}

/// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
/// and [§ 10.3.8 Absolutely positioned, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-width)
///
/// The inline size, margins and physical offset of an out-of-flow box.
/// An `auto` size is shrink-to-fit: "min(max(preferred minimum width,
/// available width), preferred width)".
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead
/// id.
pub fn compute_positioned_logical_width(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<LogicalExtentComputedValues> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let is_replaced = node.kind.is_replaced();
    let flow = style.flow();
    let axis = Axis::inline_axis_of(flow);
    let constraints = constraints_for_axis(tree, ctx, id, axis)?;
    let available = constraints.containing_size;
    let inline_bp = flow.inline_sum(&border_and_padding(&style, constraints.margin_basis));

    let size = if let Some(width) = ctx.overrides.border_box_logical_width(id) {
        Some(width)
    } else if is_replaced {
        Some(compute_replaced_logical_width(tree, ctx, id)? + inline_bp)
    } else if !style.logical_width().is_auto() {
        Some(compute_logical_width_using(
            tree,
            ctx,
            id,
            SizeType::MainOrPreferredSize,
            style.logical_width(),
            available,
        )?)
    } else if should_compute_logical_width_from_aspect_ratio(tree, ctx, id)? {
        let edges = border_and_padding(&style, constraints.margin_basis);
        Some(compute_logical_width_from_aspect_ratio(tree, ctx, id, edges)?)
    } else {
        None
    };

    let preferred = preferred_logical_widths(tree, ctx, id)?;
    let max = if style.logical_max_width().is_none() {
        None
    } else {
        Some(compute_logical_width_using(
            tree,
            ctx,
            id,
            SizeType::MaxSize,
            style.logical_max_width(),
            available,
        )?)
    };
    let min = compute_logical_width_using(
        tree,
        ctx,
        id,
        SizeType::MinSize,
        style.logical_min_width(),
        available,
    )?;

    let solution = constraints.solve_with_min_max(size, min, max, &|available| {
        preferred.fit_content(available)
    });

    #[cfg(feature = "layout-trace")]
    tracing::trace!(
        box_id = %id,
        position = solution.position,
        extent = solution.extent,
        "positioned logical width"
    );

    Ok(to_logical(solution, flow.is_inline_flipped()))
}

/// [§ 10.6.4 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-height)
/// and [§ 10.6.5 Absolutely positioned, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-height)
///
/// "'top' + 'margin-top' + 'border-top-width' + 'padding-top' + 'height' +
/// 'padding-bottom' + 'border-bottom-width' + 'margin-bottom' + 'bottom' =
/// height of containing block"
///
/// An `auto` size is the content height: "the height is based on the
/// content per 10.6.7".
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead
/// id.
pub fn compute_positioned_logical_height(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    content_height: f32,
) -> Result<LogicalExtentComputedValues> {
    let node = tree.node(id)?;
    let style = node.style.clone();
    let is_replaced = node.kind.is_replaced();
    let flow = style.flow();
    let current_inline_size = flow.inline_size(node.geometry.size());
    let axis = Axis::block_axis_of(flow);
    let constraints = constraints_for_axis(tree, ctx, id, axis)?;
    let edges = border_and_padding(&style, constraints.margin_basis);
    let block_bp = flow.block_sum(&edges);

    let size = if let Some(height) = ctx.overrides.border_box_logical_height(id) {
        Some(height)
    } else if is_replaced {
        Some(compute_replaced_logical_height(tree, ctx, id)? + block_bp)
    } else if let Some(height) = compute_logical_height_using(
        tree,
        ctx,
        id,
        SizeType::MainOrPreferredSize,
        style.logical_height(),
        content_height,
    )? {
        Some(height)
    } else {
        style.logical_aspect_ratio().map(|ratio| {
            block_size_from_aspect_ratio(
                flow.inline_sum(&edges),
                block_bp,
                ratio,
                style.box_sizing_for_aspect_ratio(),
                current_inline_size,
                false,
            )
        })
    };

    let max = compute_logical_height_using(
        tree,
        ctx,
        id,
        SizeType::MaxSize,
        style.logical_max_height(),
        content_height,
    )?;
    let min = compute_logical_height_using(
        tree,
        ctx,
        id,
        SizeType::MinSize,
        style.logical_min_height(),
        content_height,
    )?
    .unwrap_or(block_bp);

    let content_extent = content_height.max(0.0) + block_bp;
    let solution = constraints.solve_with_min_max(size, min, max, &|_| content_extent);
    Ok(to_logical(solution, style.writing_mode.is_block_flipped()))
}

/// [§ 9.4.3 Relative positioning](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning)
///
/// "Once a box has been laid out according to the normal flow, it may be
/// shifted relative to its normal position."
///
/// "Offsetting a box (B1) in this way has no effect on the box (B2) that
/// follows: B2 is given a position as if B1 were not offset and B2 is not
/// re-positioned after B1's offset is applied."
///
/// Zero for boxes that are not `position: relative`.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead
/// id.
pub fn relative_offset(tree: &BoxTree, ctx: &mut LayoutContext<'_>, id: BoxId) -> Result<Offset> {
    let style = &tree.node(id)?.style;
    if style.position != Position::Relative {
        return Ok(Offset::ZERO);
    }
    let info = containing_block_info(tree, ctx, id)?;
    let resolve = |length: Length, basis: f32| {
        (!length.is_auto()).then(|| minimum_value_for_length(length, || basis))
    };
    let inset = &style.inset;

    // STEP 1: Layout the box in normal flow (already done before this is
    // called)

    // STEP 2: Horizontal offset
    //
    // "If both 'left' and 'right' are 'auto', the used values are both 0."
    //
    // "If 'left' is 'auto', its used value is minus the value of 'right'."
    //
    // "If neither 'left' nor 'right' is 'auto', the position is
    //  over-constrained, and one of them has to be ignored. If the
    //  'direction' property of the containing block is 'ltr', the value of
    //  'left' wins and 'right' becomes -'left'. If 'direction' of the
    //  containing block is 'rtl', 'right' wins and 'left' is ignored."
    let width = info.rect.width;
    let offset_x = match (resolve(inset.left, width), resolve(inset.right, width)) {
        (None, None) => 0.0,
        (Some(left), None) => left,
        (None, Some(right)) => -right,
        (Some(left), Some(right)) => {
            if start_wins(info.flow, Axis::Horizontal) {
                left
            } else {
                -right
            }
        }
    };

    // STEP 3: Vertical offset
    //
    // "If neither is 'auto', 'bottom' is ignored (i.e., the used value of
    //  'bottom' will be minus the value of 'top')."
    let height = info.rect.height;
    let offset_y = match (resolve(inset.top, height), resolve(inset.bottom, height)) {
        (None, None) => 0.0,
        (Some(top), None) => top,
        (None, Some(bottom)) => -bottom,
        (Some(top), Some(bottom)) => {
            if start_wins(info.flow, Axis::Vertical) {
                top
            } else {
                -bottom
            }
        }
    };

    Ok(Offset::new(offset_x, offset_y))
}
