//! The layout walk.
//!
//! [§ 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)
//!
//! Layout is top-down for inline sizes and bottom-up for block sizes:
//! a box resolves its inline size against its containing block, lays out
//! its children inside it, then resolves its own block size from what they
//! produced. Out-of-flow boxes are laid out by their containing block once
//! its size is final.
//!
//! Every box moves through [`LayoutPhase`]s. Re-entering a box that is
//! still being computed is a cycle and aborts the pass.

use serde::Serialize;
use tracing::debug;
use wallaby_geometry::{Offset, Point, Quad, Rect, RectEdges};

use crate::block::{FlowLayout, layout_block_children, text_content_height};
use crate::context::{LayoutConfig, LayoutContext, OverrideTable};
use crate::error::{LayoutError, Result};
use crate::flex::layout_flex_children;
use crate::mapping::{absolute_border_box, map_quad_local_to_container};
use crate::overflow::{
    add_overflow_from_child, add_visual_effect_overflow, clear_overflow, layout_overflow_rect,
    visual_overflow_rect,
};
use crate::positioned::relative_offset;
use crate::sizing::{
    compute_logical_height, compute_logical_width, compute_percentage_logical_height,
    containing_block_info, containing_block_logical_width_for_content, resolved_border,
    resolved_padding,
};
use crate::style::{Length, LogicalSide};
use crate::svg_text::{ApproximateGlyphMetrics, GlyphMetrics, layout_svg_text};
use crate::tree::{BoxId, BoxKind, BoxTree, LayoutInputs, LayoutPhase, StaticPosition};

/// Lay out `id` and everything it contains.
///
/// A box whose layout is complete is skipped when it would be laid out
/// against the same available inline size and the same percentage-height
/// basis with nothing forcing it again.
///
/// # Errors
/// [`LayoutError::CycleDetected`] if `id` is already being laid out,
/// [`LayoutError::UnknownBox`] for a dead id.
pub(crate) fn layout_box(tree: &mut BoxTree, ctx: &mut LayoutContext<'_>, id: BoxId) -> Result<()> {
    let phase = tree.node(id)?.phase;
    if matches!(
        phase,
        LayoutPhase::ComputingWidth | LayoutPhase::ComputingHeight
    ) {
        return Err(LayoutError::CycleDetected(id));
    }

    let inputs = LayoutInputs {
        available: containing_block_logical_width_for_content(tree, ctx, id)?,
        percentage_basis: percentage_height_basis(tree, ctx, id)?,
    };
    let node = tree.node(id)?;
    let unchanged = phase == LayoutPhase::LayoutComplete
        && node.laid_out_for.is_some_and(|last| last.matches(inputs))
        && !node.style.position.is_out_of_flow()
        && !ctx.overrides.has_entry(id);
    if unchanged {
        return Ok(());
    }

    ctx.depth += 1;
    ctx.boxes_laid_out += 1;

    #[cfg(feature = "layout-trace")]
    tracing::trace!(
        box_id = %id,
        depth = ctx.depth,
        available = inputs.available,
        "layout box"
    );

    let result = layout_box_contents(tree, ctx, id);
    ctx.depth -= 1;
    result?;

    let node = tree.node_mut(id)?;
    node.phase = LayoutPhase::LayoutComplete;
    node.laid_out_for = Some(inputs);

    #[cfg(feature = "layout-trace")]
    tracing::trace!(box_id = %id, frame = ?node.geometry.frame, "layout complete");

    Ok(())
}

/// The block size the percentage-based heights of `id` resolve against,
/// or `None` when its height, min-height and max-height are all
/// independent of the containing block.
fn percentage_height_basis(
    tree: &BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
) -> Result<Option<f32>> {
    let style = &tree.node(id)?.style;
    let depends = [
        style.logical_height(),
        style.logical_min_height(),
        style.logical_max_height(),
    ]
    .into_iter()
    .any(|length| length.is_percent_or_calc() || matches!(length, Length::FillAvailable));
    if !depends {
        return Ok(None);
    }
    compute_percentage_logical_height(tree, ctx, id)
}

fn layout_box_contents(tree: &mut BoxTree, ctx: &mut LayoutContext<'_>, id: BoxId) -> Result<()> {
    tree.node_mut(id)?.phase = LayoutPhase::ComputingWidth;
    clear_overflow(tree, id)?;

    // SVG text positions its own characters.
    if tree.node(id)?.kind.is_svg_text() {
        return layout_svg_text(tree, ctx, id);
    }

    let node = tree.node(id)?;
    let style = node.style.clone();
    let flow = style.flow();
    let is_view = node.kind.is_view();
    let text_metrics = match node.kind {
        BoxKind::Text(metrics) => Some(metrics),
        _ => None,
    };
    let is_flex_container = node.kind.is_flex_container();
    let is_replaced = node.kind.is_replaced();
    let info = containing_block_info(tree, ctx, id)?;

    // STEP 1: Resolve the inline size and inline margins.
    let width = compute_logical_width(tree, ctx, id)?;
    {
        let geometry = &mut tree.node_mut(id)?.geometry;
        if is_view {
            geometry.border = RectEdges::ZERO;
            geometry.padding = RectEdges::ZERO;
        } else {
            geometry.border = resolved_border(&style);
            geometry.padding = resolved_padding(&style, info.inline_size);
        }
        geometry.frame = Rect::from_origin_size(
            geometry.location(),
            flow.physical_size(width.extent, 0.0),
        );
        flow.set(&mut geometry.margin, LogicalSide::InlineStart, width.margin_start);
        flow.set(&mut geometry.margin, LogicalSide::InlineEnd, width.margin_end);
    }

    // STEP 2: Lay out the children inside the resolved inline size.
    tree.node_mut(id)?.phase = LayoutPhase::ComputingHeight;
    let content_inline_size = flow.inline_size(tree.node(id)?.geometry.content_size());
    let children = if is_flex_container {
        layout_flex_children(tree, ctx, id)?
    } else if let Some(metrics) = text_metrics {
        FlowLayout {
            content_block_size: text_content_height(&metrics, content_inline_size),
            ..FlowLayout::default()
        }
    } else if is_replaced {
        FlowLayout::default()
    } else {
        layout_block_children(tree, ctx, id)?
    };

    // STEP 3: Resolve the block size from the content.
    let height = compute_logical_height(tree, ctx, id, children.content_block_size)?;
    {
        let geometry = &mut tree.node_mut(id)?.geometry;
        geometry.frame = Rect::from_origin_size(
            geometry.location(),
            flow.physical_size(width.extent, height.extent),
        );
        flow.set(&mut geometry.margin, LogicalSide::BlockStart, height.margin_start);
        flow.set(&mut geometry.margin, LogicalSide::BlockEnd, height.margin_end);
    }

    // [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
    //
    // An out-of-flow box is placed against its containing block, which
    // lays it out after all its in-flow content is placed.
    if style.position.is_out_of_flow() {
        let offset = if flow.is_horizontal() {
            Offset::new(width.position, height.position)
        } else {
            Offset::new(height.position, width.position)
        };
        let location = positioned_location(tree, id, offset)?;
        set_location(tree, id, location)?;
    }

    // STEP 4: Convert child placements to physical positions now that the
    // block size is known.
    place_children(tree, ctx, id, &children)?;

    // STEP 5: Lay out the out-of-flow boxes this box contains.
    let positioned = positioned_descendants(tree, id);
    for &descendant in &positioned {
        layout_box(tree, ctx, descendant)?;
    }

    // STEP 6: Accumulate overflow.
    add_visual_effect_overflow(tree, id)?;
    let in_flow: Vec<BoxId> = tree
        .children(id)
        .iter()
        .copied()
        .filter(|&child| {
            tree.style(child)
                .is_some_and(|style| !style.position.is_out_of_flow())
        })
        .collect();
    for child in in_flow {
        let delta = tree.node(child)?.geometry.location().to_offset();
        add_overflow_from_child(tree, id, child, delta)?;
    }
    for descendant in positioned {
        let delta = offset_from_ancestor(tree, descendant, id)?;
        add_overflow_from_child(tree, id, descendant, delta)?;
    }

    Ok(())
}

/// Move each child to its physical position and record static positions
/// for out-of-flow children.
fn place_children(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    id: BoxId,
    children: &FlowLayout,
) -> Result<()> {
    let node = tree.node(id)?;
    let flow = node.style.flow();
    let content_box = node.geometry.content_box_rect();
    let content_origin = content_box.origin().to_offset();

    for placement in &children.placements {
        let size = tree.node(placement.child)?.geometry.size();
        let rect = flow.physical_rect(
            placement.inline_offset,
            placement.block_offset,
            flow.inline_size(size),
            flow.block_size(size),
            content_box.size(),
        );
        // [§ 9.4.3 Relative positioning](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning)
        let relative = relative_offset(tree, ctx, placement.child)?;
        set_location(tree, placement.child, rect.origin() + content_origin + relative)?;
    }

    // In a flipped flow the hypothetical box grows back from its anchor.
    let inline_flipped = flow.is_inline_flipped();
    let block_flipped = flow.writing_mode.is_block_flipped();
    let horizontal = flow.is_horizontal();
    for placement in &children.static_positions {
        let rect = flow.physical_rect(
            placement.inline_offset,
            placement.block_offset,
            0.0,
            0.0,
            content_box.size(),
        );
        tree.node_mut(placement.child)?.static_position = StaticPosition {
            point: rect.origin() + content_origin,
            right_anchored: (horizontal && inline_flipped) || (!horizontal && block_flipped),
            bottom_anchored: !horizontal && inline_flipped,
        };
    }
    Ok(())
}

fn set_location(tree: &mut BoxTree, id: BoxId, location: Point) -> Result<()> {
    let geometry = &mut tree.node_mut(id)?.geometry;
    geometry.frame = Rect::from_origin_size(location, geometry.size());
    Ok(())
}

/// Out-of-flow descendants whose containing block is `id`, in tree order.
fn positioned_descendants(tree: &BoxTree, id: BoxId) -> Vec<BoxId> {
    tree.descendants(id)
        .into_iter()
        .filter(|&descendant| descendant != id)
        .filter(|&descendant| {
            tree.style(descendant)
                .is_some_and(|style| style.position.is_out_of_flow())
                && tree.containing_block(descendant) == Some(id)
        })
        .collect()
}

/// The frame origin of an out-of-flow box in its parent's space, given its
/// offset from the containing block's padding box.
fn positioned_location(tree: &BoxTree, id: BoxId, offset: Offset) -> Result<Point> {
    let Some(containing_block) = tree.containing_block(id) else {
        return Ok(Point::ZERO + offset);
    };
    let padding_origin = tree.node(containing_block)?.geometry.padding_box_rect().origin();
    let mut location = padding_origin + offset;
    let mut current = tree.parent(id);
    while let Some(ancestor) = current.filter(|&ancestor| ancestor != containing_block) {
        location -= tree.node(ancestor)?.geometry.location().to_offset();
        current = tree.parent(ancestor);
    }
    Ok(location)
}

/// The border-box origin of `id` in the border-box space of `ancestor`,
/// ignoring transforms.
fn offset_from_ancestor(tree: &BoxTree, id: BoxId, ancestor: BoxId) -> Result<Offset> {
    let mut offset = Offset::ZERO;
    let mut current = Some(id);
    while let Some(step) = current.filter(|&step| step != ancestor) {
        offset += tree.node(step)?.geometry.location().to_offset();
        current = tree.parent(step);
    }
    Ok(offset)
}

/// Summary of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    /// Boxes whose layout ran (skipped boxes are not counted).
    pub boxes_laid_out: usize,
    /// Invariant violations recovered from during the pass.
    pub diagnostics: Vec<LayoutError>,
}

/// Owns the state that outlives a single pass and runs passes over a
/// [`BoxTree`].
pub struct LayoutEngine {
    config: LayoutConfig,
    overrides: OverrideTable,
    glyph_metrics: Box<dyn GlyphMetrics>,
}

impl LayoutEngine {
    /// An engine using approximate glyph metrics for SVG text.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            overrides: OverrideTable::default(),
            glyph_metrics: Box::new(ApproximateGlyphMetrics),
        }
    }

    /// Replace the glyph metrics used for SVG text.
    #[must_use]
    pub fn with_glyph_metrics(mut self, metrics: impl GlyphMetrics + 'static) -> Self {
        self.glyph_metrics = Box::new(metrics);
        self
    }

    /// The pass configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The override side table.
    #[must_use]
    pub const fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// The override side table, for a container that sizes its children
    /// from outside a pass.
    pub const fn overrides_mut(&mut self) -> &mut OverrideTable {
        &mut self.overrides
    }

    /// Destroy `id` and its subtree, and purge their override entries.
    ///
    /// # Errors
    /// As [`BoxTree::destroy_subtree`].
    pub fn destroy_subtree(&mut self, tree: &mut BoxTree, id: BoxId) -> Result<Vec<BoxId>> {
        let destroyed = tree.destroy_subtree(id)?;
        self.overrides.purge(&destroyed);
        Ok(destroyed)
    }

    /// Lay out `root` and its subtree.
    ///
    /// Recovered invariant violations are listed in the report, or
    /// returned as the error when
    /// [`LayoutConfig::strict_invariants`] is set. When the pass fails, every
    /// box under `root` is left needing layout.
    ///
    /// # Errors
    /// [`LayoutError::UnknownBox`] for a dead root,
    /// [`LayoutError::CycleDetected`] if the walk re-enters a box, or the
    /// first recovered diagnostic in strict mode.
    pub fn layout(&mut self, tree: &mut BoxTree, root: BoxId) -> Result<LayoutReport> {
        if !tree.contains(root) {
            return Err(LayoutError::UnknownBox(root));
        }

        tree.begin_layout();
        let mut ctx = LayoutContext::new(&self.config, &mut self.overrides, self.glyph_metrics.as_ref());
        let result = layout_box(tree, &mut ctx, root);
        let report = LayoutReport {
            boxes_laid_out: ctx.boxes_laid_out,
            diagnostics: ctx.diagnostics,
        };
        tree.end_layout();

        if let Err(error) = result {
            debug!(root = %root, %error, "layout pass aborted");
            for id in tree.descendants(root) {
                let node = tree.node_mut(id)?;
                node.phase = LayoutPhase::NeedsLayout;
                node.laid_out_for = None;
            }
            return Err(error);
        }

        debug!(
            root = %root,
            boxes_laid_out = report.boxes_laid_out,
            diagnostics = report.diagnostics.len(),
            "layout pass complete"
        );

        let strict = self.config.strict_invariants;
        if let Some(first) = report.diagnostics.first().filter(|_| strict) {
            return Err(first.clone());
        }
        Ok(report)
    }
}

/// The resolved geometry of one box, for output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedGeometry {
    /// The box.
    pub id: BoxId,
    /// Border box in the view's space.
    pub border_box: Rect,
    /// Border box in the containing block's border-box space.
    pub border_box_in_containing_block: Rect,
    /// Padding box in the box's own space.
    pub padding_box: Rect,
    /// Content box in the box's own space.
    pub content_box: Rect,
    /// Used margins.
    pub margin: RectEdges<f32>,
    /// Layout overflow in the box's own space.
    pub layout_overflow: Rect,
    /// Visual overflow in the box's own space.
    pub visual_overflow: Rect,
}

/// The resolved geometry of `id`.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id.
pub fn resolved_geometry(tree: &BoxTree, id: BoxId) -> Result<ResolvedGeometry> {
    let geometry = tree.node(id)?.geometry;
    let border_box = absolute_border_box(tree, id)?;
    let border_box_in_containing_block = match tree.containing_block(id) {
        Some(containing_block) => map_quad_local_to_container(
            tree,
            id,
            containing_block,
            Quad::from_rect(&geometry.border_box_rect()),
        )?
        .quad
        .bounding_box(),
        None => border_box,
    };
    Ok(ResolvedGeometry {
        id,
        border_box,
        border_box_in_containing_block,
        padding_box: geometry.padding_box_rect(),
        content_box: geometry.content_box_rect(),
        margin: geometry.margin,
        layout_overflow: layout_overflow_rect(tree, id)?,
        visual_overflow: visual_overflow_rect(tree, id)?,
    })
}

/// The resolved geometry of `root` and every box under it, in tree order.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead root.
pub fn resolved_geometries(tree: &BoxTree, root: BoxId) -> Result<Vec<ResolvedGeometry>> {
    let _ = tree.node(root)?;
    tree.descendants(root)
        .into_iter()
        .map(|id| resolved_geometry(tree, id))
        .collect()
}
