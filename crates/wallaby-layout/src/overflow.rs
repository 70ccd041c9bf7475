//! Layout and visual overflow.
//!
//! [CSS Overflow Module Level 3 § 2 Scrollable and Ink Overflow](https://www.w3.org/TR/css-overflow-3/#overflow-concepts)
//!
//! "Scrollable overflow is the set of boxes and text that overflow the
//! bounds of a box and that need to be reachable by scrolling."
//!
//! "Ink overflow is the part of a box and its content that creates a visual
//! effect outside of the box's border box."
//!
//! Most boxes never overflow, so the record is only allocated the first time
//! a rect escapes the box. Until then the layout overflow is the padding box
//! and the visual overflow is the border box.

use serde::Serialize;
use wallaby_geometry::{Offset, Rect, RectEdges};

use crate::error::Result;
use crate::style::{LogicalFlow, LogicalSide, box_shadow_outsets};
use crate::tree::{BoxId, BoxTree};

/// Overflow rects of one box, in its own border-box coordinate space.
///
/// Both rects always contain the box's border box (the layout rect starts
/// from the padding box, which the border box contains, and only grows).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverflowRecord {
    layout_overflow: Rect,
    visual_overflow: Rect,
}

impl OverflowRecord {
    fn new(padding_box: Rect, border_box: Rect) -> Self {
        Self {
            layout_overflow: padding_box,
            visual_overflow: border_box,
        }
    }

    /// The scrollable overflow rect.
    #[must_use]
    pub const fn layout_overflow_rect(&self) -> Rect {
        self.layout_overflow
    }

    /// The ink overflow rect.
    #[must_use]
    pub const fn visual_overflow_rect(&self) -> Rect {
        self.visual_overflow
    }
}

/// [§ 2.2 Scrollable Overflow](https://www.w3.org/TR/css-overflow-3/#scrollable)
///
/// The sides of a box that may receive layout overflow. Content beyond the
/// block-start or inline-start edge can never be scrolled to, so those sides
/// are closed.
#[must_use]
pub fn allowed_layout_overflow(flow: LogicalFlow) -> RectEdges<bool> {
    let mut allowed = RectEdges::uniform(true);
    flow.set(&mut allowed, LogicalSide::BlockStart, false);
    flow.set(&mut allowed, LogicalSide::InlineStart, false);
    allowed
}

/// The layout overflow rect: the padding box unless something overflows it.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn layout_overflow_rect(tree: &BoxTree, id: BoxId) -> Result<Rect> {
    let node = tree.node(id)?;
    Ok(node
        .overflow
        .map_or_else(|| node.geometry.padding_box_rect(), |record| record.layout_overflow))
}

/// The visual overflow rect: the border box unless something overflows it.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn visual_overflow_rect(tree: &BoxTree, id: BoxId) -> Result<Rect> {
    let node = tree.node(id)?;
    Ok(node
        .overflow
        .map_or_else(|| node.geometry.border_box_rect(), |record| record.visual_overflow))
}

/// Drop the overflow record. Called at the start of every layout.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn clear_overflow(tree: &mut BoxTree, id: BoxId) -> Result<()> {
    tree.node_mut(id)?.overflow = None;
    Ok(())
}

/// Union `rect` into the layout overflow.
///
/// A rect inside the padding box (or an empty one) is a no-op. Scroll
/// containers and the view first clamp the rect to the sides that are
/// reachable by scrolling.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn add_layout_overflow(tree: &mut BoxTree, id: BoxId, rect: Rect) -> Result<()> {
    let node = tree.node_mut(id)?;
    let client_box = node.geometry.padding_box_rect();
    if client_box.contains_rect(&rect) || rect.is_empty() {
        return Ok(());
    }

    let mut overflow_rect = rect;
    if node.style.has_scrollable_overflow() || node.kind.is_view() {
        let allowed = allowed_layout_overflow(node.style.flow());
        if !allowed.top {
            overflow_rect.shift_y_edge_to(overflow_rect.y.max(client_box.y));
        }
        if !allowed.bottom {
            overflow_rect.shift_max_y_edge_to(overflow_rect.max_y().min(client_box.max_y()));
        }
        if !allowed.left {
            overflow_rect.shift_x_edge_to(overflow_rect.x.max(client_box.x));
        }
        if !allowed.right {
            overflow_rect.shift_max_x_edge_to(overflow_rect.max_x().min(client_box.max_x()));
        }
        // Clamping may have made it unreachable or contained.
        if client_box.contains_rect(&overflow_rect) || overflow_rect.is_empty() {
            return Ok(());
        }
    }

    let border_box = node.geometry.border_box_rect();
    let record = node
        .overflow
        .get_or_insert_with(|| OverflowRecord::new(client_box, border_box));
    record.layout_overflow = record.layout_overflow.union(&overflow_rect);
    Ok(())
}

/// Union `rect` into the visual overflow.
///
/// A rect inside the border box (or an empty one) is a no-op and allocates
/// nothing.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn add_visual_overflow(tree: &mut BoxTree, id: BoxId, rect: Rect) -> Result<()> {
    let node = tree.node_mut(id)?;
    let border_box = node.geometry.border_box_rect();
    if border_box.contains_rect(&rect) || rect.is_empty() {
        return Ok(());
    }
    let padding_box = node.geometry.padding_box_rect();
    let record = node
        .overflow
        .get_or_insert_with(|| OverflowRecord::new(padding_box, border_box));
    record.visual_overflow = record.visual_overflow.union(&rect);
    Ok(())
}

/// [§ 2.1 Ink Overflow](https://www.w3.org/TR/css-overflow-3/#ink)
///
/// "the ink overflow area ... includes ... box shadows, border images,
/// outlines". Each outset is applied to the border box independently and
/// the results are unioned.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn add_visual_effect_overflow(tree: &mut BoxTree, id: BoxId) -> Result<()> {
    let node = tree.node(id)?;
    let border_box = node.geometry.border_box_rect();
    let style = &node.style;

    let mut rect = border_box;
    let shadow = box_shadow_outsets(&style.box_shadow);
    if !shadow.is_zero() {
        rect = rect.union(&border_box.inflate_edges(&shadow));
    }
    let image = style.border_image_outset.map(|outset| outset.max(0.0));
    if !image.is_zero() {
        rect = rect.union(&border_box.inflate_edges(&image));
    }
    let outline = style.outline.size();
    if outline > 0.0 {
        rect = rect.union(&border_box.inflate(outline));
    }

    add_visual_overflow(tree, id, rect)
}

/// The rect a child contributes to its parent's layout overflow, in the
/// child's own coordinate space after its transform.
///
/// A child that clips contributes only its border box.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn layout_overflow_rect_for_propagation(tree: &BoxTree, child: BoxId) -> Result<Rect> {
    let node = tree.node(child)?;
    let mut rect = node.geometry.border_box_rect();
    if !node.style.has_non_visible_overflow() {
        rect = rect.union(&layout_overflow_rect(tree, child)?);
    }
    Ok(transformed(tree, child, rect))
}

/// The rect a child contributes to its parent's visual overflow, in the
/// child's own coordinate space after its transform.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn visual_overflow_rect_for_propagation(tree: &BoxTree, child: BoxId) -> Result<Rect> {
    let rect = visual_overflow_rect(tree, child)?;
    Ok(transformed(tree, child, rect))
}

fn transformed(tree: &BoxTree, id: BoxId, rect: Rect) -> Rect {
    let Ok(node) = tree.node(id) else {
        return rect;
    };
    node.style
        .transform_matrix(node.geometry.size())
        .map_or(rect, |matrix| matrix.map_rect(&rect))
}

/// Add a child's overflow to `id`. `delta` is the child's border-box
/// origin in `id`'s coordinate space.
///
/// Children hosting a fragmented flow never propagate. Visual overflow is
/// not propagated into a box that clips.
///
/// # Errors
/// [`LayoutError::UnknownBox`](crate::LayoutError::UnknownBox) for a dead id.
pub fn add_overflow_from_child(
    tree: &mut BoxTree,
    id: BoxId,
    child: BoxId,
    delta: Offset,
) -> Result<()> {
    if tree.node(child)?.kind.establishes_fragmented_flow() {
        return Ok(());
    }

    let child_layout = layout_overflow_rect_for_propagation(tree, child)?.moved_by(delta);
    add_layout_overflow(tree, id, child_layout)?;

    if tree.node(id)?.style.has_non_visible_overflow() {
        return Ok(());
    }
    let child_visual = visual_overflow_rect_for_propagation(tree, child)?.moved_by(delta);
    add_visual_overflow(tree, id, child_visual)
}
