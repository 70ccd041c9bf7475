//! Mapping coordinates between a box and its ancestors.
//!
//! [CSS Transforms Level 1 § 6 The Transform Rendering Model](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
//!
//! "Specifying a value other than none for the transform property
//! establishes a new local coordinate system at the element that it is
//! applied to."
//!
//! Each step of a walk moves by the box's frame origin and applies its
//! transform. Most boxes are untransformed, so the [`TransformState`] stays
//! a plain offset until the first real transform.

use wallaby_geometry::{
    ApplyTransformDirection, MappedPoint, MappedQuad, Offset, Point, Quad, Rect,
    TransformAccumulation, TransformState, TransformationMatrix,
};

use crate::error::{LayoutError, Result};
use crate::tree::{BoxId, BoxTree};

/// Map `point` from the border-box space of `id` into the border-box space
/// of `ancestor`.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id, [`LayoutError::InvalidScene`]
/// if `ancestor` is neither `id` nor one of its ancestors.
pub fn map_local_to_container(
    tree: &BoxTree,
    id: BoxId,
    ancestor: BoxId,
    point: Point,
) -> Result<MappedPoint> {
    let mut state = TransformState::new(ApplyTransformDirection::ApplyTransform, point);
    walk_up(tree, id, ancestor, &mut state)?;
    Ok(state.mapped_point())
}

/// Map `quad` from the border-box space of `id` into the border-box space
/// of `ancestor`.
///
/// # Errors
/// As [`map_local_to_container`].
pub fn map_quad_local_to_container(
    tree: &BoxTree,
    id: BoxId,
    ancestor: BoxId,
    quad: Quad,
) -> Result<MappedQuad> {
    let mut state =
        TransformState::new_with_quad(ApplyTransformDirection::ApplyTransform, Point::ZERO, quad);
    walk_up(tree, id, ancestor, &mut state)?;
    Ok(state.mapped_quad().unwrap_or(MappedQuad {
        quad,
        was_clamped: false,
    }))
}

/// Map `point` from the view's space into the border-box space of `id`.
///
/// A non-invertible transform on the way clamps the mapping to identity
/// for that step and sets `was_clamped`.
///
/// # Errors
/// [`LayoutError::UnknownBox`] for a dead id, [`LayoutError::InvalidScene`]
/// if `id` is detached.
pub fn map_absolute_to_local(tree: &BoxTree, id: BoxId, point: Point) -> Result<MappedPoint> {
    let mut state = TransformState::new(ApplyTransformDirection::UnapplyInverseTransform, point);

    // Steps arrive outermost first.
    let mut path = path_to_ancestor(tree, id, BoxId::VIEW)?;
    path.reverse();
    for step in path {
        state.move_by(location(tree, step)?, TransformAccumulation::AccumulateTransform);
        if let Some(matrix) = transform(tree, step)? {
            let _ = state.apply_transform(&matrix, TransformAccumulation::AccumulateTransform);
        }
    }
    Ok(state.mapped_point())
}

/// The bounding box of the border box of `id` in the view's space.
///
/// # Errors
/// As [`map_quad_local_to_container`].
pub fn absolute_border_box(tree: &BoxTree, id: BoxId) -> Result<Rect> {
    let border_box = tree.node(id)?.geometry.border_box_rect();
    let mapped = map_quad_local_to_container(tree, id, BoxId::VIEW, Quad::from_rect(&border_box))?;
    Ok(mapped.quad.bounding_box())
}

/// Apply each box's transform and then its frame offset, innermost first,
/// stopping below `ancestor`.
fn walk_up(tree: &BoxTree, id: BoxId, ancestor: BoxId, state: &mut TransformState) -> Result<()> {
    for step in path_to_ancestor(tree, id, ancestor)? {
        if let Some(matrix) = transform(tree, step)? {
            let _ = state.apply_transform(&matrix, TransformAccumulation::AccumulateTransform);
        }
        state.move_by(location(tree, step)?, TransformAccumulation::AccumulateTransform);
    }
    Ok(())
}

/// `id` and its ancestors up to but excluding `ancestor`, innermost first.
fn path_to_ancestor(tree: &BoxTree, id: BoxId, ancestor: BoxId) -> Result<Vec<BoxId>> {
    let _ = tree.node(id)?;
    let mut path = Vec::new();
    let mut current = id;
    while current != ancestor {
        path.push(current);
        current = tree.parent(current).ok_or_else(|| {
            LayoutError::InvalidScene(format!("box {ancestor} is not an ancestor of box {id}"))
        })?;
    }
    Ok(path)
}

fn location(tree: &BoxTree, id: BoxId) -> Result<Offset> {
    Ok(tree.node(id)?.geometry.location().to_offset())
}

fn transform(tree: &BoxTree, id: BoxId) -> Result<Option<TransformationMatrix>> {
    let node = tree.node(id)?;
    Ok(node.style.transform_matrix(node.geometry.size()))
}
