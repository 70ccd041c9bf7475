//! Geometric primitives for the Wallaby layout engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Points, sizes, rects, edges** in `f32` layout units
//! - **Rounded rects** ([§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners))
//!   - Corner-overlap scaling so adjacent radii never exceed the box
//!   - Per-corner ellipse containment
//! - **Border shapes**: outer border edge plus inner padding edge
//! - **Paths** built from rects, rounded rects, ellipses, and arcs
//! - **Transformation matrices** ([CSS Transforms Level 2](https://www.w3.org/TR/css-transforms-2/))
//! - **Transform state**: offset-or-matrix accumulation while mapping
//!   coordinates through a box tree
//!
//! # Not Yet Implemented
//!
//! - Path data parsing
//! - 3D transform functions (the matrix is 4×4, but only 2D functions are
//!   constructed)

/// Border and padding edge shapes per [§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners).
pub mod border_shape;
/// Per-side values.
pub mod edges;
/// Vector paths.
pub mod path;
/// Points, offsets, and sizes.
pub mod point;
/// Quadrilaterals.
pub mod quad;
/// Axis-aligned rects.
pub mod rect;
/// Rounded rects and corner radii.
pub mod rounded_rect;
/// 4×4 matrices per [CSS Transforms Level 2](https://www.w3.org/TR/css-transforms-2/).
pub mod transform;
/// Coordinate-space accumulation.
pub mod transform_state;

pub use border_shape::BorderShape;
pub use edges::{ClosedEdges, PhysicalSide, RectEdges};
pub use path::{Path, PathElement};
pub use point::{Offset, Point, Size};
pub use quad::Quad;
pub use rect::Rect;
pub use rounded_rect::{CornerRadii, RoundedRect};
pub use transform::TransformationMatrix;
pub use transform_state::{
    ApplyTransformDirection, MappedPoint, MappedQuad, TransformAccumulation, TransformState,
};
