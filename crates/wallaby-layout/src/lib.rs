//! Box tree and box formatting engine for Wallaby.
//!
//! # Scope
//!
//! This crate implements:
//! - **Box tree** arena with stable ids, layout phases, and containing-block
//!   lookup ([§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details))
//!
//! - **Length resolution** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Fixed, percentage, and calc lengths
//!   - Intrinsic keywords (min-content, max-content, fit-content, fill-available)
//!
//! - **Width and height computation** ([§ 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html))
//!   - `box-sizing`, min/max clamping, `aspect-ratio`
//!   - Replaced elements and their natural sizes
//!   - Auto margins and the overconstrained tie-break
//!   - Orthogonal writing modes
//!
//! - **Block formatting** ([§ 9.4.1](https://www.w3.org/TR/CSS2/visuren.html#block-formatting))
//!   - Sibling margin collapsing
//!   - Floats along the inline edges
//!
//! - **Positioned layout** ([§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width),
//!   [§ 9.4.3](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning))
//!
//! - **Overflow** ([CSS Overflow Level 3](https://www.w3.org/TR/css-overflow-3/))
//!
//! - **Flex layout** ([CSS Flexbox Level 1](https://www.w3.org/TR/css-flexbox-1/)), single line
//!
//! - **SVG text** per-character positioning ([SVG 2 § 11](https://www.w3.org/TR/SVG2/text.html))
//!
//! - **Coordinate mapping** through transforms
//!
//! # Not Yet Implemented
//!
//! - Inline formatting contexts and line boxes
//! - Parent/first-child margin collapsing
//! - Multi-line flex containers
//! - Grid and table layout
//! - Fragmentation

/// Block formatting per [§ 9.4.1](https://www.w3.org/TR/CSS2/visuren.html#block-formatting).
pub mod block;
/// Box geometry per [CSS Box Model Level 3](https://www.w3.org/TR/css-box-3/).
pub mod box_model;
/// Per-pass configuration and side tables.
pub mod context;
/// The layout walk and its output.
pub mod engine;
/// Layout errors.
pub mod error;
mod flex;
/// Mapping coordinates through frames and transforms.
pub mod mapping;
/// Layout and visual overflow per [CSS Overflow Level 3](https://www.w3.org/TR/css-overflow-3/).
pub mod overflow;
/// Absolute, fixed, and relative positioning per [§ 9.3](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme).
pub mod positioned;
/// Min-content and max-content widths per [CSS Sizing Level 3](https://www.w3.org/TR/css-sizing-3/).
pub mod preferred;
/// Width and height resolution per [§ 10](https://www.w3.org/TR/CSS2/visudet.html).
pub mod sizing;
/// Typed style inputs.
pub mod style;
/// SVG text layout per [SVG 2 § 11](https://www.w3.org/TR/SVG2/text.html).
pub mod svg_text;
/// The box tree arena.
pub mod tree;

// Re-exports for convenience
pub use box_model::{BoxGeometry, LogicalExtentComputedValues, border_shape_for_box};
pub use context::{LayoutConfig, LayoutContext, OverrideTable};
pub use engine::{LayoutEngine, LayoutReport, ResolvedGeometry, resolved_geometries, resolved_geometry};
pub use error::{LayoutError, Result};
pub use mapping::{
    absolute_border_box, map_absolute_to_local, map_local_to_container,
    map_quad_local_to_container,
};
pub use overflow::OverflowRecord;
pub use style::{BoxStyle, Direction, Length, LogicalFlow, LogicalSide, WritingMode};
pub use svg_text::{ApproximateGlyphMetrics, GlyphMetrics, SvgTextLayout};
pub use tree::{
    BoxId, BoxKind, BoxTree, IntrinsicSize, LayoutPhase, StaticPosition, SvgTextContent,
    TextMetrics,
};
