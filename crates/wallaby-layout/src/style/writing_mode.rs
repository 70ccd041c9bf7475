//! Writing modes and logical directions.
//!
//! [CSS Writing Modes Level 4](https://www.w3.org/TR/css-writing-modes-4/)
//!
//! Layout reasons about boxes in terms of an inline axis (the direction
//! text runs in) and a block axis (the direction blocks stack in). This
//! module maps those logical directions to physical sides.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use wallaby_geometry::{PhysicalSide, Point, Rect, RectEdges, Size};

/// [§ 3.1 Block Flow Direction: the `writing-mode` property](https://www.w3.org/TR/css-writing-modes-4/#block-flow)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WritingMode {
    /// "Top-to-bottom block flow direction. Both the writing mode and the
    /// typographic mode are horizontal."
    #[default]
    HorizontalTb,
    /// "Right-to-left block flow direction. Both the writing mode and the
    /// typographic mode are vertical."
    VerticalRl,
    /// "Left-to-right block flow direction. Both the writing mode and the
    /// typographic mode are vertical."
    VerticalLr,
    /// "Right-to-left block flow direction. The writing mode is vertical,
    /// while the typographic mode is horizontal."
    SidewaysRl,
    /// "Left-to-right block flow direction. The writing mode is vertical,
    /// while the typographic mode is horizontal. Compared to vertical-lr,
    /// the inline direction is reversed."
    SidewaysLr,
}

impl WritingMode {
    /// Horizontal inline axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::HorizontalTb)
    }

    /// Blocks stack right to left.
    #[must_use]
    pub const fn is_block_flipped(self) -> bool {
        matches!(self, Self::VerticalRl | Self::SidewaysRl)
    }

    /// The physical side blocks start from.
    #[must_use]
    pub const fn block_start_side(self) -> PhysicalSide {
        match self {
            Self::HorizontalTb => PhysicalSide::Top,
            Self::VerticalRl | Self::SidewaysRl => PhysicalSide::Right,
            Self::VerticalLr | Self::SidewaysLr => PhysicalSide::Left,
        }
    }

    /// The physical side a left-to-right line starts from.
    const fn line_left_side(self) -> PhysicalSide {
        match self {
            Self::HorizontalTb => PhysicalSide::Left,
            Self::VerticalRl | Self::VerticalLr | Self::SidewaysRl => PhysicalSide::Top,
            Self::SidewaysLr => PhysicalSide::Bottom,
        }
    }
}

/// [§ 2.1 Specifying Directionality: the `direction` property](https://www.w3.org/TR/css-writing-modes-4/#direction)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    /// "Left-to-right directionality."
    #[default]
    Ltr,
    /// "Right-to-left directionality."
    Rtl,
}

/// [§ 6.1 Abstract Dimensions](https://www.w3.org/TR/css-writing-modes-4/#logical-directions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum LogicalSide {
    /// "block-start"
    BlockStart,
    /// "block-end"
    BlockEnd,
    /// "inline-start"
    InlineStart,
    /// "inline-end"
    InlineEnd,
}

/// A writing mode together with a direction: everything needed to map
/// logical sides to physical ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogicalFlow {
    /// The block flow direction.
    pub writing_mode: WritingMode,
    /// The inline base direction.
    pub direction: Direction,
}

impl LogicalFlow {
    /// Horizontal, left to right.
    pub const HORIZONTAL_LTR: Self = Self::new(WritingMode::HorizontalTb, Direction::Ltr);

    /// Combine a writing mode and a direction.
    #[must_use]
    pub const fn new(writing_mode: WritingMode, direction: Direction) -> Self {
        Self {
            writing_mode,
            direction,
        }
    }

    /// Horizontal inline axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        self.writing_mode.is_horizontal()
    }

    /// Inline and block axes are swapped relative to `other`.
    #[must_use]
    pub const fn is_perpendicular_to(self, other: Self) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    /// [§ 6.4 Flow-relative Directions](https://www.w3.org/TR/css-writing-modes-4/#logical-to-physical)
    ///
    /// The physical side that `side` maps to.
    #[must_use]
    pub const fn physical_side(self, side: LogicalSide) -> PhysicalSide {
        match side {
            LogicalSide::BlockStart => self.writing_mode.block_start_side(),
            LogicalSide::BlockEnd => self.writing_mode.block_start_side().opposite(),
            LogicalSide::InlineStart => self.inline_start_side(),
            LogicalSide::InlineEnd => self.inline_start_side().opposite(),
        }
    }

    const fn inline_start_side(self) -> PhysicalSide {
        let line_left = self.writing_mode.line_left_side();
        match self.direction {
            Direction::Ltr => line_left,
            Direction::Rtl => line_left.opposite(),
        }
    }

    /// Inline start is the right or bottom side.
    #[must_use]
    pub const fn is_inline_flipped(self) -> bool {
        matches!(
            self.inline_start_side(),
            PhysicalSide::Right | PhysicalSide::Bottom
        )
    }

    /// The inline directions of `self` and `other` run opposite ways along
    /// the same axis.
    #[must_use]
    pub fn is_inline_opposing(self, other: Self) -> bool {
        !self.is_perpendicular_to(other)
            && self.physical_side(LogicalSide::InlineStart)
                == other.physical_side(LogicalSide::InlineEnd)
    }

    /// The value on the physical side `side` maps to.
    #[must_use]
    pub const fn get<T: Copy>(self, edges: &RectEdges<T>, side: LogicalSide) -> T {
        edges.at(self.physical_side(side))
    }

    /// Replace the value on the physical side `side` maps to.
    pub fn set<T>(self, edges: &mut RectEdges<T>, side: LogicalSide, value: T) {
        edges.set(self.physical_side(side), value);
    }

    /// `inline-start + inline-end`.
    #[must_use]
    pub fn inline_sum(self, edges: &RectEdges<f32>) -> f32 {
        if self.is_horizontal() {
            edges.horizontal_sum()
        } else {
            edges.vertical_sum()
        }
    }

    /// `block-start + block-end`.
    #[must_use]
    pub fn block_sum(self, edges: &RectEdges<f32>) -> f32 {
        if self.is_horizontal() {
            edges.vertical_sum()
        } else {
            edges.horizontal_sum()
        }
    }

    /// The inline-axis component of a physical size.
    #[must_use]
    pub const fn inline_size(self, size: Size) -> f32 {
        if self.is_horizontal() {
            size.width
        } else {
            size.height
        }
    }

    /// The block-axis component of a physical size.
    #[must_use]
    pub const fn block_size(self, size: Size) -> f32 {
        if self.is_horizontal() {
            size.height
        } else {
            size.width
        }
    }

    /// The physical size with the given inline and block extents.
    #[must_use]
    pub const fn physical_size(self, inline: f32, block: f32) -> Size {
        if self.is_horizontal() {
            Size::new(inline, block)
        } else {
            Size::new(block, inline)
        }
    }

    /// [§ 6.4 Flow-relative Directions](https://www.w3.org/TR/css-writing-modes-4/#logical-to-physical)
    ///
    /// Convert a rect given as offsets from the inline-start and
    /// block-start edges of a container of physical size `container` into
    /// a physical rect relative to the container's top-left corner.
    #[must_use]
    pub fn physical_rect(
        self,
        inline_offset: f32,
        block_offset: f32,
        inline_extent: f32,
        block_extent: f32,
        container: Size,
    ) -> Rect {
        let size = self.physical_size(inline_extent, block_extent);
        let inline_flipped = self.is_inline_flipped();
        if self.is_horizontal() {
            let x = if inline_flipped {
                container.width - inline_offset - inline_extent
            } else {
                inline_offset
            };
            Rect::from_origin_size(Point::new(x, block_offset), size)
        } else {
            let y = if inline_flipped {
                container.height - inline_offset - inline_extent
            } else {
                inline_offset
            };
            let x = if self.writing_mode.is_block_flipped() {
                container.width - block_offset - block_extent
            } else {
                block_offset
            };
            Rect::from_origin_size(Point::new(x, y), size)
        }
    }
}
