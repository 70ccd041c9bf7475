//! Four-sided quantities.
//!
//! [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
//!
//! "Each box has a content area and optional surrounding padding, border,
//! and margin areas." Each of those areas is described by one value per
//! physical side.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Physical side of a box
///
/// Used to map logical directions (block-start, inline-end, etc.) to
/// physical sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum PhysicalSide {
    /// Top edge of the box
    Top,
    /// Right edge of the box
    Right,
    /// Bottom edge of the box
    Bottom,
    /// Left edge of the box
    Left,
}

impl PhysicalSide {
    /// The side across the box from this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Whether this side runs horizontally (top or bottom).
    #[must_use]
    pub const fn is_horizontal_edge(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// One value per physical side: top, right, bottom, left.
///
/// Used for resolved margin/border/padding widths (`RectEdges<f32>`),
/// unresolved style inputs (`RectEdges<Length>`), and closed-edge masks
/// (`RectEdges<bool>`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectEdges<T> {
    /// Top edge value.
    pub top: T,
    /// Right edge value.
    pub right: T,
    /// Bottom edge value.
    pub bottom: T,
    /// Left edge value.
    pub left: T,
}

impl<T> RectEdges<T> {
    /// Create edges from four values in CSS order.
    #[must_use]
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Borrow the value for `side`.
    #[must_use]
    pub const fn get(&self, side: PhysicalSide) -> &T {
        match side {
            PhysicalSide::Top => &self.top,
            PhysicalSide::Right => &self.right,
            PhysicalSide::Bottom => &self.bottom,
            PhysicalSide::Left => &self.left,
        }
    }

    /// Mutably borrow the value for `side`.
    pub const fn get_mut(&mut self, side: PhysicalSide) -> &mut T {
        match side {
            PhysicalSide::Top => &mut self.top,
            PhysicalSide::Right => &mut self.right,
            PhysicalSide::Bottom => &mut self.bottom,
            PhysicalSide::Left => &mut self.left,
        }
    }

    /// Replace the value for `side`.
    pub fn set(&mut self, side: PhysicalSide, value: T) {
        *self.get_mut(side) = value;
    }

    /// Apply `f` to each side.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> RectEdges<U> {
        RectEdges {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

impl<T: Copy> RectEdges<T> {
    /// The same value on every side.
    #[must_use]
    pub const fn uniform(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    /// The value for `side`, copied.
    #[must_use]
    pub const fn at(&self, side: PhysicalSide) -> T {
        *self.get(side)
    }
}

impl RectEdges<f32> {
    /// All four sides zero.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// `left + right`.
    #[must_use]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }

    /// Whether every side is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    /// Component-wise sum.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        Self::new(
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
            self.left.max(other.left),
        )
    }
}

/// Which edges of a box are "closed".
///
/// A box fragmented across lines or columns only draws its border on the
/// edges where it actually starts or ends. Radii touching an open edge are
/// dropped and the open edge's border width is treated as zero.
pub type ClosedEdges = RectEdges<bool>;

impl ClosedEdges {
    /// Every edge closed (an unfragmented box).
    pub const ALL: Self = Self::new(true, true, true, true);

    /// Whether every edge is closed.
    #[must_use]
    pub const fn all_closed(&self) -> bool {
        self.top && self.right && self.bottom && self.left
    }
}
