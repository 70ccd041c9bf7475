//! The box tree arena.
//!
//! Boxes live in a flat arena and refer to each other by [`BoxId`]. An id
//! is stable for the life of its box and is never reused, so side tables
//! keyed by id (overrides, caches) can be purged explicitly when a subtree
//! is destroyed instead of dangling.

use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

use crate::box_model::BoxGeometry;
use crate::error::{LayoutError, Result};
use crate::overflow::OverflowRecord;
use crate::style::{BoxStyle, IntrinsicSizes, Position};
use crate::svg_text::SvgTextLayout;
use wallaby_geometry::Point;

/// Stable identity of a box in a [`BoxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId(pub u32);

impl BoxId {
    /// The view: the root of every tree and the initial containing block.
    pub const VIEW: Self = Self(0);

    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The natural size of replaced content (an image, a canvas).
///
/// Either dimension may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrinsicSize {
    /// Natural width.
    pub width: Option<f32>,
    /// Natural height.
    pub height: Option<f32>,
}

impl IntrinsicSize {
    /// Both dimensions known.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// The natural aspect ratio (width over height), when both dimensions
    /// are known and non-zero.
    #[must_use]
    pub fn ratio(&self) -> Option<f32> {
        match (self.width, self.height) {
            (Some(width), Some(height)) if width > 0.0 && height > 0.0 => Some(width / height),
            _ => None,
        }
    }
}

/// Pre-shaped text content, measured upstream.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TextMetrics {
    /// Width of the longest unbreakable run.
    pub min_content_width: f32,
    /// Width of the whole text on one line.
    pub max_content_width: f32,
    /// Height of one line.
    pub line_height: f32,
}

/// The characters of an SVG `<text>` element plus its positioning lists.
///
/// [SVG 2 § 11.4 The 'text' element](https://www.w3.org/TR/SVG2/text.html#TextElement)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SvgTextContent {
    /// The characters to lay out.
    pub text: String,
    /// Absolute x positions, one per character.
    pub x: Vec<f32>,
    /// Absolute y positions, one per character.
    pub y: Vec<f32>,
    /// Relative x shifts, one per character.
    pub dx: Vec<f32>,
    /// Relative y shifts, one per character.
    pub dy: Vec<f32>,
    /// Per-character rotation in degrees; the last value repeats.
    pub rotate: Vec<f32>,
    /// Font size in user units.
    pub font_size: f32,
}

/// What kind of box this is.
///
/// Formatting-context specific behavior dispatches on this tag once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxKind {
    /// The initial containing block. Exactly one per tree, always
    /// [`BoxId::VIEW`].
    View,
    /// A block container.
    Block,
    /// An atomic inline-level block container.
    InlineBlock,
    /// Replaced content with a natural size.
    Replaced(IntrinsicSize),
    /// A flex container.
    FlexContainer,
    /// Atomic text content.
    Text(TextMetrics),
    /// SVG `<text>`.
    SvgText(SvgTextContent),
    /// A block that hosts a fragmented flow. Lays out like a block, but
    /// its overflow never propagates to its parent.
    FragmentedFlow,
}

impl BoxKind {
    /// The view.
    #[must_use]
    pub const fn is_view(&self) -> bool {
        matches!(self, Self::View)
    }

    /// Replaced content.
    #[must_use]
    pub const fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced(_))
    }

    /// A flex container.
    #[must_use]
    pub const fn is_flex_container(&self) -> bool {
        matches!(self, Self::FlexContainer)
    }

    /// SVG text.
    #[must_use]
    pub const fn is_svg_text(&self) -> bool {
        matches!(self, Self::SvgText(_))
    }

    /// Atomic text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Inline-level.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::InlineBlock)
    }

    /// Hosts a self-contained fragmented flow.
    #[must_use]
    pub const fn establishes_fragmented_flow(&self) -> bool {
        matches!(self, Self::FragmentedFlow)
    }

    /// Whether boxes of this kind may have children.
    #[must_use]
    pub const fn can_have_children(&self) -> bool {
        matches!(
            self,
            Self::View | Self::Block | Self::InlineBlock | Self::FlexContainer | Self::FragmentedFlow
        )
    }
}

/// Where a box is in its layout state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPhase {
    /// Style, tree structure, or containing block changed.
    #[default]
    NeedsLayout,
    /// The inline size is being resolved.
    ComputingWidth,
    /// Children are laid out and the block size is being resolved.
    ComputingHeight,
    /// Geometry is current.
    LayoutComplete,
}

/// [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
///
/// "the static position for 'left' is the distance from the left edge of
/// the containing block to the left margin edge of a hypothetical box that
/// would have been the first box of the element if its specified
/// 'position' value had been 'static'".
///
/// `point` is relative to the parent's border box. In a flipped flow the
/// hypothetical box grows leftward or upward from `point`, which the
/// anchor flags record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StaticPosition {
    /// The anchor corner.
    pub point: Point,
    /// `point` is the right margin edge rather than the left one.
    pub right_anchored: bool,
    /// `point` is the bottom margin edge rather than the top one.
    pub bottom_anchored: bool,
}

/// One box in the arena.
#[derive(Debug, Clone)]
pub(crate) struct BoxNode {
    pub(crate) kind: BoxKind,
    pub(crate) style: BoxStyle,
    pub(crate) parent: Option<BoxId>,
    pub(crate) children: Vec<BoxId>,
    pub(crate) phase: LayoutPhase,
    pub(crate) geometry: BoxGeometry,
    pub(crate) overflow: Option<OverflowRecord>,
    /// Memoized min/max preferred logical widths, border box included.
    pub(crate) preferred_widths: Option<IntrinsicSizes>,
    /// Where the box would have started in normal flow.
    pub(crate) static_position: StaticPosition,
    /// What the last completed layout ran against.
    pub(crate) laid_out_for: Option<LayoutInputs>,
    /// Placed characters of an SVG text box.
    pub(crate) svg_text_layout: Option<SvgTextLayout>,
}

/// The containing-block measures a completed layout of a box was resolved
/// against. A clean box is laid out again when any of them changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LayoutInputs {
    /// The available inline size.
    pub(crate) available: f32,
    /// The block size that percentage and `fill-available` heights
    /// (including min and max) resolved against. `None` when the box has
    /// no such height or the basis was indefinite.
    pub(crate) percentage_basis: Option<f32>,
}

impl LayoutInputs {
    pub(crate) fn matches(self, other: Self) -> bool {
        let same = |a: f32, b: f32| (a - b).abs() <= f32::EPSILON;
        same(self.available, other.available)
            && match (self.percentage_basis, other.percentage_basis) {
                (Some(a), Some(b)) => same(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl BoxNode {
    fn new(kind: BoxKind, style: BoxStyle) -> Self {
        Self {
            kind,
            style,
            parent: None,
            children: Vec::new(),
            phase: LayoutPhase::NeedsLayout,
            geometry: BoxGeometry::default(),
            overflow: None,
            preferred_widths: None,
            static_position: StaticPosition::default(),
            laid_out_for: None,
            svg_text_layout: None,
        }
    }
}

/// An arena of boxes rooted at the view.
#[derive(Debug, Clone)]
pub struct BoxTree {
    nodes: Vec<Option<BoxNode>>,
    layout_in_progress: bool,
}

impl Default for BoxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxTree {
    /// A tree holding only the view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(BoxNode::new(BoxKind::View, BoxStyle::default()))],
            layout_in_progress: false,
        }
    }

    /// Create a detached box. Attach it with [`append_child`](Self::append_child).
    pub fn create_box(&mut self, kind: BoxKind, style: BoxStyle) -> BoxId {
        #[allow(clippy::cast_possible_truncation)]
        let id = BoxId(self.nodes.len() as u32);
        self.nodes.push(Some(BoxNode::new(kind, style)));
        id
    }

    /// Number of live boxes, the view included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether only the view is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Whether `id` names a live box.
    #[must_use]
    pub fn contains(&self, id: BoxId) -> bool {
        self.nodes.get(id.index()).is_some_and(Option::is_some)
    }

    pub(crate) fn node(&self, id: BoxId) -> Result<&BoxNode> {
        self.nodes
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(LayoutError::UnknownBox(id))
    }

    pub(crate) fn node_mut(&mut self, id: BoxId) -> Result<&mut BoxNode> {
        self.nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(LayoutError::UnknownBox(id))
    }

    fn ensure_not_in_layout(&self) -> Result<()> {
        if self.layout_in_progress {
            return Err(LayoutError::TreeMutatedDuringLayout);
        }
        Ok(())
    }

    pub(crate) fn begin_layout(&mut self) {
        self.layout_in_progress = true;
    }

    pub(crate) fn end_layout(&mut self) {
        self.layout_in_progress = false;
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that is already attached elsewhere is moved.
    ///
    /// # Errors
    /// [`LayoutError::UnknownBox`] for a dead id,
    /// [`LayoutError::CycleDetected`] if `child` is `parent` or one of its
    /// ancestors, [`LayoutError::InvalidScene`] if `parent` cannot have
    /// children or `child` is the view.
    pub fn append_child(&mut self, parent: BoxId, child: BoxId) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` under `parent` before `before` (or last when `None`).
    ///
    /// # Errors
    /// As [`append_child`](Self::append_child), plus
    /// [`LayoutError::InvalidScene`] if `before` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: BoxId,
        child: BoxId,
        before: Option<BoxId>,
    ) -> Result<()> {
        self.ensure_not_in_layout()?;
        let parent_kind = &self.node(parent)?.kind;
        if !parent_kind.can_have_children() {
            return Err(LayoutError::InvalidScene(format!(
                "box {parent} cannot have children"
            )));
        }
        let _ = self.node(child)?;
        if child == BoxId::VIEW {
            return Err(LayoutError::InvalidScene(
                "the view cannot be a child".to_owned(),
            ));
        }
        if child == parent || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(LayoutError::CycleDetected(child));
        }
        if let Some(before) = before.filter(|&before| self.parent(before) != Some(parent)) {
            return Err(LayoutError::InvalidScene(format!(
                "box {before} is not a child of {parent}"
            )));
        }

        self.detach(child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        let index = before
            .and_then(|before| siblings.iter().position(|&sibling| sibling == before))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.mark_needs_layout(parent)?;
        Ok(())
    }

    /// Remove `id` (and its subtree) from its parent. The boxes stay alive.
    ///
    /// # Errors
    /// [`LayoutError::UnknownBox`] for a dead id.
    pub fn detach(&mut self, id: BoxId) -> Result<()> {
        self.ensure_not_in_layout()?;
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&child| child != id);
        self.node_mut(id)?.parent = None;
        self.mark_needs_layout(parent)
    }

    /// Detach and free `id` and every descendant.
    ///
    /// Returns the destroyed ids so that side tables keyed by them can be
    /// purged.
    ///
    /// # Errors
    /// [`LayoutError::UnknownBox`] for a dead id,
    /// [`LayoutError::InvalidScene`] for the view.
    pub fn destroy_subtree(&mut self, id: BoxId) -> Result<Vec<BoxId>> {
        if id == BoxId::VIEW {
            return Err(LayoutError::InvalidScene(
                "the view cannot be destroyed".to_owned(),
            ));
        }
        self.detach(id)?;
        let destroyed = self.descendants(id);
        for &dead in &destroyed {
            if let Some(slot) = self.nodes.get_mut(dead.index()) {
                *slot = None;
            }
        }
        tracing::debug!(root = %id, count = destroyed.len(), "destroyed subtree");
        Ok(destroyed)
    }

    /// The parent, if attached.
    #[must_use]
    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.node(id).ok()?.parent
    }

    /// The children in order. Empty for an unknown id.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    fn sibling(&self, id: BoxId, step: isize) -> Option<BoxId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&sibling| sibling == id)?;
        siblings.get(index.checked_add_signed(step)?).copied()
    }

    /// The following sibling.
    #[must_use]
    pub fn next_sibling(&self, id: BoxId) -> Option<BoxId> {
        self.sibling(id, 1)
    }

    /// The preceding sibling.
    #[must_use]
    pub fn previous_sibling(&self, id: BoxId) -> Option<BoxId> {
        self.sibling(id, -1)
    }

    /// Proper ancestors, nearest first.
    pub fn ancestors(&self, id: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        iter::successors(self.parent(id), |&ancestor| self.parent(ancestor))
    }

    /// `id` and every box below it, in tree order.
    #[must_use]
    pub fn descendants(&self, id: BoxId) -> Vec<BoxId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !self.contains(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// The box kind.
    #[must_use]
    pub fn kind(&self, id: BoxId) -> Option<&BoxKind> {
        self.node(id).ok().map(|node| &node.kind)
    }

    /// The style.
    #[must_use]
    pub fn style(&self, id: BoxId) -> Option<&BoxStyle> {
        self.node(id).ok().map(|node| &node.style)
    }

    /// Mutable style access. Marks the box for layout and drops the
    /// preferred widths cached on it and its ancestors.
    ///
    /// # Errors
    /// [`LayoutError::UnknownBox`] for a dead id.
    pub fn style_mut(&mut self, id: BoxId) -> Result<&mut BoxStyle> {
        self.ensure_not_in_layout()?;
        self.mark_needs_layout(id)?;
        Ok(&mut self.node_mut(id)?.style)
    }

    /// Whether the min/max preferred widths of `id` are memoized.
    #[must_use]
    pub fn has_preferred_widths(&self, id: BoxId) -> bool {
        self.node(id)
            .is_ok_and(|node| node.preferred_widths.is_some())
    }

    /// The layout phase.
    #[must_use]
    pub fn phase(&self, id: BoxId) -> Option<LayoutPhase> {
        self.node(id).ok().map(|node| node.phase)
    }

    /// The geometry of the last layout.
    #[must_use]
    pub fn geometry(&self, id: BoxId) -> Option<&BoxGeometry> {
        self.node(id).ok().map(|node| &node.geometry)
    }

    /// The placed characters of an SVG text box, fragments relative to its
    /// frame.
    #[must_use]
    pub fn svg_text_layout(&self, id: BoxId) -> Option<&SvgTextLayout> {
        self.node(id).ok()?.svg_text_layout.as_ref()
    }

    /// The static position recorded for an out-of-flow box.
    #[must_use]
    pub fn static_position(&self, id: BoxId) -> Option<StaticPosition> {
        self.node(id).ok().map(|node| node.static_position)
    }

    /// The overflow record, if the box overflows at all.
    #[must_use]
    pub fn overflow(&self, id: BoxId) -> Option<&OverflowRecord> {
        self.node(id).ok()?.overflow.as_ref()
    }

    /// Mark `id` and its ancestors as needing layout and drop their cached
    /// preferred widths.
    ///
    /// # Errors
    /// [`LayoutError::UnknownBox`] for a dead id.
    pub fn mark_needs_layout(&mut self, id: BoxId) -> Result<()> {
        let mut current = Some(id);
        while let Some(next) = current {
            let node = self.node_mut(next)?;
            node.phase = LayoutPhase::NeedsLayout;
            node.preferred_widths = None;
            node.laid_out_for = None;
            current = node.parent;
        }
        Ok(())
    }

    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// Recomputed on every call:
    /// - "For other elements, if the element's position is 'relative' or
    ///   'static', the containing block is formed by the content edge of the
    ///   nearest ancestor box that is a block container."
    /// - "If the element has 'position: fixed', the containing block is
    ///   established by the viewport." A transformed ancestor also
    ///   establishes one.
    /// - "If the element has 'position: absolute', the containing block is
    ///   established by the nearest ancestor with a 'position' of
    ///   'absolute', 'relative' or 'fixed'." A transformed ancestor also
    ///   establishes one.
    ///
    /// `None` for the view and for detached boxes.
    #[must_use]
    pub fn containing_block(&self, id: BoxId) -> Option<BoxId> {
        let style = self.style(id)?;
        let parent = self.parent(id)?;
        match style.position {
            Position::Static | Position::Relative => Some(parent),
            Position::Absolute => self.nearest_ancestor_including(parent, |node| {
                node.style.position.is_positioned() || node.style.has_transform()
            }),
            Position::Fixed => {
                self.nearest_ancestor_including(parent, |node| node.style.has_transform())
            }
        }
    }

    /// The first of `start` and its ancestors that matches `predicate` or
    /// is the view.
    fn nearest_ancestor_including(
        &self,
        start: BoxId,
        predicate: impl Fn(&BoxNode) -> bool,
    ) -> Option<BoxId> {
        iter::once(start)
            .chain(self.ancestors(start))
            .find(|&candidate| {
                self.node(candidate)
                    .is_ok_and(|node| node.kind.is_view() || predicate(node))
            })
    }

    /// Whether `id` is attached (directly or transitively) to the view.
    #[must_use]
    pub fn is_attached(&self, id: BoxId) -> bool {
        id == BoxId::VIEW || self.ancestors(id).any(|ancestor| ancestor == BoxId::VIEW)
    }
}
