//! Per-pass layout state.
//!
//! Everything a layout pass needs beyond the tree itself is threaded
//! through a [`LayoutContext`]: the configuration, the override side table
//! that flex containers use to force their items' sizes, the glyph metrics
//! used by SVG text, and the diagnostics collected while recovering from
//! invariant violations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wallaby_common::warning::warn_once;
use wallaby_geometry::Size;

use crate::error::LayoutError;
use crate::style::Length;
use crate::svg_text::GlyphMetrics;
use crate::tree::BoxId;

/// Layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// The viewport: the size of the initial containing block.
    pub viewport: Size,
    /// Device pixels per CSS pixel, used to snap border shapes.
    pub device_scale_factor: f32,
    /// Turn recovered invariant violations into a returned error instead of
    /// a report entry.
    pub strict_invariants: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            device_scale_factor: 1.0,
            strict_invariants: false,
        }
    }
}

/// Sizes forced onto boxes by their flex container, keyed by box id.
///
/// Entries are written by the container immediately before it lays out an
/// item and cleared right after. Destroyed boxes must be purged with
/// [`purge`](Self::purge).
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    border_box_logical_width: HashMap<BoxId, f32>,
    border_box_logical_height: HashMap<BoxId, f32>,
    flex_basis_logical_width: HashMap<BoxId, Length>,
    flex_basis_logical_height: HashMap<BoxId, Length>,
}

impl OverrideTable {
    /// The overriding border-box inline size.
    #[must_use]
    pub fn border_box_logical_width(&self, id: BoxId) -> Option<f32> {
        self.border_box_logical_width.get(&id).copied()
    }

    /// The overriding border-box block size.
    #[must_use]
    pub fn border_box_logical_height(&self, id: BoxId) -> Option<f32> {
        self.border_box_logical_height.get(&id).copied()
    }

    /// A flex-basis length standing in for the style's inline size.
    #[must_use]
    pub fn flex_basis_logical_width(&self, id: BoxId) -> Option<Length> {
        self.flex_basis_logical_width.get(&id).copied()
    }

    /// A flex-basis length standing in for the style's block size.
    #[must_use]
    pub fn flex_basis_logical_height(&self, id: BoxId) -> Option<Length> {
        self.flex_basis_logical_height.get(&id).copied()
    }

    /// Force the border-box inline size of `id`.
    pub fn set_border_box_logical_width(&mut self, id: BoxId, width: f32) {
        let _ = self.border_box_logical_width.insert(id, width);
    }

    /// Force the border-box block size of `id`.
    pub fn set_border_box_logical_height(&mut self, id: BoxId, height: f32) {
        let _ = self.border_box_logical_height.insert(id, height);
    }

    /// Substitute a flex-basis length for the inline size of `id`.
    pub fn set_flex_basis_logical_width(&mut self, id: BoxId, basis: Length) {
        let _ = self.flex_basis_logical_width.insert(id, basis);
    }

    /// Substitute a flex-basis length for the block size of `id`.
    pub fn set_flex_basis_logical_height(&mut self, id: BoxId, basis: Length) {
        let _ = self.flex_basis_logical_height.insert(id, basis);
    }

    /// Drop every entry for `id`.
    pub fn clear(&mut self, id: BoxId) {
        let _ = self.border_box_logical_width.remove(&id);
        let _ = self.border_box_logical_height.remove(&id);
        let _ = self.flex_basis_logical_width.remove(&id);
        let _ = self.flex_basis_logical_height.remove(&id);
    }

    /// Drop every entry for each of `ids`.
    pub fn purge(&mut self, ids: &[BoxId]) {
        for &id in ids {
            self.clear(id);
        }
    }

    /// Whether `id` has any entry.
    #[must_use]
    pub fn has_entry(&self, id: BoxId) -> bool {
        self.border_box_logical_width.contains_key(&id)
            || self.border_box_logical_height.contains_key(&id)
            || self.flex_basis_logical_width.contains_key(&id)
            || self.flex_basis_logical_height.contains_key(&id)
    }

    /// Whether the table holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.border_box_logical_width.is_empty()
            && self.border_box_logical_height.is_empty()
            && self.flex_basis_logical_width.is_empty()
            && self.flex_basis_logical_height.is_empty()
    }
}

/// State threaded through one layout pass.
pub struct LayoutContext<'a> {
    /// The pass configuration.
    pub config: &'a LayoutConfig,
    /// Flex override side table.
    pub overrides: &'a mut OverrideTable,
    /// Glyph advances for SVG text.
    pub glyph_metrics: &'a dyn GlyphMetrics,
    /// Invariant violations recovered from so far.
    pub diagnostics: Vec<LayoutError>,
    /// Current walk depth.
    pub depth: usize,
    /// Boxes laid out so far.
    pub boxes_laid_out: usize,
}

impl<'a> LayoutContext<'a> {
    /// A fresh context for one pass.
    pub fn new(
        config: &'a LayoutConfig,
        overrides: &'a mut OverrideTable,
        glyph_metrics: &'a dyn GlyphMetrics,
    ) -> Self {
        Self {
            config,
            overrides,
            glyph_metrics,
            diagnostics: Vec::new(),
            depth: 0,
            boxes_laid_out: 0,
        }
    }

    /// The viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.config.viewport
    }

    /// Record a recovered invariant violation.
    ///
    /// The same error is recorded once per pass.
    pub fn record(&mut self, error: LayoutError) {
        if self.diagnostics.contains(&error) {
            return;
        }
        warn_once("Layout", &error.to_string());
        self.diagnostics.push(error);
    }
}
