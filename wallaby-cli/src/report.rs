//! Output of a laid-out scene, as an indented tree or as JSON.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde::Serialize;
use wallaby_geometry::Rect;
use wallaby_layout::{BoxId, BoxKind, LayoutReport, ResolvedGeometry, Result, resolved_geometries};

use crate::scene::BuiltScene;

/// Everything the CLI prints about one layout pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneReport {
    /// Boxes the pass actually laid out.
    pub boxes_laid_out: usize,
    /// Recovered invariant violations, as messages.
    pub diagnostics: Vec<String>,
    /// Every box of the tree in pre-order.
    pub boxes: Vec<BoxEntry>,
}

/// One box of the report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BoxEntry {
    /// The scene label, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The box kind.
    pub kind: &'static str,
    /// Nesting depth below the view.
    #[serde(skip)]
    pub depth: usize,
    /// The border box in the box's own space.
    #[serde(skip)]
    pub local_border_box: Rect,
    /// The resolved geometry.
    #[serde(flatten)]
    pub geometry: ResolvedGeometry,
}

/// Short kebab-case name of a box kind.
#[must_use]
pub const fn kind_label(kind: &BoxKind) -> &'static str {
    match kind {
        BoxKind::View => "view",
        BoxKind::Block => "block",
        BoxKind::InlineBlock => "inline-block",
        BoxKind::Replaced(_) => "replaced",
        BoxKind::FlexContainer => "flex-container",
        BoxKind::Text(_) => "text",
        BoxKind::SvgText(_) => "svg-text",
        BoxKind::FragmentedFlow => "fragmented-flow",
    }
}

/// Collect the report for a scene that has been laid out.
///
/// # Errors
/// [`LayoutError::UnknownBox`](wallaby_layout::LayoutError::UnknownBox) if
/// the tree lost its view.
pub fn scene_report(scene: &BuiltScene, layout: &LayoutReport) -> Result<SceneReport> {
    let tree = &scene.tree;
    let boxes = resolved_geometries(tree, BoxId::VIEW)?
        .into_iter()
        .map(|geometry| BoxEntry {
            name: scene.name_of(geometry.id).map(str::to_owned),
            kind: tree.kind(geometry.id).map_or("unknown", kind_label),
            depth: tree.ancestors(geometry.id).count(),
            local_border_box: tree
                .geometry(geometry.id)
                .map_or(Rect::ZERO, |local| local.border_box_rect()),
            geometry,
        })
        .collect();

    Ok(SceneReport {
        boxes_laid_out: layout.boxes_laid_out,
        diagnostics: layout.diagnostics.iter().map(ToString::to_string).collect(),
        boxes,
    })
}

fn format_rect(rect: Rect) -> String {
    format!("({}, {}) {}x{}", rect.x, rect.y, rect.width, rect.height)
}

/// Render the report as an indented tree, one box per line.
///
/// Overflow is only listed for boxes that have some.
#[must_use]
pub fn render_text(report: &SceneReport, color: bool) -> String {
    let mut out = String::new();
    for entry in &report.boxes {
        let indent = "  ".repeat(entry.depth);
        let geometry = &entry.geometry;
        let name = entry
            .name
            .as_deref()
            .map_or_else(String::new, |name| format!(" \"{name}\""));
        let rect = format_rect(geometry.border_box);

        if color {
            let _ = writeln!(
                out,
                "{indent}{}{} {} {}",
                entry.kind.cyan(),
                name.bold(),
                geometry.id.dimmed(),
                rect.green()
            );
        } else {
            let _ = writeln!(out, "{indent}{}{name} {} {rect}", entry.kind, geometry.id);
        }

        let overflows = geometry.layout_overflow != geometry.padding_box
            || geometry.visual_overflow != entry.local_border_box;
        if overflows {
            let line = format!(
                "overflow: layout {} visual {}",
                format_rect(geometry.layout_overflow),
                format_rect(geometry.visual_overflow)
            );
            if color {
                let _ = writeln!(out, "{indent}  {}", line.magenta());
            } else {
                let _ = writeln!(out, "{indent}  {line}");
            }
        }
    }

    for diagnostic in &report.diagnostics {
        if color {
            let _ = writeln!(out, "{} {diagnostic}", "warning:".yellow().bold());
        } else {
            let _ = writeln!(out, "warning: {diagnostic}");
        }
    }
    out
}
