//! JSON scene files.
//!
//! A scene is a layout configuration plus a nested box description rooted
//! at the view:
//!
//! ```json
//! {
//!   "config": { "viewport": { "width": 800, "height": 600 } },
//!   "root": {
//!     "kind": "view",
//!     "children": [
//!       { "name": "header", "kind": "block", "style": { "height": { "fixed": 40 } } }
//!     ]
//!   }
//! }
//! ```

use serde::Deserialize;
use wallaby_layout::{BoxId, BoxKind, BoxStyle, BoxTree, LayoutConfig, LayoutError, Result};

/// A parsed scene file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scene {
    /// Configuration for the layout pass.
    pub config: LayoutConfig,
    /// The view and everything under it.
    pub root: SceneBox,
}

/// One box of a scene and its children.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneBox {
    /// Label shown in the output.
    #[serde(default)]
    pub name: Option<String>,
    /// The box kind, with any kind-specific data.
    pub kind: BoxKind,
    /// The box's style.
    #[serde(default)]
    pub style: BoxStyle,
    /// Children in order.
    #[serde(default)]
    pub children: Vec<SceneBox>,
}

impl Default for SceneBox {
    fn default() -> Self {
        Self {
            name: None,
            kind: BoxKind::View,
            style: BoxStyle::default(),
            children: Vec::new(),
        }
    }
}

/// A box tree built from a [`Scene`], with the scene's labels.
#[derive(Debug)]
pub struct BuiltScene {
    /// The tree.
    pub tree: BoxTree,
    /// `(id, name)` for every named box, in document order.
    pub names: Vec<(BoxId, String)>,
}

impl BuiltScene {
    /// The label given to `id` in the scene, if any.
    #[must_use]
    pub fn name_of(&self, id: BoxId) -> Option<&str> {
        self.names
            .iter()
            .find(|(named, _)| *named == id)
            .map(|(_, name)| name.as_str())
    }
}

/// Parse a scene from JSON text.
///
/// # Errors
/// Returns the `serde_json` error for malformed input.
pub fn parse_scene(json: &str) -> serde_json::Result<Scene> {
    serde_json::from_str(json)
}

impl Scene {
    /// Build the box tree the scene describes.
    ///
    /// # Errors
    /// [`LayoutError::InvalidScene`] if the root is not a view, a nested
    /// box is a view, or a box that cannot have children is given some.
    pub fn build(&self) -> Result<BuiltScene> {
        if !self.root.kind.is_view() {
            return Err(LayoutError::InvalidScene(
                "the scene root must be a view".to_owned(),
            ));
        }

        let mut built = BuiltScene {
            tree: BoxTree::new(),
            names: Vec::new(),
        };
        *built.tree.style_mut(BoxId::VIEW)? = self.root.style.clone();
        if let Some(name) = &self.root.name {
            built.names.push((BoxId::VIEW, name.clone()));
        }

        // Depth-first so ids follow document order.
        let mut stack: Vec<(BoxId, &SceneBox)> = self
            .root
            .children
            .iter()
            .rev()
            .map(|child| (BoxId::VIEW, child))
            .collect();
        while let Some((parent, scene_box)) = stack.pop() {
            if scene_box.kind.is_view() {
                return Err(LayoutError::InvalidScene(
                    "only the scene root may be a view".to_owned(),
                ));
            }
            let id = built
                .tree
                .create_box(scene_box.kind.clone(), scene_box.style.clone());
            built.tree.append_child(parent, id)?;
            if let Some(name) = &scene_box.name {
                built.names.push((id, name.clone()));
            }
            stack.extend(scene_box.children.iter().rev().map(|child| (id, child)));
        }

        tracing::debug!(boxes = built.tree.len(), "built scene");
        Ok(built)
    }
}
