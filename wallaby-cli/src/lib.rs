//! Scene loading and output for the `wallaby` command.
//!
//! The binary reads a JSON [`Scene`](scene::Scene), builds its box tree,
//! runs one layout pass and prints a [`SceneReport`](report::SceneReport).

pub mod report;
pub mod scene;
