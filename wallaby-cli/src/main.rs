//! Wallaby CLI
//!
//! Lays out a JSON scene and prints the resolved geometry of every box.

use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use wallaby_common::logging::{LogConfig, LogFormat, init_logging};
use wallaby_common::warning::clear_warnings;
use wallaby_geometry::Size;
use wallaby_layout::{BoxId, LayoutEngine};

use wallaby_cli::report::{render_text, scene_report};
use wallaby_cli::scene::parse_scene;

#[derive(Parser)]
#[command(name = "wallaby", version)]
#[command(about = "Lay out a JSON scene and print the resolved box geometry")]
struct Cli {
    /// Scene file
    scene: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Override the viewport width
    #[arg(long)]
    width: Option<f32>,

    /// Override the viewport height
    #[arg(long)]
    height: Option<f32>,

    /// Fail on the first recovered invariant violation
    #[arg(long)]
    strict: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Log format (pretty, compact, json)
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,

    /// Custom log filter, e.g. `wallaby_layout=trace`
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig {
        level: cli.log_level,
        ..LogConfig::default()
    }
    .with_format(cli.log_format);
    if let Some(filter) = &cli.log_filter {
        log_config = log_config.with_filter(filter);
    }
    init_logging(&log_config).context("failed to install the log subscriber")?;

    let json = fs::read_to_string(&cli.scene)
        .with_context(|| format!("failed to read {}", cli.scene.display()))?;
    let mut scene =
        parse_scene(&json).with_context(|| format!("failed to parse {}", cli.scene.display()))?;

    let viewport = scene.config.viewport;
    scene.config.viewport = Size::new(
        cli.width.unwrap_or(viewport.width),
        cli.height.unwrap_or(viewport.height),
    );
    scene.config.strict_invariants |= cli.strict;

    clear_warnings();
    let mut built = scene.build().context("invalid scene")?;
    let mut engine = LayoutEngine::new(scene.config.clone());
    let layout = engine
        .layout(&mut built.tree, BoxId::VIEW)
        .context("layout failed")?;
    let report = scene_report(&built, &layout)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report, std::io::stdout().is_terminal()));
    }
    Ok(())
}
