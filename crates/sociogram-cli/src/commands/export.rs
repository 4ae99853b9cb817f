//! Export a channel's persisted graph state as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use sociogram::engine::session::restore_path;
use sociogram::prelude::*;
use std::path::Path;

use crate::config::Config;

pub fn run(channel: &str, output: &str) -> Result<()> {
    let config = Config::load()?;

    let path = restore_path(&config.engine.output_dir, channel);
    let state = load_state(&path)
        .with_context(|| format!("No usable graph state for {channel} at {}", path.display()))?;

    let json = serde_json::to_string_pretty(&state)?;
    let output = Path::new(output);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    println!(
        "{} Exported {} ({} nodes, {} edges) to {}",
        "✓".green().bold(),
        state.channel.cyan(),
        state.nodes.len(),
        state.edges.len(),
        output.display().to_string().cyan()
    );
    Ok(())
}
