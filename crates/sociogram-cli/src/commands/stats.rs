//! Show persisted graph statistics per channel.

use anyhow::Result;
use colored::Colorize;
use sociogram::prelude::*;
use std::path::PathBuf;

use crate::config::Config;

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let output_dir = &config.engine.output_dir;

    if !output_dir.exists() {
        println!(
            "{} No output directory at {} yet — run a replay first.",
            "→".blue(),
            output_dir.display()
        );
        return Ok(());
    }

    let mut restore_files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(output_dir)? {
        let dir = entry?.path();
        if !dir.is_dir() {
            continue;
        }
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            let is_restore = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with("-restore.json"));
            if is_restore {
                restore_files.push(path);
            }
        }
    }
    restore_files.sort();

    if restore_files.is_empty() {
        println!("{} No persisted graphs found.", "→".blue());
        return Ok(());
    }

    for path in restore_files {
        match load_state(&path) {
            Ok(state) => {
                println!(
                    "{}: {} nodes and {} edges",
                    state.channel.cyan(),
                    state.nodes.len().to_string().green(),
                    state.edges.len().to_string().green()
                );
            }
            Err(err) if err.is_restore_fallback() => {
                println!(
                    "{}: {} ({})",
                    path.display().to_string().cyan(),
                    "unusable".yellow(),
                    err
                );
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
