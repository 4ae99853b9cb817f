//! Initialize a new sociogram project.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;

pub fn run(path: Option<String>) -> Result<()> {
    let dir = path.unwrap_or_else(|| ".".to_string());
    let dir = Path::new(&dir);
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }

    let config_path = dir.join("sociogram.toml");
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    std::fs::write(&config_path, Config::default_toml())?;

    println!(
        "{} Wrote {}",
        "✓".green().bold(),
        config_path.display().to_string().cyan()
    );
    println!("  Edit the [engine.weights] table to tune the heuristics.");
    Ok(())
}
