//! Init command: write a starter config file

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use reviewdeck_core::config::Config;

pub fn run(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => Config::path()?,
    };
    write_default(&path, force)?;

    println!(
        "{} Saved configuration to {}",
        "Done!".green().bold(),
        path.display().to_string().cyan()
    );
    println!(
        "  Set {} and/or {} before running {}.",
        "OPENAI_API_KEY".bold(),
        "GEMINI_API_KEY".bold(),
        "reviewdeck serve".cyan()
    );
    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists at {}. Use --force to overwrite it.",
            path.display()
        );
    }
    Config::default()
        .save_to(path)
        .with_context(|| format!("failed to write config to {}", path.display()))
}
