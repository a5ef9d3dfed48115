use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$BOLSILLO_HOME`, or `~/.bolsillo`.
pub fn bolsillo_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BOLSILLO_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".bolsillo"))
}

pub fn ensure_bolsillo_home() -> Result<PathBuf> {
    let dir = bolsillo_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
