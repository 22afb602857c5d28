use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$SMSTRACK_HOME`, or `~/.smstrack`
pub fn smstrack_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SMSTRACK_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".smstrack"))
}

pub fn ensure_smstrack_home() -> Result<PathBuf> {
    let dir = smstrack_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
