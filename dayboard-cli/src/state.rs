use anyhow::{Context, Result};
use dayboard_core::FileStore;
use std::fs;
use std::path::PathBuf;

/// Data directory: `$DAYBOARD_HOME`, else `~/.dayboard`.
pub fn dayboard_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("DAYBOARD_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set (or set DAYBOARD_HOME)")?;
    Ok(PathBuf::from(home).join(".dayboard"))
}

pub fn ensure_dayboard_home() -> Result<PathBuf> {
    let dir = dayboard_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Key-value store holding tasks, reminders and timer minutes.
pub fn open_store() -> Result<FileStore> {
    let dir = ensure_dayboard_home()?.join("data");
    FileStore::open(&dir).with_context(|| format!("open store at {}", dir.display()))
}
