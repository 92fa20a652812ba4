use crate::constants;
use crate::models::settings::Settings;
use crate::util::fs as vault_fs;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read settings {}", path.display()))?;
    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("parse settings {}", path.display()))?;
    Ok(settings)
}

pub fn save(path: &Path, settings: &Settings) -> Result<()> {
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    vault_fs::write_atomic(path, content.as_bytes(), constants::PRIVATE_FILE_MODE)
}

/// Write the defaults so the owner has a file to edit. Leaves an existing file alone.
pub fn ensure_defaults(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    save(path, &Settings::default())
}
