//! Loading of the optional `config.toml` settings file.

use crate::models::settings::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Load `config.toml`; a missing file yields defaults.
pub fn load(path: &Path) -> Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("read settings {}", path.display()));
        }
    };
    let settings: Settings =
        toml::from_str(&content).with_context(|| format!("parse settings {}", path.display()))?;
    Ok(settings)
}
