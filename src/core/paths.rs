//! Config directory resolution and file layout.

use crate::constants;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StorePaths {
    pub config_dir: PathBuf,
    pub credentials_json: PathBuf,
    pub settings_toml: PathBuf,
}

impl StorePaths {
    /// Resolve from CLI arg, env var, or `$HOME/.cloudflare`.
    pub fn resolve(dir_arg: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = dir_arg {
            return Ok(Self::from_dir(dir));
        }
        if let Ok(dir) = env::var("TOKENSHELF_CONFIG_DIR") {
            if !dir.is_empty() {
                return Ok(Self::from_dir(PathBuf::from(dir)));
            }
        }
        let home = env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .context("cannot locate home directory (set HOME or --config-dir)")?;
        Ok(Self::from_dir(
            PathBuf::from(home).join(constants::DEFAULT_CONFIG_DIR_NAME),
        ))
    }

    pub fn from_dir(config_dir: PathBuf) -> Self {
        let credentials_json = config_dir.join(constants::CREDENTIALS_FILE);
        let settings_toml = config_dir.join(constants::SETTINGS_FILE);
        Self {
            config_dir,
            credentials_json,
            settings_toml,
        }
    }
}

impl std::fmt::Display for StorePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store@{}", self.config_dir.display())
    }
}
