//! Settings file model (`config.toml`).

use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Fallback API token offered by setup. Never compiled into the binary.
    #[serde(default)]
    pub default_api_token: Option<String>,

    /// Environment-file destination.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Provider API base used by the identity verifier.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_api_token: None,
            env_file: default_env_file(),
            api_base: default_api_base(),
        }
    }
}

fn default_env_file() -> PathBuf {
    PathBuf::from(constants::DEFAULT_ENV_FILE)
}

fn default_api_base() -> String {
    constants::DEFAULT_API_BASE.to_string()
}
