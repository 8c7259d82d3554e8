//! Error types for store operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but is not a flat JSON object of strings.
    #[error("malformed credentials file {path}: {source}")]
    MalformedStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any I/O failure while reading or writing a store file.
    #[error("{action} {path}: {source}")]
    Persistence {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialize credentials: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("no default API token configured (set default_api_token in config.toml or TOKENSHELF_DEFAULT_TOKEN)")]
    NoDefaultToken,
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Persistence {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
