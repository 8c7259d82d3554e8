//! JSON credentials file: a flat object of string keys to string values.

use crate::constants;
use crate::core::error::{StoreError, StoreResult};
use crate::models::credential_set::CredentialSet;
use crate::util::fs as store_fs;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Load the file at `path`. A missing file is `Ok(None)`.
pub fn load(path: &Path) -> StoreResult<Option<CredentialSet>> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "credentials file not found");
            return Ok(None);
        }
        Err(e) => return Err(StoreError::io("read credentials", path, e)),
    };
    let set: CredentialSet =
        serde_json::from_slice(&content).map_err(|source| StoreError::MalformedStore {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), keys = set.len(), "loaded credentials file");
    Ok(Some(set))
}

/// Replace the file at `path` with `credentials` and restrict it to the owner.
pub fn save(path: &Path, credentials: &CredentialSet) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        store_fs::ensure_dir(parent, constants::CONFIG_DIR_MODE)
            .map_err(|e| StoreError::io("create directory", parent, e))?;
    }
    let content = serde_json::to_string_pretty(credentials).map_err(StoreError::Serialize)?;
    store_fs::write_with_mode(path, content.as_bytes(), constants::CREDENTIALS_FILE_MODE)
        .map_err(|e| StoreError::io("write credentials", path, e))?;
    // An existing file keeps its old mode through open(2); tighten it explicitly.
    store_fs::set_permissions(path, constants::CREDENTIALS_FILE_MODE)
        .map_err(|e| StoreError::io("set permissions on", path, e))?;
    debug!(path = %path.display(), keys = credentials.len(), "saved credentials file");
    Ok(())
}

/// Remove the file. Returns whether it existed.
pub fn delete(path: &Path) -> StoreResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::io("remove", path, e)),
    }
}
