use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Create `path` (and parents) if missing. `mode` is applied only to a newly
/// created directory; existing directories keep their permissions.
pub fn ensure_dir(path: &Path, mode: u32) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)?;
    set_permissions(path, mode)
}

pub fn set_permissions(path: &Path, mode: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(mode);
        fs::set_permissions(path, perm)?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}

/// Truncate and write `contents` to `path`, creating it with `mode` when new.
pub fn write_with_mode(path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;
    let mut file = opts.open(path)?;
    file.write_all(contents)?;
    file.flush()
}

/// Permission bits of `path`, or `None` on platforms without them.
pub fn mode_of(path: &Path) -> io::Result<Option<u32>> {
    let meta = fs::metadata(path)?;
    #[cfg(unix)]
    {
        Ok(Some(meta.permissions().mode() & 0o777))
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_with_mode() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a/b");
        ensure_dir(&target, 0o700).unwrap();
        assert!(target.is_dir());
        #[cfg(unix)]
        assert_eq!(mode_of(&target).unwrap(), Some(0o700));
    }

    #[test]
    fn test_ensure_dir_leaves_existing_mode() {
        let dir = TempDir::new().unwrap();
        set_permissions(dir.path(), 0o755).unwrap();
        ensure_dir(dir.path(), 0o700).unwrap();
        #[cfg(unix)]
        assert_eq!(mode_of(dir.path()).unwrap(), Some(0o755));
    }

    #[test]
    fn test_write_with_mode_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f");
        write_with_mode(&path, b"longer content", 0o600).unwrap();
        write_with_mode(&path, b"short", 0o600).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
        #[cfg(unix)]
        assert_eq!(mode_of(&path).unwrap(), Some(0o600));
    }
}
