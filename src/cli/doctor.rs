//! Diagnostics for file permissions and configuration.

use crate::cli::CliContext;
use crate::constants;
use crate::core::env_file;
use crate::models::credential_set::is_secret_key;
use crate::util::fs::mode_of;
use anyhow::{bail, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    Pass,
    Warn,
    Fail,
}

#[derive(Default)]
struct Tally {
    ok: u32,
    warn: u32,
    fail: u32,
}

impl Tally {
    fn record(&mut self, check: Check, message: impl AsRef<str>) {
        let label = match check {
            Check::Pass => {
                self.ok += 1;
                "PASS"
            }
            Check::Warn => {
                self.warn += 1;
                "WARN"
            }
            Check::Fail => {
                self.fail += 1;
                "FAIL"
            }
        };
        println!("  [{}] {}", label, message.as_ref());
    }
}

pub fn run(ctx: &CliContext) -> Result<()> {
    let paths = &ctx.paths;
    let mut tally = Tally::default();

    println!("Doctor: {}", paths);
    match &ctx.settings_load_warning {
        Some(w) => tally.record(Check::Fail, format!("settings unreadable: {}", w)),
        None if paths.settings_toml.is_file() => tally.record(
            Check::Pass,
            format!("settings parsed: {}", paths.settings_toml.display()),
        ),
        None => {}
    }

    if paths.config_dir.is_dir() {
        let (check, message) = dir_mode_check(&paths.config_dir);
        tally.record(check, message);
    } else {
        tally.record(
            Check::Warn,
            format!("config dir missing: {} (run setup)", paths.config_dir.display()),
        );
    }

    let creds = ctx.store.credentials_path();
    if creds.is_file() {
        let (check, message) = private_file_check(creds);
        tally.record(check, message);
        let (check, message) = owner_check(creds);
        tally.record(check, message);
    } else {
        tally.record(
            Check::Warn,
            format!("credentials file missing: {}", creds.display()),
        );
    }

    let env = ctx.store.env_file();
    if env.is_file() {
        let holds_secret = env_file::load(env)?
            .map(|set| set.keys().any(is_secret_key))
            .unwrap_or(false);
        let (check, message) = env_file_check(env, holds_secret);
        tally.record(check, message);
    }

    if ctx.store.default_token().is_some() {
        tally.record(Check::Pass, "default API token configured");
    } else {
        tally.record(Check::Warn, "no default API token (quick-setup unavailable)");
    }

    println!();
    println!(
        "Doctor summary: {} pass, {} warn, {} fail",
        tally.ok, tally.warn, tally.fail
    );
    if tally.fail > 0 {
        bail!("doctor found {} failing check(s)", tally.fail);
    }
    Ok(())
}

fn dir_mode_check(dir: &Path) -> (Check, String) {
    match mode_of(dir) {
        Ok(Some(mode)) if mode == constants::CONFIG_DIR_MODE => {
            (Check::Pass, format!("config dir mode ok: {:04o}", mode))
        }
        Ok(Some(mode)) => (
            Check::Warn,
            format!(
                "config dir mode: {:04o} (expected {:04o})",
                mode,
                constants::CONFIG_DIR_MODE
            ),
        ),
        Ok(None) => (Check::Pass, format!("config dir exists: {}", dir.display())),
        Err(e) => (Check::Warn, format!("cannot stat {}: {}", dir.display(), e)),
    }
}

fn private_file_check(path: &Path) -> (Check, String) {
    match mode_of(path) {
        Ok(Some(mode)) if mode & 0o077 == 0 => {
            (Check::Pass, format!("credentials file mode ok: {:04o}", mode))
        }
        Ok(Some(mode)) => (
            Check::Fail,
            format!(
                "credentials file readable by others: {:04o} (expected {:04o})",
                mode,
                constants::CREDENTIALS_FILE_MODE
            ),
        ),
        Ok(None) => (Check::Pass, format!("credentials file exists: {}", path.display())),
        Err(e) => (Check::Fail, format!("cannot stat {}: {}", path.display(), e)),
    }
}

fn env_file_check(path: &Path, holds_secret: bool) -> (Check, String) {
    let world_readable = matches!(mode_of(path), Ok(Some(mode)) if mode & 0o004 != 0);
    if holds_secret && world_readable {
        (
            Check::Warn,
            format!("{} holds a token and is world-readable", path.display()),
        )
    } else {
        (Check::Pass, format!("env file ok: {}", path.display()))
    }
}

#[cfg(unix)]
fn owner_check(path: &Path) -> (Check, String) {
    use std::os::unix::fs::MetadataExt;
    let me = nix::unistd::getuid();
    match std::fs::metadata(path) {
        Ok(meta) if meta.uid() == me.as_raw() => {
            (Check::Pass, "credentials file owned by current user".to_string())
        }
        Ok(meta) => (
            Check::Warn,
            format!(
                "credentials file owned by uid {} (current uid {})",
                meta.uid(),
                me
            ),
        ),
        Err(e) => (Check::Fail, format!("cannot stat {}: {}", path.display(), e)),
    }
}

#[cfg(not(unix))]
fn owner_check(_path: &Path) -> (Check, String) {
    (Check::Pass, "ownership not checked on this platform".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::fs::set_permissions;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_private_file_check() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{}").unwrap();
        set_permissions(&path, 0o600).unwrap();
        assert_eq!(private_file_check(&path).0, Check::Pass);
        set_permissions(&path, 0o644).unwrap();
        assert_eq!(private_file_check(&path).0, Check::Fail);
    }

    #[cfg(unix)]
    #[test]
    fn test_dir_mode_check() {
        let dir = TempDir::new().unwrap();
        set_permissions(dir.path(), 0o700).unwrap();
        assert_eq!(dir_mode_check(dir.path()).0, Check::Pass);
        set_permissions(dir.path(), 0o755).unwrap();
        assert_eq!(dir_mode_check(dir.path()).0, Check::Warn);
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_check_own_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f");
        std::fs::write(&path, "x").unwrap();
        assert_eq!(owner_check(&path).0, Check::Pass);
    }

    #[cfg(unix)]
    #[test]
    fn test_env_file_check_world_readable_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "CLOUDFLARE_API_TOKEN=x\n").unwrap();
        set_permissions(&path, 0o644).unwrap();
        assert_eq!(env_file_check(&path, true).0, Check::Warn);
        assert_eq!(env_file_check(&path, false).0, Check::Pass);
    }

    #[test]
    fn test_tally_counts() {
        let mut tally = Tally::default();
        tally.record(Check::Pass, "a");
        tally.record(Check::Warn, "b");
        tally.record(Check::Fail, "c");
        tally.record(Check::Fail, "d");
        assert_eq!((tally.ok, tally.warn, tally.fail), (1, 1, 2));
    }
}
