//! `KEY=VALUE` environment file, merged line by line on save.

use crate::core::error::{StoreError, StoreResult};
use crate::models::credential_set::CredentialSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Key of an assignment line: the text before the first `=`, trimmed.
/// Lines without `=` have no key.
pub fn line_key(line: &str) -> Option<&str> {
    line.split_once('=').map(|(key, _)| key.trim())
}

/// Lines of `content` without their `\n` terminator. A `\r` before the
/// terminator stays with the line so CRLF files are written back unchanged.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let body = content.strip_suffix('\n').unwrap_or(content);
    body.split('\n').take(if content.is_empty() { 0 } else { usize::MAX })
}

/// Drop existing assignments for every incoming key, then append the incoming
/// values. Unrelated lines keep their order and text.
pub fn merge_lines(existing: &str, credentials: &CredentialSet) -> Vec<String> {
    let mut lines: Vec<String> = split_lines(existing)
        .filter(|line| match line_key(line) {
            Some(key) => !credentials.contains_key(key),
            None => true,
        })
        .map(str::to_string)
        .collect();
    lines.extend(credentials.iter().map(|(k, v)| format!("{}={}", k, v)));
    lines
}

/// Parse assignments, skipping blank lines and `#` comments. Values are
/// literal: everything after the first `=` up to the line ending.
pub fn parse(content: &str) -> CredentialSet {
    let mut set = CredentialSet::new();
    for line in split_lines(content) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            set.insert(key, value);
        }
    }
    set
}

pub fn load(path: &Path) -> StoreResult<Option<CredentialSet>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let set = parse(&content);
            debug!(path = %path.display(), keys = set.len(), "loaded env file");
            Ok(Some(set))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io("read env file", path, e)),
    }
}

pub fn save(path: &Path, credentials: &CredentialSet) -> StoreResult<()> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(StoreError::io("read env file", path, e)),
    };
    let mut content = String::new();
    for line in merge_lines(&existing, credentials) {
        content.push_str(&line);
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| StoreError::io("write env file", path, e))?;
    debug!(path = %path.display(), keys = credentials.len(), "saved env file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set(pairs: &[(&str, &str)]) -> CredentialSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_second_save_replaces_not_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        save(&path, &set(&[("A", "1")])).unwrap();
        save(&path, &set(&[("A", "2"), ("B", "3")])).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.iter().filter(|l| l.starts_with("A=")).count(), 1);
        assert!(lines.contains(&"A=2"));
        assert!(lines.contains(&"B=3"));
        assert_eq!(lines.len(), 2);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_unrelated_lines_preserved() {
        let existing = "# app settings\nPORT=8080\nCLOUDFLARE_API_TOKEN=old\n\nDEBUG=true\n";
        let merged = merge_lines(existing, &set(&[("CLOUDFLARE_API_TOKEN", "new")]));
        assert_eq!(
            merged,
            vec![
                "# app settings",
                "PORT=8080",
                "",
                "DEBUG=true",
                "CLOUDFLARE_API_TOKEN=new",
            ]
        );
    }

    #[test]
    fn test_prefix_keys_not_removed() {
        let existing = "TOKEN_EXTRA=keep\nTOKEN=old\n";
        let merged = merge_lines(existing, &set(&[("TOKEN", "new")]));
        assert_eq!(merged, vec!["TOKEN_EXTRA=keep", "TOKEN=new"]);
    }

    #[test]
    fn test_spaced_key_matches() {
        let merged = merge_lines("A = 1\n", &set(&[("A", "2")]));
        assert_eq!(merged, vec!["A=2"]);
    }

    #[test]
    fn test_value_with_equals_sign() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        save(&path, &set(&[("URL", "https://x?a=b")])).unwrap();
        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded.get("URL"), Some("https://x?a=b"));
    }

    #[test]
    fn test_parse_skips_comments_and_keeps_values_literal() {
        let parsed = parse("# c\n\nA=\"quoted\"\nB= padded \nC=plain\nnot an assignment\n");
        assert_eq!(parsed.get("A"), Some("\"quoted\""));
        assert_eq!(parsed.get("B"), Some(" padded "));
        assert_eq!(parsed.get("C"), Some("plain"));
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_padded_and_quoted_values_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        let original = set(&[
            ("CLOUDFLARE_ACCOUNT_ID", " acc "),
            ("CUSTOM_DOMAIN", "'example.com'"),
        ]);
        save(&path, &original).unwrap();
        assert_eq!(load(&path).unwrap().unwrap(), original);
    }

    #[test]
    fn test_crlf_lines_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "PORT=8080\r\nA=old\r\n").unwrap();
        save(&path, &set(&[("A", "new")])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "PORT=8080\r\nA=new\n");
        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded.get("PORT"), Some("8080"));
    }

    #[test]
    fn test_split_lines_edges() {
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\n").collect::<Vec<_>>(), vec![""]);
        assert_eq!(split_lines("A=1").collect::<Vec<_>>(), vec!["A=1"]);
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join(".env")).unwrap().is_none());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = save(&dir.path().join("missing/.env"), &set(&[("A", "1")])).unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }
}
