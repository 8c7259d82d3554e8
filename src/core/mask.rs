//! Display-only redaction of secret values.

use crate::constants::{MASK_CHAR, MASK_VISIBLE_PREFIX, MASK_VISIBLE_SUFFIX};
use crate::models::credential_set::{is_secret_key, CredentialSet};

/// Mask a secret, keeping the first 8 and last 4 characters when the value
/// is longer than 12 characters. Shorter values are masked entirely.
/// Output length (in characters) always equals input length.
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let visible = MASK_VISIBLE_PREFIX + MASK_VISIBLE_SUFFIX;
    if chars.len() <= visible {
        return std::iter::repeat(MASK_CHAR).take(chars.len()).collect();
    }
    let hidden = chars.len() - visible;
    let mut out = String::with_capacity(value.len());
    out.extend(&chars[..MASK_VISIBLE_PREFIX]);
    out.extend(std::iter::repeat(MASK_CHAR).take(hidden));
    out.extend(&chars[chars.len() - MASK_VISIBLE_SUFFIX..]);
    out
}

/// Value as it should be shown for `key`.
pub fn display_value(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        mask(value)
    } else {
        value.to_string()
    }
}

/// `KEY: value` lines with token-like keys masked.
pub fn display_lines(credentials: &CredentialSet) -> Vec<String> {
    credentials
        .iter()
        .map(|(k, v)| format!("{}: {}", k, display_value(k, v)))
        .collect()
}
