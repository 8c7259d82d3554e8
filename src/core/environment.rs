//! Credentials bound in the process environment.

use crate::models::credential_set::{CredentialKey, CredentialSet};

/// Read every known key through `lookup`. Unbound or empty variables are
/// skipped; `None` when nothing is bound.
pub fn load_from_lookup<F>(lookup: F) -> Option<CredentialSet>
where
    F: Fn(&str) -> Option<String>,
{
    let set: CredentialSet = CredentialKey::ALL
        .iter()
        .filter_map(|key| {
            lookup(key.as_str())
                .filter(|v| !v.is_empty())
                .map(|v| (key.as_str(), v))
        })
        .collect();
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}
