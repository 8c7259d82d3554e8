//! Named credential values and the fixed key vocabulary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys the store knows about. Anything else is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    ApiToken,
    AccountId,
    ZoneId,
    CustomDomain,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 4] = [
        CredentialKey::ApiToken,
        CredentialKey::AccountId,
        CredentialKey::ZoneId,
        CredentialKey::CustomDomain,
    ];

    /// Variable name used in the JSON file, the env file and the process environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::ApiToken => "CLOUDFLARE_API_TOKEN",
            CredentialKey::AccountId => "CLOUDFLARE_ACCOUNT_ID",
            CredentialKey::ZoneId => "CLOUDFLARE_ZONE_ID",
            CredentialKey::CustomDomain => "CUSTOM_DOMAIN",
        }
    }

    /// Human label for prompts.
    pub fn label(&self) -> &'static str {
        match self {
            CredentialKey::ApiToken => "API token",
            CredentialKey::AccountId => "Account ID",
            CredentialKey::ZoneId => "Zone ID",
            CredentialKey::CustomDomain => "Custom domain",
        }
    }
}

/// Whether values under `key` must be masked when displayed.
pub fn is_secret_key(key: &str) -> bool {
    key.contains("TOKEN")
}

/// A mapping of credential names to values, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSet {
    entries: BTreeMap<String, String>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn set(&mut self, key: CredentialKey, value: impl Into<String>) {
        self.insert(key.as_str(), value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn known(&self, key: CredentialKey) -> Option<&str> {
        self.get(key.as_str())
    }

    pub fn api_token(&self) -> Option<&str> {
        self.known(CredentialKey::ApiToken)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CredentialSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = CredentialSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}
