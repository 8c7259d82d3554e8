//! Credential store: load, save, merge and export credential sets.
//!
//! The store has no terminal dependency. Prompting lives in `cli`.

use crate::core::error::{StoreError, StoreResult};
use crate::core::{env_file, environment, json_file};
use crate::models::credential_set::{CredentialKey, CredentialSet};
use std::path::{Path, PathBuf};
use tracing::info;
use zeroize::Zeroizing;

/// Where credentials can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The JSON credentials file.
    File,
    /// Variables bound in the process environment.
    Environment,
    /// The `KEY=VALUE` env file.
    EnvFile,
}

/// Where credentials can be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    File,
    EnvFile,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

pub struct CredentialStore {
    credentials_path: PathBuf,
    env_file: PathBuf,
    default_token: Option<Zeroizing<String>>,
    env_lookup: EnvLookup,
}

impl CredentialStore {
    /// `default_token` is offered by setup when the user has no token of their own.
    pub fn new(
        credentials_path: impl Into<PathBuf>,
        env_file: impl Into<PathBuf>,
        default_token: Option<String>,
    ) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            env_file: env_file.into(),
            default_token: default_token.filter(|t| !t.is_empty()).map(Zeroizing::new),
            env_lookup: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Replace the process-environment lookup used by `Source::Environment`.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.env_lookup = Box::new(lookup);
        self
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    pub fn default_token(&self) -> Option<&str> {
        self.default_token.as_deref().map(String::as_str)
    }

    /// `Ok(None)` when nothing is stored at `source`.
    pub fn load(&self, source: Source) -> StoreResult<Option<CredentialSet>> {
        match source {
            Source::File => json_file::load(&self.credentials_path),
            Source::Environment => Ok(environment::load_from_lookup(&self.env_lookup)),
            Source::EnvFile => env_file::load(&self.env_file),
        }
    }

    pub fn save(&self, credentials: &CredentialSet, destination: Destination) -> StoreResult<()> {
        match destination {
            Destination::File => json_file::save(&self.credentials_path, credentials)?,
            Destination::EnvFile => env_file::save(&self.env_file, credentials)?,
        }
        info!(?destination, keys = credentials.len(), "credentials saved");
        Ok(())
    }

    /// First non-empty set from the JSON file, then the environment.
    pub fn resolve(&self) -> StoreResult<Option<CredentialSet>> {
        if let Some(set) = self.load(Source::File)?.filter(|s| !s.is_empty()) {
            return Ok(Some(set));
        }
        self.load(Source::Environment)
    }

    /// Set holding only the fallback token.
    pub fn default_credentials(&self) -> StoreResult<CredentialSet> {
        let token = self.default_token().ok_or(StoreError::NoDefaultToken)?;
        let mut set = CredentialSet::new();
        set.set(CredentialKey::ApiToken, token);
        Ok(set)
    }

    /// Save the fallback token to both the JSON file and the env file.
    pub fn quick_setup(&self) -> StoreResult<CredentialSet> {
        let set = self.default_credentials()?;
        self.save(&set, Destination::File)?;
        self.save(&set, Destination::EnvFile)?;
        Ok(set)
    }

    /// Remove the JSON file. Returns whether there was one.
    pub fn delete(&self) -> StoreResult<bool> {
        let existed = json_file::delete(&self.credentials_path)?;
        if existed {
            info!(path = %self.credentials_path.display(), "credentials file removed");
        }
        Ok(existed)
    }
}

/// Shell `export` commands reproducing `credentials`.
pub fn export_lines(credentials: &CredentialSet) -> Vec<String> {
    credentials
        .iter()
        .map(|(k, v)| format!("export {}='{}'", k, v.replace('\'', r"'\''")))
        .collect()
}
