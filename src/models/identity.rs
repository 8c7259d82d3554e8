use serde::{Deserialize, Serialize};
use std::fmt;

/// Account a remote service reports for a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub id: Option<String>,
    /// Email or display name.
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.username {
            Some(username) => write!(f, "@{} ({})", username, self.name),
            None => f.write_str(&self.name),
        }
    }
}
