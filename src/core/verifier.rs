//! Credential verification against the provider's identity endpoint.

use crate::models::credential_set::CredentialSet;
use crate::models::identity::Identity;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum VerifyError {
    /// The verifier could not be reached or constructed.
    #[error("verifier unavailable: {0}")]
    Unavailable(String),

    /// The provider answered and refused the token.
    #[error("{0}")]
    Rejected(String),
}

/// Something that can tell whether a token is currently accepted.
pub trait Verifier {
    fn check_identity(&self, token: &str) -> Result<Identity, VerifyError>;
}

/// Outcome of validating a credential set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(Identity),
    Invalid(String),
    VerifierUnavailable(String),
}

/// Ask `verifier` about the API token in `credentials`.
pub fn validate(credentials: &CredentialSet, verifier: &dyn Verifier) -> Validation {
    let Some(token) = credentials.api_token().filter(|t| !t.is_empty()) else {
        return Validation::Invalid("no API token provided".to_string());
    };
    match verifier.check_identity(token) {
        Ok(identity) => {
            debug!(identity = %identity, "token accepted");
            Validation::Valid(identity)
        }
        Err(VerifyError::Rejected(reason)) => {
            warn!(%reason, "token rejected");
            Validation::Invalid(reason)
        }
        Err(VerifyError::Unavailable(reason)) => {
            warn!(%reason, "verifier unavailable");
            Validation::VerifierUnavailable(reason)
        }
    }
}

/// Blocking client for `GET {api_base}/user`.
pub struct HttpVerifier {
    client: Client,
    api_base: String,
}

impl HttpVerifier {
    pub fn new(api_base: impl Into<String>) -> Result<Self, VerifyError> {
        let client = Client::builder()
            .user_agent(concat!("tokenshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VerifyError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }
}

impl Verifier for HttpVerifier {
    fn check_identity(&self, token: &str) -> Result<Identity, VerifyError> {
        let url = format!("{}/user", self.api_base);
        debug!(%url, "checking token");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .map_err(|e| VerifyError::Unavailable(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| VerifyError::Unavailable(e.to_string()))?;
        interpret_user_response(status, &body)
    }
}

#[derive(Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<UserResult>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Deserialize)]
struct UserResult {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

fn interpret_user_response(status: u16, body: &str) -> Result<Identity, VerifyError> {
    if status != 200 {
        return Err(VerifyError::Rejected(format!("HTTP {}: {}", status, body)));
    }
    let envelope: UserEnvelope = serde_json::from_str(body)
        .map_err(|e| VerifyError::Rejected(format!("unexpected response: {}", e)))?;
    if !envelope.success {
        let errors = if envelope.errors.is_empty() {
            "Unknown error".to_string()
        } else {
            envelope
                .errors
                .iter()
                .map(|m| match m.code {
                    Some(code) => format!("{} ({})", m.message, code),
                    None => m.message.clone(),
                })
                .collect::<Vec<_>>()
                .join("; ")
        };
        return Err(VerifyError::Rejected(format!("API returned error: {}", errors)));
    }
    let result = envelope.result.unwrap_or(UserResult {
        id: None,
        email: None,
    });
    Ok(Identity {
        id: result.id,
        name: result.email.unwrap_or_else(|| "Unknown".to_string()),
        username: None,
    })
}
