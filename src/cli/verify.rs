//! `test`: check the stored API token against the provider.

use crate::cli::CliContext;
use crate::core::verifier::{self, HttpVerifier, Validation, Verifier};
use crate::models::credential_set::CredentialSet;
use anyhow::{bail, Result};

pub fn run(ctx: &CliContext) -> Result<()> {
    let Some(credentials) = ctx.store.resolve()? else {
        bail!("no credentials found to test");
    };
    println!("Testing credentials against {} ...", ctx.settings.api_base);
    let outcome = match HttpVerifier::new(ctx.settings.api_base.as_str()) {
        Ok(http) => check(&credentials, &http),
        Err(e) => Validation::VerifierUnavailable(e.to_string()),
    };
    report(outcome)
}

fn check(credentials: &CredentialSet, verifier: &dyn Verifier) -> Validation {
    verifier::validate(credentials, verifier)
}

fn report(outcome: Validation) -> Result<()> {
    match outcome {
        Validation::Valid(identity) => {
            println!("API token valid for user: {}", identity);
            Ok(())
        }
        Validation::Invalid(reason) => bail!("API token rejected: {}", reason),
        Validation::VerifierUnavailable(reason) => {
            bail!("cannot verify credentials right now: {}", reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verifier::VerifyError;
    use crate::models::identity::Identity;

    struct Refuses;

    impl Verifier for Refuses {
        fn check_identity(&self, _token: &str) -> Result<Identity, VerifyError> {
            Err(VerifyError::Rejected("HTTP 401: bad".into()))
        }
    }

    #[test]
    fn test_report_valid_is_ok() {
        let identity = Identity {
            id: None,
            name: "me@example.com".into(),
            username: None,
        };
        assert!(report(Validation::Valid(identity)).is_ok());
    }

    #[test]
    fn test_rejected_token_is_error() {
        let set: CredentialSet = [("CLOUDFLARE_API_TOKEN", "t")].into_iter().collect();
        let err = report(check(&set, &Refuses)).unwrap_err();
        assert_eq!(err.to_string(), "API token rejected: HTTP 401: bad");
    }

    #[test]
    fn test_unavailable_is_error() {
        let err = report(Validation::VerifierUnavailable("offline".into())).unwrap_err();
        assert!(err.to_string().contains("offline"));
    }
}
