//! `quick-setup` and `setup`: collect credentials and save them.

use crate::cli::CliContext;
use crate::core::mask::mask;
use crate::core::store::Destination;
use crate::models::credential_set::{CredentialKey, CredentialSet};
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use dialoguer::{Confirm, Input, Password, Select};
use std::io::Read;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SaveTarget {
    /// JSON credentials file (recommended)
    Json,
    /// Environment file
    Env,
    /// Both
    Both,
}

impl SaveTarget {
    fn destinations(self) -> &'static [Destination] {
        match self {
            SaveTarget::Json => &[Destination::File],
            SaveTarget::Env => &[Destination::EnvFile],
            SaveTarget::Both => &[Destination::File, Destination::EnvFile],
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    /// Read the API token from stdin instead of prompting
    #[arg(long)]
    pub token_from_stdin: bool,

    /// Account ID
    #[arg(long)]
    pub account_id: Option<String>,

    /// Zone ID (for custom domains)
    #[arg(long)]
    pub zone_id: Option<String>,

    /// Custom domain, e.g. example.com
    #[arg(long)]
    pub domain: Option<String>,

    /// Where to save (prompted when omitted)
    #[arg(long, value_enum)]
    pub save: Option<SaveTarget>,
}

pub fn run_quick(ctx: &CliContext) -> Result<()> {
    let set = ctx.store.quick_setup()?;
    println!("Saved credentials to {}", ctx.store.credentials_path().display());
    println!("Saved credentials to {}", ctx.store.env_file().display());
    if let Some(token) = set.api_token() {
        println!("API token configured: {}", mask(token));
    }
    Ok(())
}

pub fn run_full(ctx: &CliContext, args: SetupArgs) -> Result<()> {
    let credentials = collect(ctx, &args)?;
    let target = match args.save {
        Some(target) => target,
        None if ctx.non_interactive => SaveTarget::Json,
        None => prompt_save_target()?,
    };
    for destination in target.destinations() {
        ctx.store.save(&credentials, *destination)?;
        let path = match destination {
            Destination::File => ctx.store.credentials_path(),
            Destination::EnvFile => ctx.store.env_file(),
        };
        println!("Saved credentials to {}", path.display());
    }
    Ok(())
}

fn collect(ctx: &CliContext, args: &SetupArgs) -> Result<CredentialSet> {
    let mut credentials = CredentialSet::new();
    let token = read_token(ctx, args.token_from_stdin)?;
    if token.trim().is_empty() {
        bail!("API token is required");
    }
    credentials.set(CredentialKey::ApiToken, token.trim());

    let optional = [
        (CredentialKey::AccountId, &args.account_id),
        (CredentialKey::ZoneId, &args.zone_id),
        (CredentialKey::CustomDomain, &args.domain),
    ];
    for (key, flag) in optional {
        let value = match flag {
            Some(v) => v.trim().to_string(),
            None if ctx.non_interactive => continue,
            None => Input::<String>::new()
                .with_prompt(format!("{} (press Enter to skip)", key.label()))
                .allow_empty(true)
                .interact_text()
                .with_context(|| format!("read {}", key.label()))?
                .trim()
                .to_string(),
        };
        if !value.is_empty() {
            credentials.set(key, value);
        }
    }
    Ok(credentials)
}

fn read_token(ctx: &CliContext, from_stdin: bool) -> Result<Zeroizing<String>> {
    if from_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read API token from stdin")?;
        return Ok(Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string()));
    }

    let default = ctx.store.default_token();
    if ctx.non_interactive {
        return match default {
            Some(token) => Ok(Zeroizing::new(token.to_string())),
            None => bail!("--non-interactive requires --token-from-stdin or a configured default token"),
        };
    }

    if let Some(token) = default {
        let use_default = Confirm::new()
            .with_prompt(format!("Use the configured API token ({})?", mask(token)))
            .default(true)
            .interact()
            .context("read confirmation")?;
        if use_default {
            return Ok(Zeroizing::new(token.to_string()));
        }
    }

    println!("Create a token with 'Cloudflare Pages:Edit' and 'Zone:Read' permissions at");
    println!("https://dash.cloudflare.com/profile/api-tokens");
    Ok(Zeroizing::new(
        Password::new()
            .with_prompt("API token")
            .allow_empty_password(false)
            .interact()
            .context("read API token from prompt")?,
    ))
}

fn prompt_save_target() -> Result<SaveTarget> {
    let choice = Select::new()
        .with_prompt("Save credentials to")
        .items(&["JSON file (recommended)", "Env file", "Both"])
        .default(0)
        .interact()
        .context("read save target")?;
    Ok(match choice {
        0 => SaveTarget::Json,
        1 => SaveTarget::Env,
        _ => SaveTarget::Both,
    })
}
