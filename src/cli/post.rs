//! `post` subcommands: publish a draft and report the posting account.

use crate::constants;
use crate::posting::compose::{self, Draft};
use crate::posting::x_client::XClient;
use crate::posting::Poster;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// Publish a post, optionally with up to four images
    Send(PostSendArgs),
    /// Show the account the posting token belongs to
    Whoami(PostAuthArgs),
}

#[derive(Args, Debug)]
pub struct PostAuthArgs {
    /// User-context bearer token for the posting API
    #[arg(long, env = "TOKENSHELF_X_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Posting API base URL
    #[arg(long, env = "TOKENSHELF_X_API_BASE", default_value = constants::DEFAULT_POST_API_BASE)]
    pub api_base: String,
}

#[derive(Args, Debug)]
pub struct PostSendArgs {
    /// Post text (truncated to 280 characters)
    pub text: String,

    /// Image to attach (repeatable; first four existing files are used)
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,

    /// Print what would be posted without contacting the API
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub auth: PostAuthArgs,
}

pub fn run(cmd: PostCommand) -> Result<()> {
    match cmd {
        PostCommand::Send(args) => run_send(args),
        PostCommand::Whoami(args) => run_whoami(args),
    }
}

fn client(auth: &PostAuthArgs) -> Result<XClient> {
    let token = auth
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .context("posting token missing (use --token or TOKENSHELF_X_TOKEN)")?;
    Ok(XClient::new(auth.api_base.as_str(), token)?)
}

fn run_whoami(args: PostAuthArgs) -> Result<()> {
    let client = client(&args)?;
    let me = client.who_am_i().context("authentication failed")?;
    println!("Connected as: {}", me);
    Ok(())
}

fn run_send(args: PostSendArgs) -> Result<()> {
    let draft = Draft::new(&args.text, args.images)?;

    if args.dry_run {
        println!("Would post ({} chars): {}", draft.text.chars().count(), draft.text);
        for path in &draft.media {
            println!("  image: {}", path.display());
        }
        return Ok(());
    }

    let client = client(&args.auth)?;
    let me = client.who_am_i().context("authentication failed")?;
    println!("Connected as: {}", me);

    let result = compose::publish(&client, &draft).context("publish post")?;
    println!("Post ID: {}", result.id);
    println!("Content: {}", result.text);
    println!("URL: {}", result.url());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(token: Option<&str>) -> PostAuthArgs {
        PostAuthArgs {
            token: token.map(str::to_string),
            api_base: "http://127.0.0.1:9".to_string(),
        }
    }

    #[test]
    fn test_dry_run_needs_no_token() {
        let args = PostSendArgs {
            text: "hello".into(),
            images: Vec::new(),
            dry_run: true,
            auth: auth(None),
        };
        run_send(args).unwrap();
    }

    #[test]
    fn test_missing_token_is_error() {
        let err = client(&auth(Some(""))).err().unwrap();
        assert!(err.to_string().contains("posting token missing"));
    }

    #[test]
    fn test_dry_run_with_only_missing_images_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let args = PostSendArgs {
            text: "hello".into(),
            images: (0..5).map(|i| dir.path().join(format!("{}.png", i))).collect(),
            dry_run: true,
            auth: auth(None),
        };
        let err = run_send(args).unwrap_err();
        assert!(err.to_string().contains("none of the 4 requested media files exist"));
    }

    #[test]
    fn test_dry_run_with_extra_images_succeeds() {
        let dir = tempfile::TempDir::new().unwrap();
        let images: Vec<PathBuf> = (0..5).map(|i| dir.path().join(format!("{}.png", i))).collect();
        for path in &images {
            std::fs::write(path, b"png").unwrap();
        }
        let args = PostSendArgs {
            text: "hello".into(),
            images,
            dry_run: true,
            auth: auth(None),
        };
        run_send(args).unwrap();
    }
}
