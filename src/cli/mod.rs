//! CLI routing and command dispatch.

use crate::core::paths::StorePaths;
use crate::core::store::CredentialStore;
use crate::models::settings::Settings;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

pub mod credentials;
pub mod doctor;
pub mod menu;
pub mod post;
pub mod setup;
pub mod verify;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: StorePaths,
    pub settings: Settings,
    pub store: CredentialStore,
    pub non_interactive: bool,
    pub settings_load_warning: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "tokenshelf", version, about = "Local credential store for deployment API tokens")]
pub struct Cli {
    /// Directory holding credentials.json and config.toml (default: ~/.cloudflare)
    #[arg(long, global = true, value_name = "PATH")]
    pub config_dir: Option<PathBuf>,

    /// Environment file to merge credentials into (default from config.toml, else .env)
    #[arg(long, global = true, value_name = "PATH", env = "TOKENSHELF_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Fallback API token offered by setup
    #[arg(long, global = true, env = "TOKENSHELF_DEFAULT_TOKEN", hide_env_values = true)]
    pub default_token: Option<String>,

    /// Run in non-interactive mode (no prompts, suitable for automation)
    #[arg(long, global = true, env = "TOKENSHELF_NON_INTERACTIVE")]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = StorePaths::resolve(self.config_dir)?;

        // A broken config.toml should not lock the user out of their credentials.
        let mut settings_load_warning: Option<String> = None;
        let settings = match crate::core::settings::load(&paths.settings_toml) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "falling back to default settings");
                settings_load_warning = Some(format!("{:#}", e));
                Settings::default()
            }
        };

        let env_file = self
            .env_file
            .unwrap_or_else(|| settings.env_file.clone());
        let default_token = self
            .default_token
            .or_else(|| settings.default_api_token.clone());
        let store = CredentialStore::new(paths.credentials_json.clone(), env_file, default_token);

        let ctx = CliContext {
            paths,
            settings,
            store,
            non_interactive: self.non_interactive,
            settings_load_warning,
        };

        let _span = tracing::info_span!("command", name = self.command.name()).entered();
        match self.command {
            Commands::QuickSetup => setup::run_quick(&ctx),
            Commands::Setup(args) => setup::run_full(&ctx, args),
            Commands::Show(args) => credentials::run_show(&ctx, args),
            Commands::Export => credentials::run_export(&ctx),
            Commands::Delete(args) => credentials::run_delete(&ctx, args),
            Commands::Test => verify::run(&ctx),
            Commands::Doctor => doctor::run(&ctx),
            Commands::Menu => menu::run(&ctx),
            Commands::Post { command } => post::run(command),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the configured fallback token to the JSON file and env file
    QuickSetup,
    /// Enter token, account ID, zone ID and custom domain, then save
    Setup(setup::SetupArgs),
    /// Show stored credentials (tokens masked)
    Show(credentials::ShowArgs),
    /// Print shell export commands for stored credentials
    Export,
    /// Delete the JSON credentials file
    Delete(credentials::DeleteArgs),
    /// Check the stored API token against the provider
    Test,
    /// Check file permissions and configuration (read-only)
    Doctor,
    /// Interactive menu
    Menu,
    /// Publish text and image posts
    Post {
        #[command(subcommand)]
        command: post::PostCommand,
    },
}

impl Commands {
    /// Command name for error messages.
    pub fn name(&self) -> &str {
        match self {
            Commands::QuickSetup => "quick-setup",
            Commands::Setup(_) => "setup",
            Commands::Show(_) => "show",
            Commands::Export => "export",
            Commands::Delete(_) => "delete",
            Commands::Test => "test",
            Commands::Doctor => "doctor",
            Commands::Menu => "menu",
            Commands::Post { .. } => "post",
        }
    }
}
