//! Interactive numbered menu over the one-shot commands.

use crate::cli::{credentials, doctor, setup, verify, CliContext};
use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    QuickSetup,
    FullSetup,
    View,
    Test,
    Export,
    Delete,
    Doctor,
    Exit,
}

impl MenuItem {
    const ALL: [MenuItem; 8] = [
        MenuItem::QuickSetup,
        MenuItem::FullSetup,
        MenuItem::View,
        MenuItem::Test,
        MenuItem::Export,
        MenuItem::Delete,
        MenuItem::Doctor,
        MenuItem::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuItem::QuickSetup => "Quick setup (use the configured API token)",
            MenuItem::FullSetup => "Full setup (add Account ID, Zone ID, etc.)",
            MenuItem::View => "View current credentials",
            MenuItem::Test => "Test credentials",
            MenuItem::Export => "Export commands",
            MenuItem::Delete => "Delete credentials",
            MenuItem::Doctor => "Check permissions",
            MenuItem::Exit => "Exit",
        }
    }
}

pub fn run(ctx: &CliContext) -> Result<()> {
    if ctx.non_interactive {
        bail!("menu is interactive; use the individual subcommands with --non-interactive");
    }

    if first_run(ctx) {
        return Ok(());
    }

    let labels: Vec<String> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.label()))
        .collect();

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Credentials manager")
            .items(&labels)
            .default(0)
            .interact()
            .context("read menu selection")?;
        let item = MenuItem::ALL[choice];
        if item == MenuItem::Exit {
            println!("Goodbye!");
            return Ok(());
        }
        // Every failure is reported and the menu keeps going.
        if let Err(e) = dispatch(ctx, item) {
            report(e);
        }
    }
}

/// Offer quick setup when nothing is stored yet. Returns true when setup ran.
/// Failures are reported and fall through to the menu.
fn first_run(ctx: &CliContext) -> bool {
    let existing = match ctx.store.resolve() {
        Ok(existing) => existing,
        Err(e) => return report(e.into()),
    };
    if existing.is_some() || ctx.store.default_token().is_none() {
        return false;
    }
    println!("No existing credentials found.");
    let quick = Confirm::new()
        .with_prompt("Do quick setup with the configured API token?")
        .default(true)
        .interact()
        .context("read confirmation");
    match quick {
        Ok(true) => quick_setup_reported(ctx),
        Ok(false) => false,
        Err(e) => report(e),
    }
}

fn quick_setup_reported(ctx: &CliContext) -> bool {
    match setup::run_quick(ctx) {
        Ok(()) => {
            println!("Setup complete.");
            true
        }
        Err(e) => report(e),
    }
}

fn report(e: anyhow::Error) -> bool {
    eprintln!("error: {:#}", e);
    false
}

fn dispatch(ctx: &CliContext, item: MenuItem) -> Result<()> {
    match item {
        MenuItem::QuickSetup => setup::run_quick(ctx),
        MenuItem::FullSetup => setup::run_full(ctx, setup::SetupArgs::default()),
        MenuItem::View => credentials::run_show(
            ctx,
            credentials::ShowArgs {
                format: "table".to_string(),
            },
        ),
        MenuItem::Test => verify::run(ctx),
        MenuItem::Export => credentials::run_export(ctx),
        MenuItem::Delete => credentials::run_delete(ctx, credentials::DeleteArgs::default()),
        MenuItem::Doctor => doctor::run(ctx),
        MenuItem::Exit => Ok(()),
    }
}
