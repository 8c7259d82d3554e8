//! `show`, `export` and `delete` over the resolved credentials.

use crate::cli::CliContext;
use crate::core::mask::display_value;
use crate::core::store::export_lines;
use crate::models::credential_set::CredentialSet;
use anyhow::{bail, Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use dialoguer::Confirm;
use std::collections::BTreeMap;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug, Default)]
pub struct DeleteArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

struct ShowItem<'a> {
    key: &'a str,
    value: String,
}

fn resolve_or_bail(ctx: &CliContext, what: &str) -> Result<CredentialSet> {
    match ctx.store.resolve()? {
        Some(set) => Ok(set),
        None => bail!("no credentials found to {}", what),
    }
}

pub fn run_show(ctx: &CliContext, args: ShowArgs) -> Result<()> {
    if args.format != "table" && args.format != "json" {
        bail!("invalid format: {} (use table|json)", args.format);
    }

    let Some(credentials) = ctx.store.resolve()? else {
        println!("No credentials found");
        return Ok(());
    };

    let items: Vec<ShowItem> = credentials
        .iter()
        .map(|(key, value)| ShowItem {
            key,
            value: display_value(key, value),
        })
        .collect();

    if args.format == "json" {
        let map: BTreeMap<&str, &str> = items.iter().map(|i| (i.key, i.value.as_str())).collect();
        let json = serde_json::to_string_pretty(&map).context("serialize credentials")?;
        println!("{}", json);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    for item in items {
        table.add_row(vec![item.key.to_string(), item.value]);
    }
    println!("{}", table);
    Ok(())
}

pub fn run_export(ctx: &CliContext) -> Result<()> {
    let credentials = resolve_or_bail(ctx, "export")?;
    println!("# Copy and paste these commands in your terminal:");
    for line in export_lines(&credentials) {
        println!("{}", line);
    }
    Ok(())
}

pub fn run_delete(ctx: &CliContext, args: DeleteArgs) -> Result<()> {
    let path = ctx.store.credentials_path();
    if !args.yes {
        if ctx.non_interactive {
            bail!("--non-interactive requires --yes for delete");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", path.display()))
            .default(false)
            .interact()
            .context("read confirmation")?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }
    if ctx.store.delete()? {
        println!("Deleted {}", path.display());
    } else {
        println!("No credentials file at {}", path.display());
    }
    Ok(())
}
