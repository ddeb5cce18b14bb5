//! Last command - show the most recently processed bill.

use std::path::Path;

use clap::Args;
use console::style;

use crate::output::{format_bill, OutputFormat};
use crate::store::LastResultStore;

/// Arguments for the last command.
#[derive(Args)]
pub struct LastArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Remove the stored result instead of showing it
    #[arg(long)]
    clear: bool,
}

pub fn run(args: LastArgs, config_path: Option<&Path>, store: &LastResultStore) -> anyhow::Result<()> {
    if args.clear {
        if store.clear()? {
            println!("{} Cleared {}", style("✓").green(), store.path().display());
        } else {
            println!("{} Nothing stored", style("ℹ").blue());
        }
        return Ok(());
    }

    let config = super::load_config(config_path)?;

    let Some(bill) = store.load()? else {
        anyhow::bail!("No data yet");
    };

    let pretty = args.pretty || config.output.pretty;
    println!("{}", format_bill(&bill, args.format, pretty)?);

    Ok(())
}
