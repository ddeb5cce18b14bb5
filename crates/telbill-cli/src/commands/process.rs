//! Process command - extract a structured bill from a single text file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use telbill_core::{BillParser, TelecomBillParser};

use crate::output::{format_bill, OutputFormat};
use crate::store::LastResultStore;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file, or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print extraction warnings to stderr
    #[arg(long)]
    show_warnings: bool,

    /// Do not update the last-result store
    #[arg(long)]
    no_store: bool,
}

pub fn run(args: ProcessArgs, config_path: Option<&Path>, store: &LastResultStore) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;
    let payload = read_input(&args.input)?;

    info!("Processing {} ({} bytes)", args.input.display(), payload.len());

    let parser = TelecomBillParser::from_config(&config.extraction);
    let result = parser.parse_bytes(&payload)?;

    for warning in &result.warnings {
        warn!("{}", warning);
    }
    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if !args.no_store && config.output.store_last_result {
        store.save(&result.bill)?;
    }

    let pretty = args.pretty || config.output.pretty;
    let output = format_bill(&result.bill, args.format, pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<Vec<u8>> {
    if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    fs::read(input).with_context(|| format!("Cannot read {}", input.display()))
}
