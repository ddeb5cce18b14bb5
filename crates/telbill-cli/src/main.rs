//! CLI application for Thai telecom bill text extraction.

mod commands;
mod output;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{batch, config, last, process};

/// Thai telecom bill parser - Turn recognized bill text into structured records
#[derive(Parser)]
#[command(name = "telbill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory of the last-result store
    #[arg(long, global = true, env = "TELBILL_STORE_DIR")]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single bill text file
    Process(process::ProcessArgs),

    /// Parse multiple bill text files
    Batch(batch::BatchArgs),

    /// Show the most recently parsed bill
    Last(last::LastArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity; RUST_LOG takes precedence
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let store = store::LastResultStore::open(cli.store_dir.clone())?;
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Process(args) => process::run(args, config_path, &store),
        Commands::Batch(args) => batch::run(args, config_path),
        Commands::Last(args) => last::run(args, config_path, &store),
        Commands::Config(args) => config::run(args, config_path),
    }
}
