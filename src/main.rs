use clap::{Parser, Subcommand};
use healthlog_core::{FileStore, Store};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{
    ConfigCommand, ExportCommand, ImportCommand, LogCommand, MedCommand, ShareCommand,
    VisitCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "healthlog")]
#[command(version)]
#[command(about = "A personal health journal", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add, edit and view daily log entries
    Log(LogCommand),

    /// Manage the medication list
    Med(MedCommand),

    /// Record doctor visits
    Visit(VisitCommand),

    /// Print a human-readable report for sharing
    Share(ShareCommand),

    /// Write all records as JSON
    Export(ExportCommand),

    /// Import a JSON export or a pasted share report
    Import(ImportCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;
    tracing::debug!("Using data directory {}", config.data_dir.value.display());

    let store = Store::new(FileStore::new(config.data_dir.value.clone()));

    match &cli.command {
        Some(Commands::Log(cmd)) => cmd.run(&store)?,
        Some(Commands::Med(cmd)) => cmd.run(&store)?,
        Some(Commands::Visit(cmd)) => cmd.run(&store)?,
        Some(Commands::Share(cmd)) => cmd.run(&store, &config)?,
        Some(Commands::Export(cmd)) => cmd.run(&store)?,
        Some(Commands::Import(cmd)) => cmd.run(&store)?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so reports and exports on stdout stay clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("healthlog=debug,healthlog_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "healthlog=warn,healthlog_core=warn".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
