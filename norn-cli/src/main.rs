use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "norn", about = "Monitor multi-agent swarms")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the norn API (overrides config and NORN_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive swarm monitor
    Monitor(commands::monitor::MonitorArgs),
    /// Print the current swarm list and exit
    Swarms(commands::swarms::SwarmsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The monitor owns the terminal, so its logs go to a file.
    let log_to_file = matches!(cli.command, Commands::Monitor(_));
    init_logging(cli.verbose, log_to_file)?;

    let mut config = config::ConfigLoader::load()?;
    if let Some(url) = cli.api_url {
        config.api.url = url;
    }

    match cli.command {
        Commands::Monitor(args) => commands::monitor::run(args, config).await,
        Commands::Swarms(args) => commands::swarms::run(args, config).await,
    }
}

fn init_logging(verbose: bool, to_file: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if !to_file {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return Ok(());
    }

    let data_dir = norn_paths::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let path = norn_paths::log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
