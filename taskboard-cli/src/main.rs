//! taskboard CLI - kanban board backend
//!
//! Entry point for the taskboard command-line tool, which runs the HTTP
//! API behind the board UI: lists and cards with position-based ordering,
//! stored in SQLite.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "taskboard",
    author,
    version,
    about = "Kanban board backend - lists and cards over HTTP, stored in SQLite"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env loads before clap parses: ServeArgs reads DATABASE_URL from
    // the environment
    dotenvy::dotenv().ok();
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }
    Ok(())
}
