//! HTTP server command
//!
//! Runs the board API: lists, cards, and bulk reordering over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use taskboard_server::db::{create_pool, migrations};
use taskboard_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8888)
    #[arg(long, short = 'b', default_value = "127.0.0.1:8888")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL, e.g. sqlite://taskboard.db (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or a .env file")?;

    tracing::info!("Starting taskboard server on {}", args.bind);

    // Create database pool
    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    // Bring the schema up before serving
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    // Configure server
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(pool, config)
        .await
        .context("Server error")?;

    Ok(())
}
