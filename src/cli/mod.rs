//! CLI module for orgdir
//!
//! Commands:
//! - `serve`: start the HTTP server (default when no command is given)
//! - `seed-db`: create and populate a SQLite database with the sample dataset

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod seed;

/// Orgdir directory service CLI
#[derive(Parser, Debug)]
#[command(name = "orgdir")]
#[command(about = "Multi-tenant organizational directory service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create a SQLite database populated with the sample organizations
    SeedDb {
        /// Path of the database file to create or populate
        path: PathBuf,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::SeedDb { path }) => seed::run(&path).await,
        Some(Commands::Serve) | None => crate::server::run().await,
    }
}
