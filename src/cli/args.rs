//! CLI argument definitions using clap
//!
//! Commands:
//! - agora serve --config <path> [--port <port>] [--database-url <url>]
//! - agora migrate --config <path> [--database-url <url>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// agora - a discussion-forum REST backend
#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the forum API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./agora.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Override the configured database URL
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Apply the database schema and exit
    Migrate {
        /// Path to configuration file
        #[arg(long, default_value = "./agora.json")]
        config: PathBuf,

        /// Override the configured database URL
        #[arg(long)]
        database_url: Option<String>,
    },
}
