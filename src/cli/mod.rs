//! CLI dispatch
//!
//! Owns all startup wiring: configuration, tracing, the connection
//! pool, schema bootstrap, and the HTTP listener.

pub mod args;

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::rest_api::{self, AppState};
use crate::storage::pool::{self, PoolSetupError};
use crate::storage::schema::{self, SchemaError};

use args::{Cli, Command};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Pool(#[from] PoolSetupError),
    #[error("{0}")]
    Schema(#[from] SchemaError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            config,
            port,
            database_url,
        } => serve(config, port, database_url).await,
        Command::Migrate {
            config,
            database_url,
        } => migrate(config, database_url).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn load_config(
    path: PathBuf,
    port: Option<u16>,
    database_url: Option<String>,
) -> Result<AppConfig, CliError> {
    let mut config = AppConfig::load(&path)?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(url) = database_url {
        config.database_url = url;
    }
    Ok(config)
}

async fn serve(
    config_path: PathBuf,
    port: Option<u16>,
    database_url: Option<String>,
) -> Result<(), CliError> {
    let config = load_config(config_path, port, database_url)?;
    let pool = pool::build(&config.database_url, config.pool_size)?;
    schema::bootstrap(&pool).await?;

    let router = rest_api::router(AppState::new(pool));
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    tracing::info!(addr = %config.socket_addr(), "forum API listening");
    axum::serve(listener, router).await?;
    Ok(())
}

async fn migrate(config_path: PathBuf, database_url: Option<String>) -> Result<(), CliError> {
    let config = load_config(config_path, None, database_url)?;
    let pool = pool::build(&config.database_url, config.pool_size)?;
    schema::bootstrap(&pool).await?;
    tracing::info!("schema applied");
    Ok(())
}
