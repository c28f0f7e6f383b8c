//! Connection pool construction

use deadpool_postgres::{BuildError, Manager, ManagerConfig, Pool, RecyclingMethod};
use thiserror::Error;
use tokio_postgres::NoTls;

#[derive(Debug, Error)]
pub enum PoolSetupError {
    #[error("invalid database url: {0}")]
    Url(tokio_postgres::Error),
    #[error("pool construction failed: {0}")]
    Build(#[from] BuildError),
}

/// Build the shared pool from a libpq-style connection URL.
pub fn build(database_url: &str, max_size: usize) -> Result<Pool, PoolSetupError> {
    let pg_config: tokio_postgres::Config =
        database_url.parse().map_err(PoolSetupError::Url)?;
    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );
    Ok(Pool::builder(manager).max_size(max_size).build()?)
}
