//! Schema bootstrap
//!
//! The embedded schema is idempotent (`CREATE ... IF NOT EXISTS`,
//! `CREATE OR REPLACE` for trigger functions) and applied in one batch
//! on startup or via the `migrate` subcommand.

use deadpool_postgres::{Pool, PoolError};
use thiserror::Error;

pub const SCHEMA: &str = include_str!("schema.sql");

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("connection checkout failed: {0}")]
    Checkout(#[from] PoolError),
    #[error("schema apply failed: {0}")]
    Apply(#[from] tokio_postgres::Error),
}

pub async fn bootstrap(pool: &Pool) -> Result<(), SchemaError> {
    let client = pool.get().await?;
    client.batch_execute(SCHEMA).await?;
    tracing::debug!("schema bootstrap complete");
    Ok(())
}
