use async_trait::async_trait;
use deadpool_postgres::Pool;

use crate::errors::DomainResult;
use crate::models::ServiceStatus;
use crate::storage::errors::translate;
use crate::storage::{checkout, ServiceStore};

#[derive(Clone)]
pub struct PgServiceStore {
    pool: Pool,
}

impl PgServiceStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceStore for PgServiceStore {
    async fn truncate_all(&self) -> DomainResult<()> {
        let client = checkout(&self.pool).await?;
        client
            .batch_execute(
                "TRUNCATE votes, posts, threads, forum_users, forums, users CASCADE",
            )
            .await
            .map_err(translate)?;
        Ok(())
    }

    async fn status(&self) -> DomainResult<ServiceStatus> {
        let client = checkout(&self.pool).await?;
        let row = client
            .query_one(
                "SELECT \
                 (SELECT COUNT(*) FROM users) AS users, \
                 (SELECT COUNT(*) FROM forums) AS forums, \
                 (SELECT COUNT(*) FROM threads) AS threads, \
                 (SELECT COUNT(*) FROM posts) AS posts",
                &[],
            )
            .await
            .map_err(translate)?;
        Ok(ServiceStatus {
            user: row.get(0),
            forum: row.get(1),
            thread: row.get(2),
            post: row.get(3),
        })
    }
}
