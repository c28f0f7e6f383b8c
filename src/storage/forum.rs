use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::errors::{DomainError, DomainResult};
use crate::models::{Forum, ForumCreate};
use crate::storage::errors::translate;
use crate::storage::{checkout, ForumStore};

#[derive(Clone)]
pub struct PgForumStore {
    pool: Pool,
}

impl PgForumStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn forum_from_row(row: &Row) -> Forum {
    Forum {
        title: row.get(0),
        author: row.get(1),
        slug: row.get(2),
        posts: row.get(3),
        threads: row.get(4),
    }
}

#[async_trait]
impl ForumStore for PgForumStore {
    async fn insert(&self, forum: &ForumCreate) -> DomainResult<()> {
        let client = checkout(&self.pool).await?;
        client
            .execute(
                "INSERT INTO forums (title, author_nickname, slug) \
                 VALUES ($1, $2, $3)",
                &[&forum.title, &forum.author, &forum.slug],
            )
            .await
            .map_err(translate)?;
        Ok(())
    }

    async fn select_by_slug(&self, slug: &str) -> DomainResult<Forum> {
        let client = checkout(&self.pool).await?;
        let row = client
            .query_opt(
                "SELECT title, author_nickname, slug, posts, threads FROM forums \
                 WHERE slug = $1",
                &[&slug],
            )
            .await
            .map_err(translate)?;
        row.map(|r| forum_from_row(&r))
            .ok_or(DomainError::ForumNotFound)
    }
}
