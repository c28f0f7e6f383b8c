use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

use crate::errors::{DomainError, DomainResult};
use crate::models::{Thread, ThreadCreate, ThreadKey, ThreadUpdate, ThreadVote};
use crate::pagination::{plan, ThreadPaginator};
use crate::storage::errors::translate;
use crate::storage::{checkout, ThreadStore};

const THREAD_COLUMNS: &str =
    "id, slug, title, author_nickname, forum_slug, message, created_at, votes";

#[derive(Clone)]
pub struct PgThreadStore {
    pool: Pool,
}

impl PgThreadStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn thread_from_row(row: &Row) -> Thread {
    Thread {
        id: row.get(0),
        slug: row.get(1),
        title: row.get(2),
        author: row.get(3),
        forum: row.get(4),
        message: row.get(5),
        created: row.get(6),
        votes: row.get(7),
    }
}

#[async_trait]
impl ThreadStore for PgThreadStore {
    async fn insert(&self, forum_slug: &str, thread: &ThreadCreate) -> DomainResult<i64> {
        let client = checkout(&self.pool).await?;
        let row = client
            .query_one(
                "INSERT INTO threads \
                 (slug, title, author_nickname, forum_slug, message, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
                &[
                    &thread.slug,
                    &thread.title,
                    &thread.author,
                    &forum_slug,
                    &thread.message,
                    &thread.created,
                ],
            )
            .await
            .map_err(translate)?;
        Ok(row.get(0))
    }

    async fn select(&self, key: &ThreadKey) -> DomainResult<Thread> {
        let client = checkout(&self.pool).await?;
        let row = match key {
            ThreadKey::Id(id) => {
                client
                    .query_opt(
                        &format!("SELECT {THREAD_COLUMNS} FROM threads WHERE id = $1")[..],
                        &[id],
                    )
                    .await
            }
            ThreadKey::Slug(slug) => {
                client
                    .query_opt(
                        &format!("SELECT {THREAD_COLUMNS} FROM threads WHERE slug = $1")[..],
                        &[slug],
                    )
                    .await
            }
        }
        .map_err(translate)?;
        row.map(|r| thread_from_row(&r))
            .ok_or(DomainError::ThreadNotFound)
    }

    async fn select_by_forum(
        &self,
        forum_slug: &str,
        page: &ThreadPaginator,
    ) -> DomainResult<Vec<Thread>> {
        let client = checkout(&self.pool).await?;
        let query = plan::thread_page(page);
        let rows = match &page.since {
            Some(since) => {
                client
                    .query(query.sql.as_str(), &[&forum_slug, since, &page.limit])
                    .await
            }
            None => {
                client
                    .query(query.sql.as_str(), &[&forum_slug, &page.limit])
                    .await
            }
        }
        .map_err(translate)?;
        Ok(rows.iter().map(thread_from_row).collect())
    }

    async fn update(&self, key: &ThreadKey, update: &ThreadUpdate) -> DomainResult<Thread> {
        let (filter, key_arg): (&str, &(dyn ToSql + Sync)) = match key {
            ThreadKey::Id(id) => ("id = $1", id),
            ThreadKey::Slug(slug) => ("slug = $1", slug),
        };

        let mut columns: Vec<String> = Vec::new();
        let mut args: Vec<&(dyn ToSql + Sync)> = vec![key_arg];
        if let Some(title) = &update.title {
            args.push(title);
            columns.push(format!("title = ${}", args.len()));
        }
        if let Some(message) = &update.message {
            args.push(message);
            columns.push(format!("message = ${}", args.len()));
        }
        if columns.is_empty() {
            return Err(DomainError::EmptyParameters);
        }

        let sql = format!(
            "UPDATE threads SET {} WHERE {} RETURNING {}",
            columns.join(", "),
            filter,
            THREAD_COLUMNS,
        );
        let client = checkout(&self.pool).await?;
        let row = client
            .query_opt(sql.as_str(), &args)
            .await
            .map_err(translate)?;
        row.map(|r| thread_from_row(&r))
            .ok_or(DomainError::ThreadNotFound)
    }

    async fn upsert_vote(&self, key: &ThreadKey, vote: &ThreadVote) -> DomainResult<()> {
        let client = checkout(&self.pool).await?;
        match key {
            ThreadKey::Id(id) => {
                client
                    .execute(
                        "INSERT INTO votes (vote, author_nickname, thread_id) \
                         VALUES ($1, $2, $3) \
                         ON CONFLICT (thread_id, author_nickname) \
                         DO UPDATE SET vote = $1",
                        &[&vote.voice, &vote.nickname, id],
                    )
                    .await
            }
            // Resolving the slug inside the statement keeps the upsert a
            // single round-trip; a missing slug inserts nothing and the
            // follow-up read reports the absence.
            ThreadKey::Slug(slug) => {
                client
                    .execute(
                        "WITH thread_info AS (SELECT id FROM threads WHERE slug = $3) \
                         INSERT INTO votes (vote, author_nickname, thread_id) \
                         SELECT $1, $2, thread_info.id FROM thread_info \
                         ON CONFLICT (thread_id, author_nickname) \
                         DO UPDATE SET vote = $1",
                        &[&vote.voice, &vote.nickname, slug],
                    )
                    .await
            }
        }
        .map_err(translate)?;
        Ok(())
    }
}
