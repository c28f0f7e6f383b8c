use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

use crate::errors::{DomainError, DomainResult};
use crate::models::{Post, PostCreate, PostUpdate};
use crate::pagination::{plan, PostPaginator};
use crate::storage::errors::translate;
use crate::storage::{checkout, PostStore};

#[derive(Clone)]
pub struct PgPostStore {
    pool: Pool,
}

impl PgPostStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn post_from_row(row: &Row) -> Post {
    Post {
        id: row.get(0),
        parent: row.get(1),
        author: row.get(2),
        message: row.get(3),
        is_edited: row.get(4),
        forum: row.get(5),
        thread: row.get(6),
        created: row.get(7),
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert_batch(
        &self,
        thread_id: i64,
        forum_slug: &str,
        posts: &[PostCreate],
    ) -> DomainResult<Vec<Post>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        // One multi-row statement: every row shares the statement
        // timestamp and RETURNING yields ids in input order.
        let mut sql = String::from(
            "INSERT INTO posts \
             (parent_id, author_nickname, message, forum_slug, thread_id) VALUES ",
        );
        let mut args: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(posts.len() * 5);
        for (i, post) in posts.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            let base = i * 5;
            sql.push_str(&format!(
                "(${}, ${}, ${}, ${}, ${})",
                base + 1,
                base + 2,
                base + 3,
                base + 4,
                base + 5,
            ));
            args.push(&post.parent);
            args.push(&post.author);
            args.push(&post.message);
            args.push(&forum_slug);
            args.push(&thread_id);
        }
        sql.push_str(" RETURNING id, created_at");

        let client = checkout(&self.pool).await?;
        let rows = client
            .query(sql.as_str(), &args)
            .await
            .map_err(translate)?;
        if rows.len() != posts.len() {
            return Err(DomainError::PostNotFound);
        }

        Ok(rows
            .iter()
            .zip(posts)
            .map(|(row, post)| Post {
                id: row.get(0),
                parent: post.parent,
                author: post.author.clone(),
                message: post.message.clone(),
                is_edited: false,
                forum: forum_slug.to_string(),
                thread: thread_id,
                created: row.get(1),
            })
            .collect())
    }

    async fn select_by_id(&self, post_id: i64) -> DomainResult<Post> {
        let client = checkout(&self.pool).await?;
        let row = client
            .query_opt(
                "SELECT id, parent_id, author_nickname, message, is_edited, \
                 forum_slug, thread_id, created_at \
                 FROM posts WHERE id = $1",
                &[&post_id],
            )
            .await
            .map_err(translate)?;
        row.map(|r| post_from_row(&r))
            .ok_or(DomainError::PostNotFound)
    }

    async fn select_page(
        &self,
        thread_id: i64,
        page: &PostPaginator,
    ) -> DomainResult<Vec<Post>> {
        let query = plan::post_page(page)?;
        let client = checkout(&self.pool).await?;
        let rows = match page.since {
            Some(since) => {
                client
                    .query(query.sql.as_str(), &[&thread_id, &since, &page.limit])
                    .await
            }
            None => {
                client
                    .query(query.sql.as_str(), &[&thread_id, &page.limit])
                    .await
            }
        }
        .map_err(translate)?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn update_message(&self, post_id: i64, update: &PostUpdate) -> DomainResult<()> {
        let message = match update.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => return Ok(()),
        };

        let client = checkout(&self.pool).await?;
        client
            .execute(
                "UPDATE posts SET message = $1, is_edited = TRUE WHERE id = $2",
                &[&message, &post_id],
            )
            .await
            .map_err(translate)?;
        Ok(())
    }
}
