use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

use crate::errors::{DomainError, DomainResult};
use crate::models::{User, UserUpdate};
use crate::pagination::{plan, UserPaginator};
use crate::storage::errors::translate;
use crate::storage::{checkout, UserStore};

#[derive(Clone)]
pub struct PgUserStore {
    pool: Pool,
}

impl PgUserStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &Row) -> User {
    User {
        nickname: row.get(0),
        fullname: row.get(1),
        about: row.get(2),
        email: row.get(3),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        let client = checkout(&self.pool).await?;
        client
            .execute(
                "INSERT INTO users (nickname, fullname, about, email) \
                 VALUES ($1, $2, $3, $4)",
                &[&user.nickname, &user.fullname, &user.about, &user.email],
            )
            .await
            .map_err(translate)?;
        Ok(())
    }

    async fn select_by_nickname(&self, nickname: &str) -> DomainResult<User> {
        let client = checkout(&self.pool).await?;
        let row = client
            .query_opt(
                "SELECT nickname, fullname, about, email FROM users \
                 WHERE nickname = $1",
                &[&nickname],
            )
            .await
            .map_err(translate)?;
        row.map(|r| user_from_row(&r))
            .ok_or(DomainError::UserNotFound)
    }

    async fn select_by_nickname_or_email(
        &self,
        nickname: &str,
        email: &str,
    ) -> DomainResult<Vec<User>> {
        let client = checkout(&self.pool).await?;
        let rows = client
            .query(
                "SELECT nickname, fullname, about, email FROM users \
                 WHERE nickname = $1 OR email = $2",
                &[&nickname, &email],
            )
            .await
            .map_err(translate)?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn select_by_forum(
        &self,
        forum_slug: &str,
        page: &UserPaginator,
    ) -> DomainResult<Vec<User>> {
        let client = checkout(&self.pool).await?;
        let query = plan::user_page(page);
        let rows = match page.since.as_deref() {
            Some(since) => {
                client
                    .query(query.sql.as_str(), &[&forum_slug, &since, &page.limit])
                    .await
            }
            None => {
                client
                    .query(query.sql.as_str(), &[&forum_slug, &page.limit])
                    .await
            }
        }
        .map_err(translate)?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn update_profile(&self, nickname: &str, update: &UserUpdate) -> DomainResult<()> {
        // Partial update: only the supplied fields become SET clauses.
        let mut columns: Vec<String> = Vec::new();
        let mut args: Vec<&(dyn ToSql + Sync)> = vec![&nickname];
        if let Some(email) = &update.email {
            args.push(email);
            columns.push(format!("email = ${}", args.len()));
        }
        if let Some(fullname) = &update.fullname {
            args.push(fullname);
            columns.push(format!("fullname = ${}", args.len()));
        }
        if let Some(about) = &update.about {
            args.push(about);
            columns.push(format!("about = ${}", args.len()));
        }
        if columns.is_empty() {
            return Ok(());
        }

        let sql = format!(
            "UPDATE users SET {} WHERE nickname = $1",
            columns.join(", ")
        );
        let client = checkout(&self.pool).await?;
        let updated = client
            .execute(sql.as_str(), &args)
            .await
            .map_err(translate)?;
        if updated == 0 {
            return Err(DomainError::UserNotFound);
        }
        Ok(())
    }
}
