//! Storage access layer
//!
//! One repository trait per entity defines the storage contract the use
//! cases program against; the `Pg*` implementations execute
//! parameterized queries over a shared deadpool-postgres pool. Driver
//! failures are translated into domain error kinds in [`errors`] and
//! never leak raw error text upward.

pub mod errors;
pub mod pool;
pub mod schema;

mod forum;
mod post;
mod service;
mod thread;
mod user;

pub use forum::PgForumStore;
pub use post::PgPostStore;
pub use service::PgServiceStore;
pub use thread::PgThreadStore;
pub use user::PgUserStore;

use async_trait::async_trait;
use deadpool_postgres::{Client, Pool};

use crate::errors::{DomainError, DomainResult};
use crate::models::{
    Forum, ForumCreate, Post, PostCreate, PostUpdate, ServiceStatus, Thread, ThreadCreate,
    ThreadKey, ThreadUpdate, ThreadVote, User, UserUpdate,
};
use crate::pagination::{PostPaginator, ThreadPaginator, UserPaginator};

/// User persistence contract.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> DomainResult<()>;
    async fn select_by_nickname(&self, nickname: &str) -> DomainResult<User>;
    async fn select_by_nickname_or_email(
        &self,
        nickname: &str,
        email: &str,
    ) -> DomainResult<Vec<User>>;
    async fn select_by_forum(
        &self,
        forum_slug: &str,
        page: &UserPaginator,
    ) -> DomainResult<Vec<User>>;
    async fn update_profile(&self, nickname: &str, update: &UserUpdate) -> DomainResult<()>;
}

/// Forum persistence contract.
#[async_trait]
pub trait ForumStore: Send + Sync {
    async fn insert(&self, forum: &ForumCreate) -> DomainResult<()>;
    async fn select_by_slug(&self, slug: &str) -> DomainResult<Forum>;
}

/// Thread persistence contract. Lookups take a [`ThreadKey`] so the
/// id/slug distinction stays in one place.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    async fn insert(&self, forum_slug: &str, thread: &ThreadCreate) -> DomainResult<i64>;
    async fn select(&self, key: &ThreadKey) -> DomainResult<Thread>;
    async fn select_by_forum(
        &self,
        forum_slug: &str,
        page: &ThreadPaginator,
    ) -> DomainResult<Vec<Thread>>;
    /// Applies the non-empty fields of `update`; fails with
    /// `EmptyParameters` when there is nothing to change.
    async fn update(&self, key: &ThreadKey, update: &ThreadUpdate) -> DomainResult<Thread>;
    async fn upsert_vote(&self, key: &ThreadKey, vote: &ThreadVote) -> DomainResult<()>;
}

/// Post persistence contract.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts the batch as siblings of one statement so every row
    /// shares the statement timestamp; returns the created records in
    /// input order.
    async fn insert_batch(
        &self,
        thread_id: i64,
        forum_slug: &str,
        posts: &[PostCreate],
    ) -> DomainResult<Vec<Post>>;
    async fn select_by_id(&self, post_id: i64) -> DomainResult<Post>;
    async fn select_page(
        &self,
        thread_id: i64,
        page: &PostPaginator,
    ) -> DomainResult<Vec<Post>>;
    async fn update_message(&self, post_id: i64, update: &PostUpdate) -> DomainResult<()>;
}

/// Administrative persistence contract.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn truncate_all(&self) -> DomainResult<()>;
    async fn status(&self) -> DomainResult<ServiceStatus>;
}

/// Check a client out of the pool; checkout failures are opaque to
/// callers beyond being internal.
pub(crate) async fn checkout(pool: &Pool) -> DomainResult<Client> {
    pool.get().await.map_err(|err| {
        tracing::error!(error = %err, "connection checkout failed");
        DomainError::Internal
    })
}
