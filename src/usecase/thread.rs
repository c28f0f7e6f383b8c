use crate::errors::{DomainError, DomainResult};
use crate::models::{Thread, ThreadCreate, ThreadKey, ThreadUpdate, ThreadVote};
use crate::pagination::ThreadPaginator;
use crate::storage::{ForumStore, ThreadStore};
use crate::usecase::{Created, Updated};

pub struct ThreadUseCase<T, F> {
    threads: T,
    forums: F,
}

impl<T: ThreadStore, F: ForumStore> ThreadUseCase<T, F> {
    pub fn new(threads: T, forums: F) -> Self {
        Self { threads, forums }
    }

    /// Creates a thread in a forum. An absent forum surfaces as
    /// `DataConflict` (the delivery layer reports 404 for it on this
    /// endpoint); a duplicate slug yields the existing thread as an
    /// idempotent-create conflict.
    pub async fn create(
        &self,
        forum_slug: &str,
        thread: ThreadCreate,
    ) -> DomainResult<Created<Thread>> {
        let forum = self
            .forums
            .select_by_slug(forum_slug)
            .await
            .map_err(|_| DomainError::DataConflict)?;

        match self.threads.insert(&forum.slug, &thread).await {
            Ok(id) => Ok(Created::New(Thread {
                id,
                title: thread.title,
                author: thread.author,
                forum: forum.slug,
                message: thread.message,
                votes: 0,
                slug: thread.slug,
                created: thread.created,
            })),
            Err(DomainError::DataConflict) => {
                if let Some(slug) = &thread.slug {
                    if let Ok(existing) =
                        self.threads.select(&ThreadKey::Slug(slug.clone())).await
                    {
                        return Ok(Created::Existing(existing));
                    }
                }
                Err(DomainError::DataConflict)
            }
            Err(_) => Err(DomainError::Internal),
        }
    }

    pub async fn by_forum(
        &self,
        forum_slug: &str,
        page: &ThreadPaginator,
    ) -> DomainResult<Vec<Thread>> {
        self.forums
            .select_by_slug(forum_slug)
            .await
            .map_err(|_| DomainError::ForumNotFound)?;

        self.threads
            .select_by_forum(forum_slug, page)
            .await
            .map_err(|_| DomainError::Internal)
    }

    pub async fn details(&self, slug_or_id: &str) -> DomainResult<Thread> {
        let key = ThreadKey::parse(slug_or_id)?;
        self.threads
            .select(&key)
            .await
            .map_err(|_| DomainError::ThreadNotFound)
    }

    /// Partial update. Storage reports `EmptyParameters` when nothing
    /// was supplied; that is recovered into a plain read and tagged
    /// `Unchanged`.
    pub async fn update(
        &self,
        slug_or_id: &str,
        update: ThreadUpdate,
    ) -> DomainResult<Updated<Thread>> {
        let key = ThreadKey::parse(slug_or_id)?;
        match self.threads.update(&key, &update).await {
            Ok(thread) => Ok(Updated::Changed(thread)),
            Err(DomainError::EmptyParameters) => {
                let current = self
                    .threads
                    .select(&key)
                    .await
                    .map_err(|_| DomainError::ThreadNotFound)?;
                Ok(Updated::Unchanged(current))
            }
            Err(_) => Err(DomainError::ThreadNotFound),
        }
    }

    /// Upsert the author's vote, then re-read the thread for the
    /// trigger-maintained aggregate.
    pub async fn vote(&self, slug_or_id: &str, vote: ThreadVote) -> DomainResult<Thread> {
        let key = ThreadKey::parse(slug_or_id)?;
        self.threads
            .upsert_vote(&key, &vote)
            .await
            .map_err(|_| DomainError::ThreadNotFound)?;
        self.threads
            .select(&key)
            .await
            .map_err(|_| DomainError::ThreadNotFound)
    }
}
